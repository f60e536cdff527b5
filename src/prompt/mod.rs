//! Request text scanning.
//!
//! Two independent passes run over the user's request:
//!
//! - **Explicit paths**: anything that looks like a document path
//!   (`scenes/first-binding.md`) becomes an include candidate verbatim.
//! - **Entity tokens**: the text is case-folded, split into words, stripped
//!   of stop words, and each remaining word is looked up in the
//!   [`EntityIndex`]. Matching is single-token and exact: `"the twins"`
//!   reaches the key `twins`, never a key `the twins`.

use crate::entity::EntityIndex;
use crate::events::{EventAction, EventLog};
use regex::Regex;
use serde_json::json;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Common function words, pronouns and auxiliaries that never name an entity.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "can", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "what", "which", "who", "when", "where", "why", "how", "as", "if", "because", "so", "than",
    "such", "no", "not", "only", "own", "same", "too", "very", "just",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

// Hyphens and underscores are deliberately absent so `maya-chen` stays whole.
static TOKEN_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s,.()?!;:"]+"#).expect("Invalid token split regex"));

/// Find document-like paths in the request, in order, duplicates kept.
pub fn extract_explicit_paths(text: &str, extension: &str) -> Vec<String> {
    let pattern = format!(r"[\w\-./]+\.{}", regex::escape(extension));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Case-folded candidate tokens with stop words removed.
pub fn extract_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    TOKEN_SPLIT_REGEX
        .split(&lower)
        .filter(|t| !t.is_empty())
        .filter(|t| !STOP_WORD_SET.contains(t))
        .map(str::to_string)
        .collect()
}

/// Entity paths named by the request, in first-match order, without duplicates.
pub fn match_entities(text: &str, index: &EntityIndex, log: &mut EventLog) -> Vec<String> {
    let tokens = extract_tokens(text);
    log.record(
        EventAction::ConceptExtraction,
        json!({ "tokens": tokens, "source": "user_prompt" }),
    );

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for token in &tokens {
        if let Some(path) = index.get(token)
            && seen.insert(path.to_string())
        {
            matched.push(path.to_string());
        }
    }

    if !matched.is_empty() {
        log.record(
            EventAction::ConceptMatching,
            json!({ "matches": matched, "status": "ok" }),
        );
    }

    matched
}
