//! One-level relation expansion.
//!
//! A matched entity may name other entities in its frontmatter:
//!
//! ```text
//! ---
//! related_concepts:
//!   - steg
//! related_characters:
//!   - maya-chen
//! ---
//! ```
//!
//! Each value is looked up in the [`EntityIndex`] as written (no case folding
//! or other normalization). Only the matched entity's own relations are
//! followed; relations of related entities are not.

use crate::entity::EntityIndex;
use crate::error::WarningKind;
use crate::events::{EventAction, EventLog};
use crate::frontmatter::Document;
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;

/// Frontmatter keys holding relation lists, in lookup order.
pub const RELATION_KEYS: &[&str] = &["related_concepts", "related_characters"];

/// Paths related to one entity.
///
/// A missing entity file yields an empty list silently; an unreadable one
/// yields an empty list and a warning.
pub fn related_entities(
    entity_path: &str,
    index: &EntityIndex,
    project_dir: &Path,
    log: &mut EventLog,
) -> Vec<String> {
    let file = project_dir.join(entity_path);
    if !file.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) => {
            log.warn(
                WarningKind::RelatedEntity,
                format!(
                    "Error loading related entities from {}: {}",
                    entity_path, e
                ),
            );
            return Vec::new();
        }
    };

    let doc = Document::parse(&content);
    let related: Vec<String> = RELATION_KEYS
        .iter()
        .flat_map(|key| doc.frontmatter.list(key))
        .filter_map(|name| index.get(name))
        .map(str::to_string)
        .collect();

    if !related.is_empty() {
        log.record(
            EventAction::RelatedEntities,
            json!({ "from": entity_path, "loaded": related }),
        );
    }

    related
}

/// Related paths for every matched entity, first occurrence kept.
///
/// Paths already in `matched` are omitted; the caller appends the result
/// after the matched list.
pub fn expand(
    matched: &[String],
    index: &EntityIndex,
    project_dir: &Path,
    log: &mut EventLog,
) -> Vec<String> {
    let mut seen: HashSet<String> = matched.iter().cloned().collect();
    let mut expanded = Vec::new();

    for entity in matched {
        for path in related_entities(entity, index, project_dir, log) {
            if seen.insert(path.clone()) {
                expanded.push(path);
            }
        }
    }

    expanded
}
