//! Tests for frontmatter parsing and document splitting.

use super::*;

const CHARACTER: &str = r#"---
name: Maya Chen
role: pilot
aliases:
  - Maya
  - the pilot
related_concepts:
  - steg
---

## Maya Chen
Ace pilot of the Meridian.
"#;

fn seq(items: &[&str]) -> FrontmatterValue {
    FrontmatterValue::Sequence(items.iter().map(|s| s.to_string()).collect())
}

fn scalar(s: &str) -> FrontmatterValue {
    FrontmatterValue::Scalar(s.to_string())
}

fn map(pairs: &[(&str, FrontmatterValue)]) -> Frontmatter {
    Frontmatter {
        entries: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

/// Write a map back out in the block grammar the parser reads.
fn to_block(fm: &Frontmatter) -> String {
    let mut out = format!("{}\n", DELIMITER);
    for (key, value) in &fm.entries {
        match value {
            FrontmatterValue::Scalar(s) => out.push_str(&format!("{}: {}\n", key, s)),
            FrontmatterValue::Sequence(items) => {
                out.push_str(&format!("{}:\n", key));
                for item in items {
                    out.push_str(&format!("  - {}\n", item));
                }
            }
        }
    }
    out.push_str(&format!("{}\n", DELIMITER));
    out
}

#[test]
fn test_parse_scalars_and_sequences() {
    let doc = Document::parse(CHARACTER);

    assert!(doc.has_frontmatter());
    assert_eq!(doc.frontmatter.scalar("name"), Some("Maya Chen"));
    assert_eq!(doc.frontmatter.scalar("role"), Some("pilot"));
    assert_eq!(doc.frontmatter.get("aliases"), Some(&seq(&["Maya", "the pilot"])));
    assert_eq!(doc.frontmatter.list("related_concepts"), ["steg"]);
    assert_eq!(doc.body, "\n## Maya Chen\nAce pilot of the Meridian.\n");
}

#[test]
fn test_no_block_is_all_body() {
    let text = "# Just a template\n\nWrite a scene.\n";
    let doc = Document::parse(text);

    assert!(!doc.has_frontmatter());
    assert_eq!(doc.frontmatter, Frontmatter::default());
    assert_eq!(doc.body, text);
}

#[test]
fn test_unclosed_block_is_all_body() {
    let text = "---\nname: Maya\nno closing delimiter\n";
    let doc = Document::parse(text);

    assert!(!doc.has_frontmatter());
    assert_eq!(doc.body, text);
}

#[test]
fn test_closing_delimiter_without_trailing_newline_is_not_a_block() {
    let text = "---\nname: Maya\n---";
    let doc = Document::parse(text);

    assert!(!doc.has_frontmatter());
    assert_eq!(doc.body, text);
}

#[test]
fn test_delimiter_must_be_first_line() {
    let text = "\n---\nname: Maya\n---\nbody\n";
    assert!(!Document::parse(text).has_frontmatter());
}

#[test]
fn test_longer_dash_line_does_not_close_block() {
    let text = "---\nname: Maya\n----\nstill: block\n---\nbody\n";
    let doc = Document::parse(text);

    assert!(doc.has_frontmatter());
    assert_eq!(doc.frontmatter.scalar("still"), Some("block"));
    assert_eq!(doc.body, "body\n");
}

#[test]
fn test_empty_block() {
    let doc = Document::parse("---\n---\nbody\n");
    assert!(doc.has_frontmatter());
    assert_eq!(doc.frontmatter, Frontmatter::default());
    assert_eq!(doc.body, "body\n");
}

#[test]
fn test_crlf_delimiters_preserve_body() {
    let text = "---\r\nname: Maya\r\naliases:\r\n  - Maya\r\n---\r\nLine one\r\nLine two\r\n";
    let doc = Document::parse(text);

    assert!(doc.has_frontmatter());
    assert_eq!(doc.frontmatter.scalar("name"), Some("Maya"));
    assert_eq!(doc.frontmatter.list("aliases"), ["Maya"]);
    assert_eq!(doc.body, "Line one\r\nLine two\r\n");
}

#[test]
fn test_top_level_key_closes_sequence() {
    let block = "aliases:\n  - one\nname: Two\n  - stray\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm.list("aliases"), ["one"]);
    assert_eq!(fm.scalar("name"), Some("Two"));
}

#[test]
fn test_unrecognized_top_level_line_closes_sequence() {
    let block = "includes:\n  - a.md\n# comment\n  - b.md\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm.list("includes"), ["a.md"]);
}

#[test]
fn test_indented_noise_and_blank_lines_keep_sequence_open() {
    let block = "includes:\n  - a.md\n\n    continuation text\n  - b.md\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm.list("includes"), ["a.md", "b.md"]);
}

#[test]
fn test_items_without_open_sequence_are_ignored() {
    let block = "name: Maya\n  - orphan\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm, map(&[("name", scalar("Maya"))]));
}

#[test]
fn test_item_requires_space_after_dash() {
    let block = "aliases:\n  -nospace\n  - spaced\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm.list("aliases"), ["spaced"]);
}

#[test]
fn test_repeated_key_replaces_value() {
    let block = "name: First\nname: Second\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm.scalar("name"), Some("Second"));
}

#[test]
fn test_scalar_value_is_trimmed() {
    let fm = Frontmatter::parse_block("name:    Maya Chen   \n");
    assert_eq!(fm.scalar("name"), Some("Maya Chen"));
}

#[test]
fn test_whitespace_only_value_opens_sequence() {
    let fm = Frontmatter::parse_block("aliases:   \n  - Maya\n");
    assert_eq!(fm.get("aliases"), Some(&seq(&["Maya"])));
}

#[test]
fn test_malformed_lines_degrade_to_partial_map() {
    let block = "name: Maya\n: no key\n123: digits\nkey with spaces: x\nrole: pilot\n";
    let fm = Frontmatter::parse_block(block);

    assert_eq!(fm, map(&[("name", scalar("Maya")), ("role", scalar("pilot"))]));
}

#[test]
fn test_value_accessors_branch_on_shape() {
    let s = scalar("steg");
    assert_eq!(s.as_scalar(), Some("steg"));
    assert_eq!(s.as_list(), ["steg"]);

    let q = seq(&["a", "b"]);
    assert!(q.as_scalar().is_none());
    assert_eq!(q.as_list(), ["a", "b"]);

    let fm = Frontmatter::default();
    assert!(fm.list("missing").is_empty());
}

#[test]
fn test_round_trip_recovers_map_and_body() {
    let fm = map(&[
        ("name", scalar("Maya Chen")),
        ("aliases", seq(&["maya", "the pilot"])),
        ("related_characters", seq(&[])),
        ("status", scalar("draft")),
    ]);

    let body = "\n## Notes\n\n- a list in the body\nkey: not metadata\n";
    let text = format!("{}{}", to_block(&fm), body);

    let doc = Document::parse(&text);
    assert!(doc.has_frontmatter());
    assert_eq!(doc.frontmatter, fm);
    assert_eq!(doc.body, body);
}

#[test]
fn test_strip_returns_body_only() {
    assert_eq!(strip(CHARACTER), "\n## Maya Chen\nAce pilot of the Meridian.\n");
    assert_eq!(strip("plain text"), "plain text");
}

#[test]
fn test_split_block_offsets() {
    let (block, body) = split_block("---\na: 1\n---\nrest").unwrap();
    assert_eq!(block, "a: 1\n");
    assert_eq!(body, "rest");
}
