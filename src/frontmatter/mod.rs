//! Frontmatter parsing for storyshell documents.
//!
//! Templates, the project context file, and entity files are markdown
//! documents that may start with a `---` delimited metadata block:
//!
//! ```text
//! ---
//! name: Maya Chen
//! aliases:
//!   - Maya
//!   - the pilot
//! related_concepts:
//!   - steg
//! ---
//!
//! Body text...
//! ```
//!
//! The block is not full YAML. Each line is one of:
//!
//! - `key: value` sets a scalar;
//! - `key:` with nothing after it opens an empty sequence;
//! - `- item` (any indentation) appends to the open sequence.
//!
//! Anything else is ignored, and a non-indented unrecognized line closes the
//! open sequence. Parsing never fails: a malformed block yields whatever was
//! recognized, and text without a well-formed block is all body.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

#[cfg(test)]
mod tests;

/// Delimiter line that opens and closes a metadata block.
pub const DELIMITER: &str = "---";

static KEY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+):\s*(.*)$").expect("Invalid frontmatter key regex")
});

static ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+(.+)$").expect("Invalid frontmatter item regex"));

/// A frontmatter value: a single scalar or an ordered sequence, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl FrontmatterValue {
    /// The scalar string, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FrontmatterValue::Scalar(s) => Some(s),
            FrontmatterValue::Sequence(_) => None,
        }
    }

    /// View the value as a list: a scalar is a one-element list.
    pub fn as_list(&self) -> &[String] {
        match self {
            FrontmatterValue::Scalar(s) => std::slice::from_ref(s),
            FrontmatterValue::Sequence(items) => items,
        }
    }
}

/// Parsed metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: BTreeMap<String, FrontmatterValue>,
}

impl Frontmatter {
    /// Parse the lines between the delimiters.
    pub fn parse_block(block: &str) -> Self {
        let mut entries = BTreeMap::new();
        // Key of the sequence currently accepting items.
        let mut open: Option<String> = None;

        for line in block.lines() {
            if let Some(key) = open.as_ref()
                && let Some(caps) = ITEM_REGEX.captures(line)
            {
                let item = caps[1].trim();
                if !item.is_empty()
                    && let Some(FrontmatterValue::Sequence(items)) = entries.get_mut(key)
                {
                    items.push(item.to_string());
                }
                continue;
            }

            if let Some(caps) = KEY_VALUE_REGEX.captures(line) {
                let key = caps[1].to_string();
                let value = caps[2].trim();

                if value.is_empty() {
                    entries.insert(key.clone(), FrontmatterValue::Sequence(Vec::new()));
                    open = Some(key);
                } else {
                    entries.insert(key, FrontmatterValue::Scalar(value.to_string()));
                    open = None;
                }
                continue;
            }

            let indented = line.starts_with(char::is_whitespace);
            if !line.trim().is_empty() && !indented {
                open = None;
            }
        }

        Self { entries }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.get(key)
    }

    /// Scalar value of a key, if present and scalar.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontmatterValue::as_scalar)
    }

    /// List view of a key; empty when the key is absent.
    pub fn list(&self, key: &str) -> &[String] {
        self.get(key).map(FrontmatterValue::as_list).unwrap_or(&[])
    }
}

/// A document: optional metadata block plus body.
///
/// The body borrows from the source text and is returned byte-for-byte.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
    has_block: bool,
}

impl<'a> Document<'a> {
    /// Split and parse a document. Never fails.
    pub fn parse(text: &'a str) -> Self {
        match split_block(text) {
            Some((block, body)) => Self {
                frontmatter: Frontmatter::parse_block(block),
                body,
                has_block: true,
            },
            None => Self {
                frontmatter: Frontmatter::default(),
                body: text,
                has_block: false,
            },
        }
    }

    /// Whether the text started with a well-formed metadata block.
    pub fn has_frontmatter(&self) -> bool {
        self.has_block
    }
}

/// Split `text` into `(block, body)` when it starts with a well-formed block.
///
/// A well-formed block is an opening `---` line, any lines, then a closing
/// `---` line terminated by a newline. Both LF and CRLF line endings are
/// accepted on the delimiter lines.
pub fn split_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if !first.ends_with('\n') || strip_line_ending(first) != DELIMITER {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;

    for line in lines {
        let line_start = offset;
        offset += line.len();

        if line.ends_with('\n') && strip_line_ending(line) == DELIMITER {
            return Some((&text[block_start..line_start], &text[offset..]));
        }
    }

    None
}

/// Body of a document with any metadata block removed.
pub fn strip(text: &str) -> &str {
    split_block(text).map(|(_, body)| body).unwrap_or(text)
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
