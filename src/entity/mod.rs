//! Entity index for storyshell.
//!
//! Entities are concept and character files living in the project's entity
//! directories (`codex/` and `characters/` by default). The index maps a
//! lookup token to the entity's project-relative path:
//!
//! - the file's base name (`codex/steg.md` registers `steg`);
//! - every alias in the `aliases` list, case-folded;
//! - the `name` field, case-folded with whitespace runs replaced by `-`
//!   (`Maya Chen` registers `maya-chen`).
//!
//! Keys carry no namespace, so a concept and a character can compete for the
//! same key. Which one wins is decided by the configured [`CollisionPolicy`].

use crate::config::CollisionPolicy;
use crate::context::RunContext;
use crate::error::WarningKind;
use crate::events::{EventAction, EventLog};
use crate::frontmatter::Document;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};


/// Outcome of registering one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The key was new.
    New,
    /// The key already mapped to this same path.
    Unchanged,
    /// The key mapped elsewhere and now maps to the new path.
    Replaced { previous: String },
    /// The key mapped elsewhere and kept its original path.
    Kept { existing: String },
}

/// Lookup table from normalized token to entity path.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entries: BTreeMap<String, String>,
    policy: CollisionPolicy,
}

impl EntityIndex {
    /// Create an empty index with a collision policy.
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            policy,
        }
    }

    /// Build the index by scanning every configured entity directory.
    ///
    /// Directories are scanned in configuration order, files within a
    /// directory in name order. Missing directories contribute nothing;
    /// unreadable files are reported as warnings and skipped.
    pub fn build(ctx: &RunContext, log: &mut EventLog) -> Self {
        let mut index = Self::new(ctx.config.collision_policy);
        let mut counts = serde_json::Map::new();

        for namespace in &ctx.config.entity_dirs {
            let dir = ctx.entity_dir(namespace);
            let count =
                index.scan_directory(&dir, namespace, &ctx.config.document_extension, log);
            counts.insert(namespace.clone(), json!(count));
        }

        log.record(
            EventAction::EntityIndex,
            json!({
                "status": "built",
                "files": counts,
                "total_entries": index.len(),
            }),
        );

        index
    }

    /// Scan one entity directory into the index, returning the number of
    /// entity files seen.
    pub fn scan_directory(
        &mut self,
        dir: &Path,
        namespace: &str,
        extension: &str,
        log: &mut EventLog,
    ) -> usize {
        if !dir.is_dir() {
            log.record(
                EventAction::ScanDirectory,
                json!({ "dir": namespace, "status": "not_found" }),
            );
            return 0;
        }

        let files = match list_entity_files(dir, namespace, extension, log) {
            Ok(files) => files,
            Err(e) => {
                log.warn(
                    WarningKind::EntityParse,
                    format!("Error reading directory {}: {}", namespace, e),
                );
                return 0;
            }
        };

        for (file_name, base_name) in &files {
            let rel_path = format!("{}/{}", namespace, file_name);

            self.register(base_name, &rel_path, log);

            let content = match fs::read_to_string(dir.join(file_name)) {
                Ok(content) => content,
                Err(e) => {
                    log.warn(
                        WarningKind::EntityParse,
                        format!("Error parsing {}: {}", file_name, e),
                    );
                    continue;
                }
            };

            let doc = Document::parse(&content);
            for alias in doc.frontmatter.list("aliases") {
                self.register(&alias.to_lowercase(), &rel_path, log);
            }
            if let Some(name) = doc.frontmatter.scalar("name") {
                self.register(&normalize_name(name), &rel_path, log);
            }
        }

        log.record(
            EventAction::ScanDirectory,
            json!({ "dir": namespace, "status": "ok", "files": files.len() }),
        );

        files.len()
    }

    /// Register a key according to the collision policy.
    pub fn insert(&mut self, key: &str, path: &str) -> Insertion {
        match self.entries.get(key) {
            None => {
                self.entries.insert(key.to_string(), path.to_string());
                Insertion::New
            }
            Some(existing) if existing == path => Insertion::Unchanged,
            Some(existing) => match self.policy {
                CollisionPolicy::KeepLast => {
                    let previous = existing.clone();
                    self.entries.insert(key.to_string(), path.to_string());
                    Insertion::Replaced { previous }
                }
                CollisionPolicy::KeepFirst => Insertion::Kept {
                    existing: existing.clone(),
                },
            },
        }
    }

    fn register(&mut self, key: &str, path: &str, log: &mut EventLog) {
        match self.insert(key, path) {
            Insertion::Replaced { previous } => log.record(
                EventAction::IndexCollision,
                json!({ "key": key, "winner": path, "loser": previous }),
            ),
            Insertion::Kept { existing } => log.record(
                EventAction::IndexCollision,
                json!({ "key": key, "winner": existing, "loser": path }),
            ),
            Insertion::New | Insertion::Unchanged => {}
        }
    }

    /// Exact lookup of a token.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Normalize a display name into an index key: `Maya  Chen` -> `maya-chen`.
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;

    for ch in lower.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }

    out
}

/// Regular files with the document extension, as `(file_name, base_name)`
/// sorted by file name. Only a failure to open the directory is an error.
fn list_entity_files(
    dir: &Path,
    namespace: &str,
    extension: &str,
    log: &mut EventLog,
) -> io::Result<Vec<(String, String)>> {
    let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(collect_entity_files(entries, namespace, extension, log))
}

/// Filter directory entries down to entity files. An entry that cannot be
/// read is skipped with a warning.
fn collect_entity_files(
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
    namespace: &str,
    extension: &str,
    log: &mut EventLog,
) -> Vec<(String, String)> {
    let suffix = format!(".{}", extension);
    let mut files = Vec::new();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log.warn(
                    WarningKind::EntityParse,
                    format!("Error reading entry in {}: {}", namespace, e),
                );
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(base_name) = file_name.strip_suffix(&suffix) {
            files.push((file_name.to_string(), base_name.to_string()));
        }
    }

    files.sort();
    files
}
