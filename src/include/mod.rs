//! Include resolution.
//!
//! An include is a relative document path whose body is spliced into the
//! assembled output. Resolution:
//!
//! 1. Deduplicate the candidate list, keeping first occurrences.
//! 2. Sort the unique paths lexicographically, so output order depends only
//!    on the set of includes and not on how they were discovered.
//! 3. For each path, try the search roots in priority order. The first root
//!    holding a regular file wins; there is no merging across roots.
//! 4. Strip any frontmatter from the file and append its body followed by a
//!    blank line.
//!
//! A candidate that no root can supply is reported as a warning and skipped.

use crate::error::WarningKind;
use crate::events::{EventAction, EventLog};
use crate::frontmatter;
use serde_json::json;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};


/// Separator appended after every included body.
pub const INCLUDE_SEPARATOR: &str = "\n\n";

/// One include satisfied by a search root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInclude {
    /// The include as listed.
    pub include: String,
    /// The file that supplied it.
    pub path: PathBuf,
}

/// Result of resolving a candidate list.
#[derive(Debug, Clone, Default)]
pub struct IncludeReport {
    /// Final processing order (deduplicated, sorted).
    pub order: Vec<String>,
    /// Concatenated bodies.
    pub body: String,
    /// Includes that were found, in processing order.
    pub resolved: Vec<ResolvedInclude>,
    /// Includes no root could supply, in processing order.
    pub missing: Vec<String>,
}

/// Deduplicate (first occurrence wins) and sort the candidates.
pub fn order_candidates(candidates: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = candidates
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .cloned()
        .collect();
    unique.sort();
    unique
}

/// Paths to try for one include, in priority order.
///
/// Every root is tried first. An absolute include is joined under each root
/// with its leading separator removed, and finally tried as written.
pub fn candidate_paths(include: &str, roots: &[PathBuf]) -> Vec<PathBuf> {
    let include_path = Path::new(include);
    let relative: PathBuf = include_path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();

    let mut paths: Vec<PathBuf> = roots.iter().map(|root| root.join(&relative)).collect();
    if include_path.is_absolute() {
        paths.push(include_path.to_path_buf());
    }
    paths
}

/// Resolve every candidate against the search roots.
pub fn resolve(candidates: &[String], roots: &[PathBuf], log: &mut EventLog) -> IncludeReport {
    let order = order_candidates(candidates);
    log.record(
        EventAction::IncludesFinal,
        json!({ "total": order.len(), "files": order }),
    );

    let mut report = IncludeReport {
        order: order.clone(),
        ..IncludeReport::default()
    };

    for include in &order {
        match resolve_one(include, roots, log) {
            Some((path, content)) => {
                report.body.push_str(frontmatter::strip(&content));
                report.body.push_str(INCLUDE_SEPARATOR);
                log.record(
                    EventAction::Include,
                    json!({ "file": include, "resolved": path.display().to_string(), "status": "ok" }),
                );
                report.resolved.push(ResolvedInclude {
                    include: include.clone(),
                    path,
                });
            }
            None => {
                log.warn(
                    WarningKind::MissingInclude,
                    format!("Include file not found: {}", include),
                );
                log.record(
                    EventAction::Include,
                    json!({ "file": include, "status": "missing" }),
                );
                report.missing.push(include.clone());
            }
        }
    }

    report
}

/// First readable file for an include, with its contents.
fn resolve_one(include: &str, roots: &[PathBuf], log: &mut EventLog) -> Option<(PathBuf, String)> {
    for path in candidate_paths(include, roots) {
        if !path.is_file() {
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => return Some((path, content)),
            Err(e) => {
                log.warn(
                    WarningKind::UnreadableInclude,
                    format!("Error reading include {}: {}", path.display(), e),
                );
            }
        }
    }

    None
}
