//! Implementation of the `storyshell index` command.
//!
//! Prints every entity index key with the file it resolves to, sorted by
//! key. Useful for checking which words in a request will pull in which
//! codex entries and characters.

use crate::cli::IndexArgs;
use crate::context::RunContext;
use crate::entity::EntityIndex;
use crate::error::{Result, StoryshellError};
use crate::events::EventLog;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// Execute the `storyshell index` command.
pub fn cmd_index(
    project_dir: Option<PathBuf>,
    framework_dir: Option<PathBuf>,
    args: IndexArgs,
) -> Result<()> {
    let ctx = RunContext::resolve(project_dir, framework_dir)?;
    let mut log = EventLog::new(ctx.log_path());

    let index = EntityIndex::build(&ctx, &mut log);
    let mut stdout = std::io::stdout().lock();
    write_index(&index, args.json, &mut stdout)
}

/// Render the index as aligned text or a JSON object.
pub(crate) fn write_index<W: Write>(index: &EntityIndex, json: bool, out: &mut W) -> Result<()> {
    let write_err =
        |e: std::io::Error| StoryshellError::UserError(format!("failed to write index: {}", e));

    if json {
        let entries: BTreeMap<&str, &str> = index.iter().collect();
        let text = serde_json::to_string_pretty(&entries).map_err(|e| {
            StoryshellError::UserError(format!("failed to serialize index: {}", e))
        })?;
        writeln!(out, "{}", text).map_err(write_err)?;
        return Ok(());
    }

    if index.is_empty() {
        writeln!(out, "No entities found.").map_err(write_err)?;
        return Ok(());
    }

    let width = index.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, path) in index.iter() {
        writeln!(out, "{:width$}  {}", key, path, width = width).map_err(write_err)?;
    }
    writeln!(out).map_err(write_err)?;
    writeln!(out, "{} key(s)", index.len()).map_err(write_err)?;

    Ok(())
}
