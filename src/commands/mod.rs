//! Command implementations for storyshell.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the input helpers they share.

mod assemble;
mod index;
mod speak;

use crate::cli::{Cli, Command};
use crate::error::{Result, StoryshellError};
use std::io::{self, IsTerminal, Read};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        project_dir,
        framework_dir,
        command,
    } = cli;

    match command {
        Command::Assemble(args) => assemble::cmd_assemble(project_dir, framework_dir, args),
        Command::Index(args) => index::cmd_index(project_dir, framework_dir, args),
        Command::Speak(args) => speak::cmd_speak(project_dir, framework_dir, args),
    }
}

/// Free text from trailing words, falling back to piped stdin.
///
/// Returns `None` when there are no words and stdin is a terminal or empty.
pub(crate) fn text_input(words: &[String]) -> Result<Option<String>> {
    let stdin = io::stdin();
    if !words.is_empty() || stdin.is_terminal() {
        return Ok(join_words(words));
    }
    read_trimmed(stdin.lock())
}

fn join_words(words: &[String]) -> Option<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn read_trimmed<R: Read>(mut reader: R) -> Result<Option<String>> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|e| {
        StoryshellError::UserError(format!("failed to read request from stdin: {}", e))
    })?;

    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}
