//! CLI argument parsing for storyshell.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyshell: assemble writing prompts from templates and project context.
///
/// A template from the framework's `tpl/` directory is combined with the
/// project's `prompts/main.md`, every codex entry or character the request
/// mentions, their related entries, and any explicitly named documents.
#[derive(Parser, Debug)]
#[command(name = "storyshell")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project directory (default: current directory).
    #[arg(long, global = true, env = "STORYSHELL_PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Framework directory holding `tpl/` and shared includes
    /// (default: directory of the storyshell executable).
    #[arg(long, global = true, env = "STORYSHELL_ROOT", value_name = "DIR")]
    pub framework_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for storyshell.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a template with project context and print the result.
    ///
    /// The request is taken from the trailing words, or from stdin when no
    /// words are given and stdin is not a terminal.
    Assemble(AssembleArgs),

    /// Print the entity index (token to file).
    Index(IndexArgs),

    /// Synthesize speech with the configured command and print the audio path.
    Speak(SpeakArgs),
}

#[derive(Parser, Debug)]
pub struct AssembleArgs {
    /// Template name (file stem under `tpl/`).
    pub template: String,

    /// Original user command, scanned for entities and explicit paths in
    /// place of the request when the request was rewritten upstream.
    #[arg(long, env = "LLM_USER_COMMAND", value_name = "TEXT")]
    pub primary_request: Option<String>,

    /// Request text.
    pub request: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Emit the index as a JSON object.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SpeakArgs {
    /// Voice identifier (default: `speech.voice` from config).
    #[arg(long)]
    pub voice: Option<String>,

    /// Delivery direction passed as `{style}`.
    #[arg(long)]
    pub style: Option<String>,

    /// Text to speak (read from stdin when omitted).
    pub text: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
