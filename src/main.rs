//! Storyshell: context assembly for prompt-driven writing projects.
//!
//! This is the main entry point for the `storyshell` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod assembler;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod frontmatter;
pub mod include;
pub mod prompt;
pub mod relations;
pub mod speech;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
