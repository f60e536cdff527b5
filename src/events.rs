//! Event logging for storyshell.
//!
//! Every run owns exactly one [`EventLog`], created by the command layer and
//! passed by `&mut` to each component. Nothing in the crate logs through
//! global state.
//!
//! # Event Format
//!
//! Events are appended in NDJSON format (one JSON object per line) to the
//! configured log file (default `log/storyshell.ndjson` in the project):
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: What happened (`template`, `include`, `warning`, ...)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `details`: Freeform object with action-specific details
//!
//! Logging never fails a run. If the sink cannot be written, one notice goes
//! to stderr and the log disables itself.
//!
//! Warnings are additionally echoed to stderr as `Warning: <message>` and kept
//! in memory so the caller receives them with the assembly result.

use crate::error::{Result, StoryshellError, Warning, WarningKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Run started
    Start,
    /// Template loaded
    Template,
    /// Template had no frontmatter; raw output path taken
    RawTemplate,
    /// Mandatory project context file located
    ProjectContext,
    /// Includes declared by the project context file
    ProjectContextIncludes,
    /// File-like paths found in the request text
    ExplicitPaths,
    /// One entity directory scanned
    ScanDirectory,
    /// Two entities registered the same index key
    IndexCollision,
    /// Entity index summary
    EntityIndex,
    /// Tokens extracted from the request text
    ConceptExtraction,
    /// Entities matched from the request text
    ConceptMatching,
    /// Related entities pulled in by a matched entity
    RelatedEntities,
    /// Final ordered include list
    IncludesFinal,
    /// One include resolved (or not)
    Include,
    /// Recoverable problem
    Warning,
    /// Fatal problem
    Error,
    /// Document emitted
    Output,
    /// Speech synthesis invoked
    Speech,
    /// Run finished
    End,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventAction::Start => "start",
            EventAction::Template => "template",
            EventAction::RawTemplate => "raw_template",
            EventAction::ProjectContext => "project_context",
            EventAction::ProjectContextIncludes => "project_context_includes",
            EventAction::ExplicitPaths => "explicit_paths",
            EventAction::ScanDirectory => "scan_directory",
            EventAction::IndexCollision => "index_collision",
            EventAction::EntityIndex => "entity_index",
            EventAction::ConceptExtraction => "concept_extraction",
            EventAction::ConceptMatching => "concept_matching",
            EventAction::RelatedEntities => "related_entities",
            EventAction::IncludesFinal => "includes_final",
            EventAction::Include => "include",
            EventAction::Warning => "warning",
            EventAction::Error => "error",
            EventAction::Output => "output",
            EventAction::Speech => "speech",
            EventAction::End => "end",
        };
        write!(f, "{}", name)
    }
}

/// An event record for the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who ran storyshell (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action and empty details.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            StoryshellError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append one event line to an NDJSON file, creating parent directories.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            StoryshellError::UserError(format!(
                "failed to create log directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            StoryshellError::UserError(format!(
                "failed to open log file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        StoryshellError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Per-run logger.
#[derive(Debug)]
pub struct EventLog {
    sink: Option<PathBuf>,
    echo_warnings: bool,
    warnings: Vec<Warning>,
}

impl EventLog {
    /// Log to `sink` (if any) and echo warnings to stderr.
    pub fn new(sink: Option<PathBuf>) -> Self {
        Self {
            sink,
            echo_warnings: true,
            warnings: Vec::new(),
        }
    }

    /// A log that writes nothing anywhere but still collects warnings.
    pub fn silent() -> Self {
        Self {
            sink: None,
            echo_warnings: false,
            warnings: Vec::new(),
        }
    }

    /// Record an event with details.
    pub fn record(&mut self, action: EventAction, details: Value) {
        let Some(path) = self.sink.as_ref() else {
            return;
        };

        let event = Event::new(action).with_details(details);
        if let Err(e) = append_event(path, &event) {
            eprintln!("Warning: event logging disabled: {}", e);
            self.sink = None;
        }
    }

    /// Record a recoverable problem: log it, echo it, and keep it for the caller.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning::new(kind, message);

        if self.echo_warnings {
            eprintln!("Warning: {}", warning.message);
        }
        self.record(
            EventAction::Warning,
            json!({ "kind": warning.kind, "message": warning.message }),
        );
        self.warnings.push(warning);
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drain the recorded warnings.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
