//! Error types for storyshell.
//!
//! Failures fall into two classes:
//!
//! - **Fatal** ([`StoryshellError`]): the run aborts with a non-zero exit code
//!   and produces no document.
//! - **Recoverable** ([`Warning`]): logged to the diagnostic stream and
//!   collected for the caller; the run continues as if the input were absent.

use crate::exit_codes;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error type for storyshell operations.
#[derive(Error, Debug)]
pub enum StoryshellError {
    /// User provided invalid arguments, configuration, or environment.
    #[error("{0}")]
    UserError(String),

    /// The requested template does not exist in the template store.
    #[error("Template not found: {}", path.display())]
    TemplateNotFound {
        /// Template name as supplied by the caller.
        name: String,
        /// Path that was checked.
        path: PathBuf,
    },

    /// The mandatory project context file is missing.
    #[error(
        "Project context not found: {}\n\n\
         You must have {relative} in your project directory.\n\
         Run from your project directory, or pass --project-dir.",
        path.display()
    )]
    ProjectContextMissing {
        /// Context file path relative to the project directory.
        relative: String,
        /// Absolute path that was checked.
        path: PathBuf,
    },

    /// The speech-synthesis collaborator failed.
    #[error("Speech synthesis failed: {0}")]
    SpeechFailed(String),
}

impl StoryshellError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StoryshellError::UserError(_) => exit_codes::USER_ERROR,
            StoryshellError::TemplateNotFound { .. } => exit_codes::MISSING_INPUT,
            StoryshellError::ProjectContextMissing { .. } => exit_codes::MISSING_INPUT,
            StoryshellError::SpeechFailed(_) => exit_codes::SPEECH_FAILURE,
        }
    }
}

/// Result type alias for storyshell operations.
pub type Result<T> = std::result::Result<T, StoryshellError>;

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// An entity file could not be read while building the index.
    EntityParse,
    /// No search root contained the include.
    MissingInclude,
    /// An include existed but could not be read.
    UnreadableInclude,
    /// A matched entity's file could not be read for relation expansion.
    RelatedEntity,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::EntityParse => write!(f, "entity_parse"),
            WarningKind::MissingInclude => write!(f, "missing_include"),
            WarningKind::UnreadableInclude => write!(f, "unreadable_include"),
            WarningKind::RelatedEntity => write!(f, "related_entity"),
        }
    }
}

/// A recoverable problem encountered during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
