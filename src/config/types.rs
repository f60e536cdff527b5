//! Configuration types and defaults for storyshell.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// File name of the optional per-project configuration.
pub const CONFIG_FILE_NAME: &str = "storyshell.yaml";

/// Cautionary notice placed between the user request and the template body.
pub const DEFAULT_NOTICE: &str = "IMPORTANT: if you do save any output to a file, be sure not to clobber any of the files you may have read in as part of the context or templates!";

/// What happens when two entities register the same index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later-scanned entity replaces the earlier one (default).
    #[default]
    KeepLast,
    /// The first entity to claim a key keeps it.
    KeepFirst,
}

/// How the speech command hands back audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeechOutputMode {
    /// The command writes the file named by `{output}` (default).
    #[default]
    File,
    /// The command writes raw audio bytes to stdout.
    Stdout,
}

// Default value functions for serde
pub(crate) fn default_template_dir() -> String {
    "tpl".to_string()
}
pub(crate) fn default_context_file() -> String {
    "prompts/main.md".to_string()
}
pub(crate) fn default_entity_dirs() -> Vec<String> {
    vec!["codex".to_string(), "characters".to_string()]
}
pub(crate) fn default_document_extension() -> String {
    "md".to_string()
}
pub(crate) fn default_log_file() -> Option<String> {
    Some("log/storyshell.ndjson".to_string())
}
pub(crate) fn default_notice() -> String {
    DEFAULT_NOTICE.to_string()
}
pub(crate) fn default_voice() -> String {
    "default".to_string()
}
pub(crate) fn default_speech_extension() -> String {
    "mp3".to_string()
}
pub(crate) fn default_mime_type() -> String {
    "audio/mpeg".to_string()
}
pub(crate) fn default_speech_timeout_seconds() -> u64 {
    120
}
pub(crate) fn default_speech_output_dir() -> String {
    "voice".to_string()
}
