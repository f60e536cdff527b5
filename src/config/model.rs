//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a storyshell project.
///
/// This struct represents the contents of `storyshell.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Layout
    // =========================================================================
    /// Template store directory, relative to the framework root.
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Mandatory project context file, relative to the project directory.
    #[serde(default = "default_context_file")]
    pub context_file: String,

    /// Entity namespaces scanned for the index, in scan order.
    #[serde(default = "default_entity_dirs")]
    pub entity_dirs: Vec<String>,

    /// Extension of documents (templates, entities, explicit paths). No leading dot.
    #[serde(default = "default_document_extension")]
    pub document_extension: String,

    // =========================================================================
    // Assembly
    // =========================================================================
    /// Policy for entity index key collisions.
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Cautionary notice inserted before the template body.
    #[serde(default = "default_notice")]
    pub notice: String,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Event log path relative to the project directory. `null` disables logging.
    #[serde(default = "default_log_file")]
    pub log_file: Option<String>,

    // =========================================================================
    // Speech synthesis
    // =========================================================================
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            context_file: default_context_file(),
            entity_dirs: default_entity_dirs(),
            document_extension: default_document_extension(),
            collision_policy: CollisionPolicy::default(),
            notice: default_notice(),
            log_file: default_log_file(),
            speech: SpeechConfig::default(),
        }
    }
}

/// Settings for the command-backed speech synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Command template. Placeholders: `{text}`, `{voice}`, `{style}`, `{output}`.
    #[serde(default)]
    pub command: String,

    /// Voice used when `--voice` is not given.
    #[serde(default = "default_voice")]
    pub voice: String,

    /// How the command returns audio.
    #[serde(default)]
    pub output_mode: SpeechOutputMode,

    /// Extension for generated audio files (no leading dot).
    #[serde(default = "default_speech_extension")]
    pub extension: String,

    /// MIME type reported for captured audio.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Seconds before the speech command is killed.
    #[serde(default = "default_speech_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Audio output directory relative to the project directory.
    #[serde(default = "default_speech_output_dir")]
    pub output_dir: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            voice: default_voice(),
            output_mode: SpeechOutputMode::default(),
            extension: default_speech_extension(),
            mime_type: default_mime_type(),
            timeout_seconds: default_speech_timeout_seconds(),
            output_dir: default_speech_output_dir(),
        }
    }
}
