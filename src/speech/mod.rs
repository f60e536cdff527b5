//! Speech synthesis boundary.
//!
//! The assembly engine never calls into speech. The `speak` command uses a
//! [`SpeechSynthesizer`] to turn text into audio, and every failure on this
//! side surfaces as [`StoryshellError::SpeechFailed`] (or a configuration
//! `UserError`), never as an assembly warning.

pub mod command;
pub mod template;

pub use command::CommandSynthesizer;

use crate::error::{Result, StoryshellError};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Text to speak and how to speak it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    /// Voice identifier understood by the synthesizer.
    pub voice: String,
    /// Optional delivery direction ("whispered", "urgent", ...).
    pub style: Option<String>,
}

/// Audio produced by a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutput {
    /// Audio already written to this file.
    File(PathBuf),
    /// Raw audio bytes.
    Audio { bytes: Vec<u8>, mime_type: String },
}

/// Something that can turn text into audio.
pub trait SpeechSynthesizer {
    fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechOutput>;
}

/// Timestamped file name for a new audio file.
pub fn audio_file_name(extension: &str) -> String {
    format!("speech-{}.{}", Utc::now().timestamp_millis(), extension)
}

/// Make sure the audio lives on disk and return its path.
///
/// Files are returned as-is; raw bytes are written to a new file in `dir`.
pub fn persist(output: SpeechOutput, dir: &Path, extension: &str) -> Result<PathBuf> {
    match output {
        SpeechOutput::File(path) => Ok(path),
        SpeechOutput::Audio { bytes, .. } => {
            std::fs::create_dir_all(dir).map_err(|e| {
                StoryshellError::SpeechFailed(format!(
                    "failed to create audio directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;

            let path = dir.join(audio_file_name(extension));
            std::fs::write(&path, &bytes).map_err(|e| {
                StoryshellError::SpeechFailed(format!(
                    "failed to write audio file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(path)
        }
    }
}
