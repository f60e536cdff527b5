//! Speech synthesis through an external command.
//!
//! The configured command line is split into arguments with `shell-words`
//! first and placeholders are substituted per argument afterwards, so a
//! `{text}` containing spaces or quotes stays one argument.
//!
//! The command's stdout and stderr go to capture files next to the audio
//! output and are read back once the process has exited or been killed.
//! Pipes would keep the run waiting on any grandchild still holding them.

use super::template::{PlaceholderError, render_placeholders};
use super::{SpeechOutput, SpeechRequest, SpeechSynthesizer, audio_file_name};
use crate::config::{SpeechConfig, SpeechOutputMode};
use crate::error::{Result, StoryshellError};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Placeholders a speech command may reference.
pub const PLACEHOLDERS: &[&str] = &["text", "voice", "style", "output"];

/// A [`SpeechSynthesizer`] backed by a subprocess.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    command: String,
    output_mode: SpeechOutputMode,
    extension: String,
    mime_type: String,
    timeout: Duration,
    output_dir: PathBuf,
}

impl CommandSynthesizer {
    /// Build from configuration, writing audio under `output_dir`.
    pub fn from_config(config: &SpeechConfig, output_dir: PathBuf) -> Result<Self> {
        if config.command.trim().is_empty() {
            return Err(StoryshellError::UserError(
                "no speech command configured\n\
                 Fix: set speech.command in storyshell.yaml, e.g. \
                 command: \"my-tts --voice {voice} --out {output} {text}\""
                    .to_string(),
            ));
        }

        Ok(Self {
            command: config.command.clone(),
            output_mode: config.output_mode,
            extension: config.extension.clone(),
            mime_type: config.mime_type.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            output_dir,
        })
    }

    /// Render the argument vector for one request.
    pub fn render_args(&self, request: &SpeechRequest, output: &str) -> Result<Vec<String>> {
        let args = shell_words::split(&self.command).map_err(|e| {
            StoryshellError::UserError(format!(
                "failed to parse speech command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.command, e
            ))
        })?;

        if args.is_empty() {
            return Err(StoryshellError::UserError(format!(
                "speech command is empty after parsing: '{}'",
                self.command
            )));
        }

        let values = HashMap::from([
            ("text", request.text.as_str()),
            ("voice", request.voice.as_str()),
            ("style", request.style.as_deref().unwrap_or_default()),
            ("output", output),
        ]);

        args.iter()
            .map(|arg| {
                render_placeholders(arg, &values).map_err(|e| self.placeholder_error(e))
            })
            .collect()
    }

    fn placeholder_error(&self, e: PlaceholderError) -> StoryshellError {
        StoryshellError::UserError(format!(
            "speech command '{}' is invalid: {}\n\
             Available placeholders: {}",
            self.command,
            e,
            PLACEHOLDERS.join(", ")
        ))
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechOutput> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            StoryshellError::SpeechFailed(format!(
                "failed to create audio directory '{}': {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let output_path = self.output_dir.join(audio_file_name(&self.extension));
        let args = self.render_args(request, &output_path.to_string_lossy())?;

        let stdout_path = capture_path(&output_path, "stdout");
        let stderr_path = capture_path(&output_path, "stderr");

        let stdout = match self.output_mode {
            SpeechOutputMode::File => Stdio::null(),
            SpeechOutputMode::Stdout => Stdio::from(create_capture(&stdout_path)?),
        };
        let stderr = Stdio::from(create_capture(&stderr_path)?);

        let spawned = Command::new(&args[0])
            .args(&args[1..])
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn();

        let waited = match spawned {
            Ok(mut child) => wait_with_timeout(&mut child, self.timeout),
            Err(e) => Err(StoryshellError::SpeechFailed(format!(
                "failed to run speech command '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                args[0], e
            ))),
        };

        let stdout = take_capture(&stdout_path);
        let stderr = take_capture(&stderr_path);
        let (exit_code, timed_out) = waited?;

        if timed_out {
            return Err(StoryshellError::SpeechFailed(format!(
                "speech command timed out after {:?}",
                self.timeout
            )));
        }

        if exit_code != Some(0) {
            let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(StoryshellError::SpeechFailed(format!(
                "speech command exited with {}: {}",
                code,
                stderr.trim()
            )));
        }

        match self.output_mode {
            SpeechOutputMode::File => {
                if !output_path.is_file() {
                    return Err(StoryshellError::SpeechFailed(format!(
                        "speech command did not write '{}'",
                        output_path.display()
                    )));
                }
                Ok(SpeechOutput::File(output_path))
            }
            SpeechOutputMode::Stdout => {
                if stdout.is_empty() {
                    return Err(StoryshellError::SpeechFailed(
                        "speech command produced no audio on stdout".to_string(),
                    ));
                }
                Ok(SpeechOutput::Audio {
                    bytes: stdout,
                    mime_type: self.mime_type.clone(),
                })
            }
        }
    }
}

/// Capture file for one output stream of the command.
fn capture_path(output_path: &Path, stream: &str) -> PathBuf {
    let mut name = output_path.as_os_str().to_owned();
    name.push(format!(".{}", stream));
    PathBuf::from(name)
}

fn create_capture(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        StoryshellError::SpeechFailed(format!(
            "failed to create capture file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read a capture file and remove it. A missing file reads as empty.
fn take_capture(path: &Path) -> Vec<u8> {
    let bytes = std::fs::read(path).unwrap_or_default();
    let _ = std::fs::remove_file(path);
    bytes
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    // SIGKILL on Unix, TerminateProcess on Windows.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(StoryshellError::SpeechFailed(format!(
                    "failed to check speech command status: {}",
                    e
                )));
            }
        }
    }
}
