//! Run context resolution for storyshell.
//!
//! This module resolves the two directories every run depends on and derives
//! all paths from them:
//!
//! - the **project directory**: the writer's project (context file, entity
//!   directories, log, voice output);
//! - the **framework directory**: the storyshell install root (template store,
//!   shared includes).
//!
//! Each is taken from an explicit override (CLI flag or environment variable,
//! handled by the CLI layer) or falls back to a default.

use crate::config::Config;
use crate::error::{Result, StoryshellError};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved directories and configuration for one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Absolute path to the active project directory.
    pub project_dir: PathBuf,

    /// Absolute path to the framework (install) directory.
    pub framework_dir: PathBuf,

    /// Configuration loaded from the project directory.
    pub config: Config,
}

impl RunContext {
    /// Resolve the run context.
    ///
    /// * `project_dir` - Override for the project directory (default: current directory)
    /// * `framework_dir` - Override for the framework directory (default: the
    ///   directory containing the running executable)
    pub fn resolve(project_dir: Option<PathBuf>, framework_dir: Option<PathBuf>) -> Result<Self> {
        let project_dir = match project_dir {
            Some(dir) => absolutize(&dir)?,
            None => env::current_dir().map_err(|e| {
                StoryshellError::UserError(format!(
                    "failed to get current working directory: {}",
                    e
                ))
            })?,
        };

        let framework_dir = match framework_dir {
            Some(dir) => absolutize(&dir)?,
            None => default_framework_dir()?,
        };

        if !project_dir.is_dir() {
            return Err(StoryshellError::UserError(format!(
                "project directory does not exist: {}",
                project_dir.display()
            )));
        }

        let config = Config::load_for_project(&project_dir)?;

        Ok(Self {
            project_dir,
            framework_dir,
            config,
        })
    }

    /// Build a context from known directories and config.
    ///
    /// This is useful for testing or when embedding the engine.
    pub fn new<P: Into<PathBuf>, F: Into<PathBuf>>(
        project_dir: P,
        framework_dir: F,
        config: Config,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            framework_dir: framework_dir.into(),
            config,
        }
    }

    /// Path of the named template in the template store.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.framework_dir
            .join(&self.config.template_dir)
            .join(self.config.document_file_name(name))
    }

    /// Path of the mandatory project context file.
    pub fn context_file_path(&self) -> PathBuf {
        self.project_dir.join(&self.config.context_file)
    }

    /// Path of an entity namespace directory.
    pub fn entity_dir(&self, namespace: &str) -> PathBuf {
        self.project_dir.join(namespace)
    }

    /// Directories tried, in priority order, when resolving an include.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        vec![self.project_dir.clone(), self.framework_dir.clone()]
    }

    /// Path of the event log, if logging is enabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.config
            .log_file
            .as_ref()
            .map(|rel| self.project_dir.join(rel))
    }

    /// Directory receiving synthesized audio.
    pub fn speech_output_dir(&self) -> PathBuf {
        self.project_dir.join(&self.config.speech.output_dir)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        StoryshellError::UserError(format!(
            "failed to resolve path '{}': {}",
            path.display(),
            e
        ))
    })
}

fn default_framework_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| {
        StoryshellError::UserError(format!(
            "failed to locate the storyshell executable: {}\n\
             Fix: pass --framework-dir or set STORYSHELL_ROOT.",
            e
        ))
    })?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        StoryshellError::UserError(format!(
            "executable path has no parent directory: {}\n\
             Fix: pass --framework-dir or set STORYSHELL_ROOT.",
            exe.display()
        ))
    })
}
