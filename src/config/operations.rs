//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::error::{Result, StoryshellError};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(StoryshellError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StoryshellError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            StoryshellError::UserError(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Load `storyshell.yaml` from the project directory, falling back to defaults
    /// when the file does not exist.
    pub fn load_for_project<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let path = project_dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                StoryshellError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `document_extension` and `speech.extension` must be non-empty with no leading dot
    /// - `entity_dirs` must not be empty
    /// - `context_file` and `template_dir` must be relative paths
    /// - `speech.timeout_seconds` must be positive
    pub fn validate(&self) -> Result<()> {
        check_extension("document_extension", &self.document_extension)?;
        check_extension("speech.extension", &self.speech.extension)?;

        if self.entity_dirs.is_empty() {
            return Err(StoryshellError::UserError(
                "config validation failed: entity_dirs must list at least one directory"
                    .to_string(),
            ));
        }

        for (field, value) in [
            ("context_file", &self.context_file),
            ("template_dir", &self.template_dir),
        ] {
            if value.is_empty() || Path::new(value).is_absolute() {
                return Err(StoryshellError::UserError(format!(
                    "config validation failed: {} must be a non-empty relative path (found '{}')",
                    field, value
                )));
            }
        }

        if self.speech.timeout_seconds == 0 {
            return Err(StoryshellError::UserError(
                "config validation failed: speech.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// File name for a document with the configured extension.
    pub fn document_file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.document_extension)
    }
}

fn check_extension(field: &str, ext: &str) -> Result<()> {
    if ext.is_empty() {
        return Err(StoryshellError::UserError(format!(
            "config validation failed: {} must be non-empty",
            field
        )));
    }
    if ext.starts_with('.') {
        return Err(StoryshellError::UserError(format!(
            "config validation failed: {} must not have a leading dot (found '{}'). Use '{}' instead.",
            field,
            ext,
            ext.trim_start_matches('.')
        )));
    }
    Ok(())
}
