//! Tests for config functionality.

use crate::config::types::DEFAULT_NOTICE;
use crate::config::{CollisionPolicy, Config, SpeechOutputMode};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.template_dir, "tpl");
    assert_eq!(config.context_file, "prompts/main.md");
    assert_eq!(config.entity_dirs, vec!["codex", "characters"]);
    assert_eq!(config.document_extension, "md");
    assert_eq!(config.collision_policy, CollisionPolicy::KeepLast);
    assert_eq!(config.notice, DEFAULT_NOTICE);
    assert_eq!(config.log_file.as_deref(), Some("log/storyshell.ndjson"));
    assert!(config.speech.command.is_empty());
    assert_eq!(config.speech.output_mode, SpeechOutputMode::File);
    assert_eq!(config.speech.timeout_seconds, 120);
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.template_dir, "tpl");
    assert_eq!(config.entity_dirs.len(), 2);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
context_file: inc/main.md
collision_policy: keep_first
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.context_file, "inc/main.md");
    assert_eq!(config.collision_policy, CollisionPolicy::KeepFirst);

    // Unspecified values should use defaults
    assert_eq!(config.template_dir, "tpl");
    assert_eq!(config.document_extension, "md");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
template_dir: templates
context_file: prompts/world.md
entity_dirs:
  - lore
  - cast
document_extension: markdown
collision_policy: keep_last
notice: "Do not overwrite inputs."
log_file: null
speech:
  command: "say-it --voice {voice} --out {output} {text}"
  voice: laura
  output_mode: stdout
  extension: wav
  mime_type: audio/wav
  timeout_seconds: 30
  output_dir: audio
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.template_dir, "templates");
    assert_eq!(config.entity_dirs, vec!["lore", "cast"]);
    assert_eq!(config.document_extension, "markdown");
    assert_eq!(config.notice, "Do not overwrite inputs.");
    assert!(config.log_file.is_none());
    assert_eq!(config.speech.voice, "laura");
    assert_eq!(config.speech.output_mode, SpeechOutputMode::Stdout);
    assert_eq!(config.speech.extension, "wav");
    assert_eq!(config.speech.timeout_seconds, 30);
    assert_eq!(config.speech.output_dir, "audio");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
context_file: prompts/main.md
future_option: enabled
"#;
    assert!(Config::from_yaml(yaml).is_ok());
}

#[test]
fn test_validate_extension_leading_dot() {
    let err = Config::from_yaml("document_extension: .md").unwrap_err();
    assert!(err.to_string().contains("document_extension"));
    assert!(err.to_string().contains("leading dot"));
}

#[test]
fn test_validate_empty_entity_dirs() {
    let err = Config::from_yaml("entity_dirs: []").unwrap_err();
    assert!(err.to_string().contains("entity_dirs"));
}

#[test]
fn test_validate_absolute_context_file() {
    let err = Config::from_yaml("context_file: /etc/main.md").unwrap_err();
    assert!(err.to_string().contains("context_file"));
}

#[test]
fn test_validate_zero_timeout() {
    let err = Config::from_yaml("speech:\n  timeout_seconds: 0\n").unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("entity_dirs: [unclosed").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_unknown_collision_policy_is_rejected() {
    let err = Config::from_yaml("collision_policy: merge\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_load_for_project_without_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_for_project(temp.path()).unwrap();
    assert_eq!(config.context_file, "prompts/main.md");
}

#[test]
fn test_load_for_project_reads_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("storyshell.yaml"),
        "template_dir: templates\n",
    )
    .unwrap();

    let config = Config::load_for_project(temp.path()).unwrap();
    assert_eq!(config.template_dir, "templates");
}

#[test]
fn test_load_reports_path_on_invalid_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storyshell.yaml");
    std::fs::write(&path, "document_extension: \"\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("storyshell.yaml"));
}

#[test]
fn test_document_file_name() {
    let config = Config::default();
    assert_eq!(config.document_file_name("scene"), "scene.md");
}
