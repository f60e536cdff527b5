//! `{placeholder}` substitution for speech command arguments.
//!
//! - `{name}` is replaced by the value of `name`
//! - `{{` and `}}` render literal braces
//! - an unknown placeholder is an error, never an empty string

use std::collections::HashMap;
use thiserror::Error;

/// Why a command argument could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("unknown placeholder '{{{name}}}' at position {position}")]
    Unknown { name: String, position: usize },

    #[error("unclosed '{{' at position {position}")]
    Unclosed { position: usize },

    #[error("empty placeholder '{{}}' at position {position}")]
    Empty { position: usize },
}

/// Substitute every placeholder in `arg`.
pub fn render_placeholders(
    arg: &str,
    values: &HashMap<&str, &str>,
) -> Result<String, PlaceholderError> {
    let mut rendered = String::with_capacity(arg.len());
    let mut chars = arg.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(PlaceholderError::Unclosed { position: pos }),
                    }
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(PlaceholderError::Empty { position: pos });
                }

                let value = values.get(name).ok_or_else(|| PlaceholderError::Unknown {
                    name: name.to_string(),
                    position: pos,
                })?;
                rendered.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                rendered.push('}');
            }
            _ => rendered.push(ch),
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("text", "Hello there, Maya."),
            ("voice", "laura"),
            ("style", ""),
            ("output", "/project/voice/speech-1.mp3"),
        ])
    }

    #[test]
    fn test_substitutes_placeholders() {
        assert_eq!(
            render_placeholders("--voice={voice}", &values()).unwrap(),
            "--voice=laura"
        );
        assert_eq!(
            render_placeholders("{text}", &values()).unwrap(),
            "Hello there, Maya."
        );
    }

    #[test]
    fn test_plain_argument_is_unchanged() {
        assert_eq!(render_placeholders("--fast", &values()).unwrap(), "--fast");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(render_placeholders("s={style}", &values()).unwrap(), "s=");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(
            render_placeholders("{{\"voice\": \"{voice}\"}}", &values()).unwrap(),
            "{\"voice\": \"laura\"}"
        );
    }

    #[test]
    fn test_lone_closing_brace_is_literal() {
        assert_eq!(render_placeholders("a}b", &values()).unwrap(), "a}b");
    }

    #[test]
    fn test_whitespace_inside_placeholder() {
        assert_eq!(render_placeholders("{ voice }", &values()).unwrap(), "laura");
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = render_placeholders("--speed={speed}", &values()).unwrap_err();
        assert_eq!(
            err,
            PlaceholderError::Unknown {
                name: "speed".to_string(),
                position: 8
            }
        );
        assert_eq!(err.to_string(), "unknown placeholder '{speed}' at position 8");
    }

    #[test]
    fn test_unclosed_placeholder() {
        let err = render_placeholders("{voice", &values()).unwrap_err();
        assert_eq!(err, PlaceholderError::Unclosed { position: 0 });
    }

    #[test]
    fn test_empty_placeholder() {
        let err = render_placeholders("x{}", &values()).unwrap_err();
        assert_eq!(err, PlaceholderError::Empty { position: 1 });
        assert_eq!(err.to_string(), "empty placeholder '{}' at position 1");
    }
}
