//! Exit code constants for the storyshell CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unreadable working directory)
//! - 2: Missing mandatory input (template or project context file)
//! - 3: Speech synthesis failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration or environment.
pub const USER_ERROR: i32 = 1;

/// A mandatory input is missing: the named template or the project context file.
pub const MISSING_INPUT: i32 = 2;

/// The speech-synthesis collaborator failed.
pub const SPEECH_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, MISSING_INPUT, SPEECH_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn only_success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert!(USER_ERROR > 0);
        assert!(MISSING_INPUT > 0);
        assert!(SPEECH_FAILURE > 0);
    }
}
