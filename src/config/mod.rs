//! Configuration model for storyshell.
//!
//! This module defines the Config struct that represents the optional
//! `storyshell.yaml` in the project directory. Unknown YAML fields are ignored,
//! every field has a default, and values are validated after parsing.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{Config, SpeechConfig};
pub use types::{CollisionPolicy, SpeechOutputMode};
