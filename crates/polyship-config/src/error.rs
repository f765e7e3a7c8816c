//! Error types for target lookup, configuration loading and config compilation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Registry errors
    #[error("unknown target '{name}' (available: {})", .available.join(", "))]
    UnknownTarget {
        name: String,
        available: Vec<String>,
    },

    #[error("duplicate target name: {0}")]
    DuplicateTarget(String),

    // Compile-time target validation
    #[error("target '{target}' is missing required field '{field}'")]
    InvalidTarget { target: String, field: &'static str },

    // Config parsing/loading errors
    #[error("no polyship configuration found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, hint: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }
}
