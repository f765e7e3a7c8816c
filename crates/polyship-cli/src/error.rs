//! Error types for the polyship CLI.

use polyship_config::ConfigError;
use thiserror::Error;

use crate::orchestrator::TargetFailure;

mod report;

pub use report::cli_error_to_miette;

/// Result type alias for CLI operations.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Loading the project or selecting targets failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A target failed and the run stopped
    #[error("build aborted: {0}")]
    Aborted(#[from] TargetFailure),

    #[error("failed to serialize resolved configuration: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
