//! Conversion from CLI errors to miette reports.

use miette::Report;
use polyship_config::ConfigError;

use crate::error::CliError;
use crate::orchestrator::{TargetError, TargetFailure};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Aborted(failure) => failure_to_miette(failure),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound(_) => miette::miette!(
            help = "Create polyship.toml, or add a \"polyship\" field to package.json",
            "{}",
            err
        ),
        ConfigError::UnknownTarget { .. } => miette::miette!(
            help = "Run `polyship list` to see the configured targets",
            "{}",
            err
        ),
        _ => miette::miette!("Configuration error: {}", err),
    }
}

fn failure_to_miette(failure: TargetFailure) -> Report {
    let TargetFailure { target, error } = failure;
    match error {
        TargetError::Build(e) => Report::new(e).wrap_err(format!("target '{target}' failed")),
        TargetError::Compile(e) => {
            config_error_to_miette(e).wrap_err(format!("target '{target}' failed to compile"))
        }
    }
}
