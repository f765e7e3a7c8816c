//! # polyship-bundler
//!
//! Turns a [`ResolvedConfig`](polyship_config::ResolvedConfig) into one
//! artifact on disk.
//!
//! The [`BuildExecutor`] drives a [`BundleEngine`] (Rolldown by default),
//! minifies production artifacts with a [`Minifier`] (oxc by default), writes
//! the result atomically and measures it.
//!
//! ```no_run
//! use polyship_bundler::BuildExecutor;
//! use polyship_config::{compile, BuildContext, ModuleFormat, TargetSpec};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = BuildContext::new("1.0.0", std::env::current_dir()?);
//! let target = TargetSpec::new("cjs", "src/index.js", "dist/lib.cjs.js", ModuleFormat::Cjs);
//! let config = compile(&target, &context)?;
//!
//! let result = BuildExecutor::rolldown().execute(&config).await?;
//! println!("{} bytes", result.raw_bytes);
//! # Ok(()) }
//! ```

pub mod diagnostics;
pub mod engine;
pub mod executor;
pub mod minify;
pub mod output;
pub mod plugins;
pub mod rolldown_engine;

pub use engine::{BundleEngine, with_banner};
pub use executor::{BuildExecutor, BuildResult};
pub use minify::{Minifier, MinifyOptions, OxcMinifier, escape_non_ascii};
pub use output::{gzip_size, write_atomic};
pub use plugins::{DownlevelPlugin, PluginFactory, PluginRegistry, SubstitutePlugin, Substitution};
pub use rolldown_engine::RolldownEngine;

// Re-export plugin types for custom plugin authors
pub use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext, __inner::SharedPluginable,
};

use std::path::PathBuf;

/// Error types for polyship-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundling engine rejected the target.
    #[error("failed to bundle '{target}': {message}")]
    Bundle { target: String, message: String },

    /// The minifier rejected the bundled code.
    #[error("failed to minify '{target}': {message}")]
    Minify { target: String, message: String },

    /// Writing the artifact failed.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Measuring the compressed size failed.
    #[error("failed to compress '{}': {source}", path.display())]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for polyship-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundle error from a Rolldown error batch.
    ///
    /// Extracts a readable message from Rolldown's diagnostics.
    pub fn from_rolldown_batch(target: &str, error: &dyn std::fmt::Debug) -> Self {
        Error::Bundle {
            target: target.to_string(),
            message: diagnostics::summarize(error),
        }
    }

    /// Name of the target the error belongs to, when known.
    pub fn target(&self) -> Option<&str> {
        match self {
            Error::Bundle { target, .. } | Error::Minify { target, .. } => Some(target),
            Error::Write { .. } | Error::Compress { .. } => None,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundle { .. } => "BUNDLE_ERROR",
            Error::Minify { .. } => "MINIFY_ERROR",
            Error::Write { .. } => "WRITE_FAILURE",
            Error::Compress { .. } => "COMPRESS_FAILURE",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Bundle { .. } => Some(Box::new(
                "Check the entry path, aliases and externals of the target.",
            )),
            Error::Write { path, .. } => Some(Box::new(format!(
                "Check disk space and permissions for '{}'.",
                path.display()
            ))),
            _ => None,
        }
    }
}
