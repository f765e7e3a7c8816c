//! Build execution for a single resolved configuration.

use std::path::PathBuf;
use std::sync::Arc;

use polyship_config::ResolvedConfig;
use tracing::{debug, info};

use crate::engine::{BundleEngine, with_banner};
use crate::minify::{Minifier, OxcMinifier};
use crate::output::{gzip_size, write_atomic};
use crate::plugins::PluginRegistry;
use crate::rolldown_engine::RolldownEngine;
use crate::{Error, Result};

/// Outcome of one successful target build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Target the artifact was built from.
    pub source_name: String,
    pub destination: PathBuf,
    /// Byte length of the written file.
    pub raw_bytes: u64,
    /// Gzip size, measured for production artifacts only.
    pub compressed_bytes: Option<u64>,
}

/// Runs bundle → (minify) → write → (measure) for one target.
#[derive(Clone)]
pub struct BuildExecutor {
    engine: Arc<dyn BundleEngine>,
    minifier: Arc<dyn Minifier>,
}

impl BuildExecutor {
    pub fn new(engine: Arc<dyn BundleEngine>, minifier: Arc<dyn Minifier>) -> Self {
        Self { engine, minifier }
    }

    /// Rolldown engine with the oxc minifier.
    ///
    /// No custom plugins are registered, so a target naming one in `plugins`
    /// fails with a bundle error. Use [`BuildExecutor::rolldown_with_plugins`]
    /// to supply them.
    pub fn rolldown() -> Self {
        Self::rolldown_with_plugins(PluginRegistry::new())
    }

    /// Rolldown engine resolving custom plugin names through `registry`.
    pub fn rolldown_with_plugins(registry: PluginRegistry) -> Self {
        Self::new(
            Arc::new(RolldownEngine::with_registry(registry)),
            Arc::new(OxcMinifier::default()),
        )
    }

    /// Build one artifact.
    ///
    /// Exactly one file is written. A failure before the write leaves the
    /// destination untouched.
    pub async fn execute(&self, config: &ResolvedConfig) -> Result<BuildResult> {
        let target = config.source_name.as_str();
        let destination = &config.output.destination;

        debug!(target_name = %target, input = %config.input.display(), "bundling");
        let code = self.engine.bundle(config).await?;

        let output = if config.is_production {
            let banner = config.output.banner.as_deref();
            let body = strip_banner(&code, banner);
            debug!(target_name = %target, bytes = body.len(), "minifying");
            let minified = self
                .minifier
                .minify(body, config.output.format)
                .map_err(|e| Error::Minify {
                    target: target.to_string(),
                    message: format!("{e:#}"),
                })?;
            with_banner(banner, minified)
        } else {
            code
        };

        write_atomic(destination, output.as_bytes())?;

        let compressed_bytes = if config.is_production {
            let size = gzip_size(output.as_bytes()).map_err(|source| Error::Compress {
                path: destination.clone(),
                source,
            })?;
            Some(size)
        } else {
            None
        };

        info!(
            target_name = %target,
            destination = %destination.display(),
            bytes = output.len(),
            production = config.is_production,
            "built target"
        );

        Ok(BuildResult {
            source_name: config.source_name.clone(),
            destination: destination.clone(),
            raw_bytes: output.len() as u64,
            compressed_bytes,
        })
    }
}

impl std::fmt::Debug for BuildExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildExecutor").finish_non_exhaustive()
    }
}

/// Drop the engine-emitted banner ahead of minification.
fn strip_banner<'a>(code: &'a str, banner: Option<&str>) -> &'a str {
    match banner {
        Some(banner) if !banner.is_empty() => code
            .strip_prefix(banner)
            .map(|rest| rest.strip_prefix('\n').unwrap_or(rest))
            .unwrap_or(code),
        _ => code,
    }
}
