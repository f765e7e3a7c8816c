//! [`BundleEngine`] backed by Rolldown.
//!
//! The resolved configuration maps onto Rolldown options as follows:
//!
//! | ResolvedConfig                | Rolldown                         |
//! |-------------------------------|----------------------------------|
//! | `input`                       | single `InputItem`               |
//! | `base_dir`                    | `cwd`                            |
//! | `output.format`               | `format`                         |
//! | `output.module_name`          | `name` (UMD / IIFE only)         |
//! | `external`                    | `external`                       |
//! | `Alias` step                  | `resolve.alias` (absolute paths) |
//! | `Custom`, `Substitute`, `Downlevel` steps | plugins, in order    |

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use polyship_config::{ModuleFormat, ResolvedConfig, TransformStep};
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat, Platform, ResolveOptions,
};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;
use tracing::{debug, warn};

use crate::diagnostics;
use crate::engine::{BundleEngine, with_banner};
use crate::plugins::{DownlevelPlugin, PluginRegistry, SubstitutePlugin};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct RolldownEngine {
    registry: PluginRegistry,
}

impl RolldownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine resolving custom plugin names through `registry`.
    pub fn with_registry(registry: PluginRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Build the plugin chain in the order the transform steps appear.
    fn plugins_for(&self, config: &ResolvedConfig) -> Result<Vec<SharedPluginable>> {
        let target = config.source_name.as_str();
        let bundle_error = |message: String| Error::Bundle {
            target: target.to_string(),
            message,
        };

        let mut plugins: Vec<SharedPluginable> = Vec::new();
        for step in &config.plugins {
            match step {
                // Handled by the resolver options.
                TransformStep::Alias { .. } => {}
                TransformStep::Custom { name } => {
                    let plugin = self.registry.create(name).ok_or_else(|| {
                        bundle_error(unknown_plugin_message(name, &self.registry))
                    })?;
                    plugins.push(plugin);
                }
                TransformStep::Substitute { macros } => {
                    let plugin = SubstitutePlugin::new(macros)
                        .map_err(|e| bundle_error(format!("invalid macro table: {e}")))?;
                    plugins.push(Arc::new(plugin));
                }
                TransformStep::Downlevel { target } => {
                    let plugin =
                        DownlevelPlugin::new(target).map_err(|e| bundle_error(format!("{e:#}")))?;
                    plugins.push(Arc::new(plugin));
                }
            }
        }
        Ok(plugins)
    }
}

#[async_trait]
impl BundleEngine for RolldownEngine {
    async fn bundle(&self, config: &ResolvedConfig) -> Result<String> {
        let target = config.source_name.as_str();
        let options = bundler_options(config);
        let plugins = self.plugins_for(config)?;
        debug!(target_name = %target, plugins = plugins.len(), "configured rolldown");

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .with_plugins(plugins)
            .build()
            .map_err(|e| Error::from_rolldown_batch(target, &e))?;

        let bundle = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(target, &e))?;

        for warning in &bundle.warnings {
            if diagnostics::is_circular_dependency(warning) {
                continue;
            }
            warn!(target_name = %target, "{}", diagnostics::summarize(warning));
        }

        let code = bundle
            .assets
            .iter()
            .find_map(|asset| match asset {
                Output::Chunk(chunk) => Some(chunk.code.to_string()),
                _ => None,
            })
            .ok_or_else(|| Error::Bundle {
                target: target.to_string(),
                message: "bundle produced no chunk".to_string(),
            })?;

        Ok(with_banner(config.output.banner.as_deref(), code))
    }
}

fn unknown_plugin_message(name: &str, registry: &PluginRegistry) -> String {
    if registry.is_empty() {
        format!(
            "unknown plugin '{name}': no custom plugins are registered; \
             register it on the engine's PluginRegistry"
        )
    } else {
        format!(
            "unknown plugin '{name}' (registered: {})",
            registry.names().join(", ")
        )
    }
}

/// Map a resolved configuration onto Rolldown options.
pub fn bundler_options(config: &ResolvedConfig) -> BundlerOptions {
    let format = config.output.format;

    BundlerOptions {
        input: Some(vec![InputItem {
            name: None,
            import: config.input.to_string_lossy().into_owned(),
        }]),
        cwd: Some(config.base_dir.clone()),
        format: Some(output_format(format)),
        name: format
            .needs_global_name()
            .then(|| config.output.module_name.clone()),
        external: Some(IsExternal::from(config.external.clone())),
        resolve: Some(ResolveOptions {
            alias: config
                .aliases()
                .filter(|aliases| !aliases.is_empty())
                .map(|aliases| absolute_aliases(aliases.iter(), &config.base_dir)),
            ..Default::default()
        }),
        platform: Some(Platform::Browser),
        ..Default::default()
    }
}

pub fn output_format(format: ModuleFormat) -> OutputFormat {
    match format {
        ModuleFormat::Es => OutputFormat::Esm,
        ModuleFormat::Cjs => OutputFormat::Cjs,
        ModuleFormat::Umd => OutputFormat::Umd,
        ModuleFormat::Iife => OutputFormat::Iife,
    }
}

/// Convert alias targets to absolute paths.
fn absolute_aliases<'a>(
    aliases: impl Iterator<Item = (&'a String, &'a String)>,
    base_dir: &Path,
) -> Vec<(String, Vec<Option<String>>)> {
    aliases
        .map(|(alias, target)| {
            let target_path = Path::new(target);
            let absolute_target = if target_path.is_absolute() {
                target_path.to_path_buf()
            } else {
                base_dir.join(target_path)
            };

            (
                alias.clone(),
                vec![Some(absolute_target.to_string_lossy().into_owned())],
            )
        })
        .collect()
}
