//! Config compiler: `TargetSpec` + `BuildContext` -> `ResolvedConfig`.
//!
//! Everything here is a pure mapping. Identical inputs always produce an
//! identical configuration, so the whole module is tested without touching
//! the filesystem.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use path_clean::PathClean;
use regex::Regex;
use tracing::debug;

use crate::context::BuildContext;
use crate::error::{ConfigError, Result};
use crate::resolved::{MacroTable, OutputDescriptor, ResolvedConfig, TransformStep};
use crate::target::TargetSpec;

/// Placeholder replaced with the project version.
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Placeholder replaced with the JSON-quoted environment mode.
pub const NODE_ENV_PLACEHOLDER: &str = "process.env.NODE_ENV";

/// `min` or `prod` marker right before the final extension of a file name.
static PRODUCTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[.\-_])(?:min|prod)\.[A-Za-z0-9]+$").expect("production suffix pattern")
});

/// Compile one target into the configuration the build executor consumes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTarget`] when `entry` or `destination` is
/// empty. No other validation happens here; missing files surface later as
/// bundle errors.
pub fn compile(spec: &TargetSpec, context: &BuildContext) -> Result<ResolvedConfig> {
    if spec.entry.trim().is_empty() {
        return Err(ConfigError::InvalidTarget {
            target: spec.name.clone(),
            field: "entry",
        });
    }
    if spec.destination.trim().is_empty() {
        return Err(ConfigError::InvalidTarget {
            target: spec.name.clone(),
            field: "destination",
        });
    }

    let aliases = merge_aliases(&context.aliases, &spec.alias);
    let input = resolve_path(&spec.entry, &aliases, &context.base_dir);
    let destination = resolve_path(&spec.destination, &aliases, &context.base_dir);

    let mut plugins = vec![TransformStep::Alias { entries: aliases }];
    for name in &spec.plugins {
        plugins.push(TransformStep::Custom { name: name.clone() });
    }
    plugins.push(TransformStep::Substitute {
        macros: macro_table(spec, context),
    });
    if spec.transpile {
        plugins.push(TransformStep::Downlevel {
            target: context.downlevel_target.clone(),
        });
    }

    let is_production = is_production_destination(&destination);
    debug!(
        target_name = %spec.name,
        input = %input.display(),
        destination = %destination.display(),
        is_production,
        steps = plugins.len(),
        "compiled target"
    );

    Ok(ResolvedConfig {
        source_name: spec.name.clone(),
        input,
        base_dir: context.base_dir.clone(),
        plugins,
        output: OutputDescriptor {
            destination,
            format: spec.format,
            banner: spec.banner.clone(),
            module_name: spec
                .module_name
                .clone()
                .unwrap_or_else(|| context.module_name.clone()),
        },
        external: spec.external.clone(),
        is_production,
    })
}

/// Merge per-target aliases over the defaults. Overrides win on collision and
/// default keys keep their original position.
pub fn merge_aliases(
    defaults: &IndexMap<String, String>,
    overrides: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut merged = defaults.clone();
    for (prefix, target) in overrides {
        merged.insert(prefix.clone(), target.clone());
    }
    merged
}

/// Resolve a configured path.
///
/// When the first segment names an alias, the alias target replaces it;
/// otherwise the path is taken relative to `base_dir`. Absolute paths pass
/// through untouched.
pub fn resolve_path(path: &str, aliases: &IndexMap<String, String>, base_dir: &Path) -> PathBuf {
    let (head, rest) = path.split_once('/').unwrap_or((path, ""));
    let resolved = match aliases.get(head) {
        Some(target) => absolutize(target, base_dir).join(rest),
        None => absolutize(path, base_dir),
    };
    resolved.clean()
}

fn absolutize(path: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Whether a destination is a production artifact (`x.min.js`, `x.prod.js`).
///
/// Only the file name is inspected; the target's environment mode plays no
/// part.
pub fn is_production_destination(destination: &Path) -> bool {
    destination
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| PRODUCTION_SUFFIX.is_match(name))
}

fn macro_table(spec: &TargetSpec, context: &BuildContext) -> MacroTable {
    let mut macros = MacroTable::new();
    macros.insert(VERSION_PLACEHOLDER, context.version.clone());
    for (flag, enabled) in &context.feature_flags {
        macros.insert(format!("process.env.{flag}"), enabled.to_string());
    }
    if let Some(env) = spec.env {
        macros.insert(NODE_ENV_PLACEHOLDER, format!("\"{}\"", env.as_str()));
    }
    macros
}
