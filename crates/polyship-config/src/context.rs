//! Process-wide build inputs.

use std::path::PathBuf;

use indexmap::IndexMap;

pub const DEFAULT_DOWNLEVEL_TARGET: &str = "es2015";

/// Values read once at startup and handed to every `compile` call.
///
/// Nothing in the pipeline reads the environment or the project files after
/// this is built.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildContext {
    pub version: String,
    pub feature_flags: IndexMap<String, bool>,
    /// Default alias table; per-target overrides are merged on top.
    pub aliases: IndexMap<String, String>,
    /// Directory relative paths and alias targets are resolved against.
    pub base_dir: PathBuf,
    pub downlevel_target: String,
    /// Global name used by `umd`/`iife` targets without their own.
    pub module_name: String,
}

impl BuildContext {
    pub fn new(version: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            version: version.into(),
            feature_flags: IndexMap::new(),
            aliases: IndexMap::new(),
            base_dir: base_dir.into(),
            downlevel_target: DEFAULT_DOWNLEVEL_TARGET.to_string(),
            module_name: "Bundle".to_string(),
        }
    }

    pub fn feature_flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.feature_flags.insert(name.into(), enabled);
        self
    }

    pub fn alias(mut self, prefix: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(prefix.into(), target.into());
        self
    }

    pub fn downlevel_target(mut self, target: impl Into<String>) -> Self {
        self.downlevel_target = target.into();
        self
    }

    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }
}
