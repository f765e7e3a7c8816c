//! Resolved build configuration produced by the config compiler.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::target::ModuleFormat;

/// Literal token replacements applied to every module before downleveling.
///
/// Keys are matched as plain text, so placeholders must not collide with
/// real identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroTable(IndexMap<String, String>);

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placeholder: impl Into<String>, replacement: impl Into<String>) {
        self.0.insert(placeholder.into(), replacement.into());
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.0.get(placeholder).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One step of the engine's plugin chain.
///
/// The compiler appends steps in their required order: alias resolution,
/// extra plugins, macro substitution, then optional downleveling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransformStep {
    /// Module specifier prefix -> replacement path (relative to `base_dir`).
    Alias { entries: IndexMap<String, String> },
    /// Extra engine plugin looked up by name.
    Custom { name: String },
    Substitute { macros: MacroTable },
    /// Lower syntax to the given ECMAScript target (e.g. `es2015`).
    Downlevel { target: String },
}

impl TransformStep {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Alias { .. } => "alias",
            Self::Custom { .. } => "custom",
            Self::Substitute { .. } => "substitute",
            Self::Downlevel { .. } => "downlevel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub destination: PathBuf,
    pub format: ModuleFormat,
    pub banner: Option<String>,
    pub module_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Name of the target this configuration was compiled from.
    pub source_name: String,
    pub input: PathBuf,
    /// Directory the engine resolves alias targets and modules from.
    pub base_dir: PathBuf,
    pub plugins: Vec<TransformStep>,
    pub output: OutputDescriptor,
    pub external: Vec<String>,
    /// Whether the destination name marks a minified production artifact.
    pub is_production: bool,
}

impl ResolvedConfig {
    pub fn aliases(&self) -> Option<&IndexMap<String, String>> {
        self.plugins.iter().find_map(|step| match step {
            TransformStep::Alias { entries } => Some(entries),
            _ => None,
        })
    }

    pub fn macros(&self) -> Option<&MacroTable> {
        self.plugins.iter().find_map(|step| match step {
            TransformStep::Substitute { macros } => Some(macros),
            _ => None,
        })
    }

    pub fn downlevel_target(&self) -> Option<&str> {
        self.plugins.iter().find_map(|step| match step {
            TransformStep::Downlevel { target } => Some(target.as_str()),
            _ => None,
        })
    }

    pub fn custom_plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().filter_map(|step| match step {
            TransformStep::Custom { name } => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
