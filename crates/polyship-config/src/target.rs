//! Declarative build targets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output module format of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// ECMAScript module (default)
    #[default]
    #[serde(alias = "esm")]
    Es,
    /// CommonJS
    Cjs,
    /// Universal module definition (AMD + CommonJS + browser global)
    Umd,
    /// Immediately invoked function expression assigning a browser global
    Iife,
}

impl ModuleFormat {
    /// Whether the format exposes the bundle through a global variable.
    pub fn needs_global_name(self) -> bool {
        matches!(self, Self::Umd | Self::Iife)
    }
}

impl std::fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Es => write!(f, "es"),
            Self::Cjs => write!(f, "cjs"),
            Self::Umd => write!(f, "umd"),
            Self::Iife => write!(f, "iife"),
        }
    }
}

/// Runtime mode baked into a build through `process.env.NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Development,
    Production,
}

impl EnvironmentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// One named artifact to build.
///
/// Targets are immutable once registered. Paths are kept exactly as written
/// in the configuration (alias prefixes included); the config compiler
/// resolves them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSpec {
    pub name: String,
    pub entry: String,
    pub destination: String,
    pub format: ModuleFormat,
    pub env: Option<EnvironmentMode>,
    pub transpile: bool,
    pub alias: IndexMap<String, String>,
    pub banner: Option<String>,
    pub module_name: Option<String>,
    pub external: Vec<String>,
    pub plugins: Vec<String>,
}

impl TargetSpec {
    pub fn new(
        name: impl Into<String>,
        entry: impl Into<String>,
        destination: impl Into<String>,
        format: ModuleFormat,
    ) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            destination: destination.into(),
            format,
            env: None,
            transpile: true,
            alias: IndexMap::new(),
            banner: None,
            module_name: None,
            external: Vec::new(),
            plugins: Vec::new(),
        }
    }

    pub fn env(mut self, env: EnvironmentMode) -> Self {
        self.env = Some(env);
        self
    }

    pub fn transpile(mut self, transpile: bool) -> Self {
        self.transpile = transpile;
        self
    }

    pub fn alias(mut self, prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.alias.insert(prefix.into(), replacement.into());
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    pub fn external(mut self, specifier: impl Into<String>) -> Self {
        self.external.push(specifier.into());
        self
    }

    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }
}
