//! File-based config discovery for CLI use
//!
//! Finds the project file, layers environment overrides on top with
//! `figment`, and resolves the version once.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::context::BuildContext;
use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;
use crate::registry::TargetRegistry;

pub const CONFIG_FILE: &str = "polyship.toml";
pub const PACKAGE_FIELD: &str = "polyship";
pub const ENV_PREFIX: &str = "POLYSHIP_";
pub const VERSION_ENV: &str = "VERSION";
const FALLBACK_VERSION: &str = "0.0.0";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use polyship_config::ConfigDiscovery;
///
/// let project = ConfigDiscovery::new(".").load().unwrap();
/// println!("building {} v{}", project.config.name, project.version);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

/// A loaded project: the parsed file plus the values resolved at startup.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub config: ProjectConfig,
    /// Directory the project file was found in.
    pub root: PathBuf,
    /// File the configuration came from.
    pub source: PathBuf,
    pub version: String,
}

impl LoadedProject {
    pub fn context(&self) -> BuildContext {
        self.config.build_context(&self.version, &self.root)
    }

    pub fn registry(&self) -> Result<TargetRegistry> {
        self.config.registry(&self.version, chrono::Local::now().year())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<String>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `polyship.toml`
    /// 2. `package.json` with a `polyship` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the project, taking the version override from `VERSION`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<LoadedProject> {
        self.load_with_version(std::env::var(VERSION_ENV).ok())
    }

    /// Load the project with an explicit version override.
    pub fn load_with_version(&self, version_override: Option<String>) -> Result<LoadedProject> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        let config = self.load_from(&path)?;
        let version = match version_override.filter(|v| !v.trim().is_empty()) {
            Some(version) => version,
            None => self
                .package_version()?
                .or_else(|| config.version.clone())
                .unwrap_or_else(|| FALLBACK_VERSION.to_string()),
        };

        debug!(config = %path.display(), %version, targets = config.targets.len(), "loaded project");

        Ok(LoadedProject {
            config,
            root: self.root.clone(),
            source: path,
            version,
        })
    }

    fn load_from(&self, path: &Path) -> Result<ProjectConfig> {
        let figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Figment::from(Json::file(path)).focus(PACKAGE_FIELD)
        } else {
            Figment::from(Toml::file(path))
        };

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::invalid_value(path.display().to_string(), e))
    }

    fn package_version(&self) -> Result<Option<String>> {
        let pkg_path = self.root.join("package.json");
        if !pkg_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&pkg_path)?;
        let manifest: PackageManifest = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid_value("package.json", e))?;
        Ok(manifest.version)
    }
}

/// Discover and load the project in the current directory.
pub fn discover() -> Result<LoadedProject> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_ignores_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_takes_precedence_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"polyship": {}}"#).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "name = \"x\"\n").unwrap();
        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found.file_name().unwrap(), CONFIG_FILE);
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load_with_version(None);
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }
}
