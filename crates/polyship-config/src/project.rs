//! Project configuration file model.
//!
//! A project file declares the shared metadata (name, author, license), the
//! process-wide substitution inputs (feature flags, default aliases) and the
//! ordered list of targets.
//!
//! ```toml
//! name = "Vue"
//! author = "Evan You"
//! start_year = 2014
//!
//! [aliases]
//! web = "src/platforms/web"
//!
//! [[targets]]
//! name = "web-full-esm"
//! entry = "web/entry-runtime-with-compiler.js"
//! dest = "dist/vue.esm.js"
//! format = "es"
//! banner = true
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::context::{BuildContext, DEFAULT_DOWNLEVEL_TARGET};
use crate::error::Result;
use crate::registry::TargetRegistry;
use crate::target::{EnvironmentMode, ModuleFormat, TargetSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default = "default_license")]
    pub license: String,

    /// First copyright year shown in the banner.
    #[serde(default)]
    pub start_year: Option<i32>,

    /// Fallback version when neither `VERSION` nor `package.json` provide one.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_downlevel_target")]
    pub downlevel_target: String,

    #[serde(default)]
    pub feature_flags: IndexMap<String, bool>,

    #[serde(default)]
    pub aliases: IndexMap<String, String>,

    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            author: None,
            license: default_license(),
            start_year: None,
            version: None,
            base_dir: default_base_dir(),
            downlevel_target: default_downlevel_target(),
            feature_flags: IndexMap::new(),
            aliases: IndexMap::new(),
            targets: Vec::new(),
        }
    }
}

/// A target as written in the project file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    pub name: String,

    #[serde(default)]
    pub entry: String,

    #[serde(default, alias = "destination")]
    pub dest: String,

    #[serde(default)]
    pub format: ModuleFormat,

    #[serde(default)]
    pub env: Option<EnvironmentMode>,

    #[serde(default = "default_true")]
    pub transpile: bool,

    #[serde(default)]
    pub alias: IndexMap<String, String>,

    #[serde(default)]
    pub banner: BannerSetting,

    #[serde(default, alias = "moduleName")]
    pub module_name: Option<String>,

    #[serde(default)]
    pub external: Vec<String>,

    #[serde(default)]
    pub plugins: Vec<String>,
}

/// `banner = true` uses the project banner, a string is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BannerSetting {
    Enabled(bool),
    Text(String),
}

impl Default for BannerSetting {
    fn default() -> Self {
        BannerSetting::Enabled(false)
    }
}

impl ProjectConfig {
    /// Render the standard license banner.
    pub fn banner(&self, version: &str, current_year: i32) -> String {
        let start_year = self.start_year.unwrap_or(current_year);
        let years = if start_year < current_year {
            format!("{start_year}-{current_year}")
        } else {
            current_year.to_string()
        };
        let holder = self
            .author
            .as_deref()
            .map(|author| format!(" {author}"))
            .unwrap_or_default();

        format!(
            "/*!\n * {name} v{version}\n * (c) {years}{holder}\n * Released under the {license}.\n */",
            name = self.name,
            license = self.license,
        )
    }

    /// Build the process-wide context. `root` is the directory holding the
    /// project file; `base_dir` is resolved against it.
    pub fn build_context(&self, version: &str, root: &Path) -> BuildContext {
        let base_dir = if self.base_dir.is_absolute() {
            self.base_dir.clone()
        } else {
            root.join(&self.base_dir).clean()
        };

        BuildContext {
            version: version.to_string(),
            feature_flags: self.feature_flags.clone(),
            aliases: self.aliases.clone(),
            base_dir,
            downlevel_target: self.downlevel_target.clone(),
            module_name: self.name.clone(),
        }
    }

    /// Turn the declared targets into a registry, rendering banners.
    pub fn registry(&self, version: &str, current_year: i32) -> Result<TargetRegistry> {
        let banner = self.banner(version, current_year);
        TargetRegistry::from_targets(self.targets.iter().map(|entry| TargetSpec {
            name: entry.name.clone(),
            entry: entry.entry.clone(),
            destination: entry.dest.clone(),
            format: entry.format,
            env: entry.env,
            transpile: entry.transpile,
            alias: entry.alias.clone(),
            banner: match &entry.banner {
                BannerSetting::Enabled(true) => Some(banner.clone()),
                BannerSetting::Enabled(false) => None,
                BannerSetting::Text(text) => Some(text.clone()),
            },
            module_name: entry.module_name.clone(),
            external: entry.external.clone(),
            plugins: entry.plugins.clone(),
        }))
    }
}

fn default_name() -> String {
    "Bundle".to_string()
}

fn default_license() -> String {
    "MIT License".to_string()
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_downlevel_target() -> String {
    DEFAULT_DOWNLEVEL_TARGET.to_string()
}

fn default_true() -> bool {
    true
}
