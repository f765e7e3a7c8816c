//! # polyship-config
//!
//! Targets, project configuration and the config compiler.
//!
//! A [`TargetSpec`] describes one artifact declaratively. [`compile`] turns it,
//! together with the process-wide [`BuildContext`], into a [`ResolvedConfig`]:
//! the ordered transform chain and output descriptor the build executor runs.
//!
//! ```
//! use polyship_config::{compile, BuildContext, ModuleFormat, TargetSpec};
//!
//! let context = BuildContext::new("1.2.3", "/repo").alias("web", "src/web");
//! let target = TargetSpec::new("esm", "web/index.js", "dist/lib.min.js", ModuleFormat::Es);
//!
//! let resolved = compile(&target, &context).unwrap();
//! assert!(resolved.is_production);
//! assert_eq!(resolved.input, std::path::PathBuf::from("/repo/src/web/index.js"));
//! ```

pub mod compile;
pub mod context;
pub mod discovery;
pub mod error;
pub mod project;
pub mod registry;
pub mod resolved;
pub mod target;

pub use compile::{
    NODE_ENV_PLACEHOLDER, VERSION_PLACEHOLDER, compile, is_production_destination, merge_aliases,
    resolve_path,
};
pub use context::BuildContext;
pub use discovery::{ConfigDiscovery, LoadedProject, discover};
pub use error::{ConfigError, Result};
pub use project::{BannerSetting, ProjectConfig, TargetEntry};
pub use registry::TargetRegistry;
pub use resolved::{MacroTable, OutputDescriptor, ResolvedConfig, TransformStep};
pub use target::{EnvironmentMode, ModuleFormat, TargetSpec};
