//! Engine plugins.
//!
//! - [`SubstitutePlugin`]: literal macro replacement
//! - [`DownlevelPlugin`]: syntax lowering through oxc
//! - [`PluginRegistry`]: custom plugins looked up by name

pub mod downlevel;
pub mod registry;
pub mod substitute;

pub use downlevel::{DownlevelPlugin, downlevel};
pub use registry::{PluginFactory, PluginRegistry};
pub use substitute::{SubstitutePlugin, Substitution};
