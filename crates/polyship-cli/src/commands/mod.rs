//! Command implementations.

mod build;
mod inspect;
mod list;

use std::path::PathBuf;

use polyship_config::{ConfigDiscovery, LoadedProject};

use crate::cli::ProjectArgs;
use crate::error::Result;

pub use build::execute as build_execute;
pub use inspect::execute as inspect_execute;
pub use list::execute as list_execute;

/// Locate and load the project a command operates on.
fn load_project(project: &ProjectArgs) -> Result<(PathBuf, LoadedProject)> {
    let cwd = std::env::current_dir()?;
    let root = project.root(&cwd);
    let loaded = ConfigDiscovery::new(&root).load()?;
    Ok((cwd, loaded))
}
