//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;

/// Print target names in build order, one per line.
pub fn execute(args: ListArgs) -> Result<()> {
    let (_, project) = super::load_project(&args.project)?;
    let registry = project.registry()?;

    for target in registry.list_all() {
        println!("{}", target.name);
    }
    Ok(())
}
