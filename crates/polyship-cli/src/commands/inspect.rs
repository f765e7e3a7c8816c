//! Inspect command implementation.

use polyship_config::compile;

use crate::cli::InspectArgs;
use crate::error::{CliError, Result};

/// Compile one target and print its resolved configuration as JSON.
///
/// Nothing is bundled or written.
pub fn execute(args: InspectArgs) -> Result<()> {
    let (_, project) = super::load_project(&args.project)?;
    let registry = project.registry()?;
    let target = registry.get(&args.target)?;

    let resolved = compile(target, &project.context())?;
    let json = resolved
        .to_json()
        .map_err(|e| CliError::Serialize(e.to_string()))?;
    println!("{json}");
    Ok(())
}
