//! Build command implementation.

use std::time::Instant;

use polyship_bundler::BuildExecutor;
use tracing::debug;

use crate::cli::BuildArgs;
use crate::error::Result;
use crate::orchestrator::{Orchestrator, RunOutcome};
use crate::ui::{self, ConsoleReporter};

/// Execute the build command.
///
/// Builds the selected targets in order and prints a size report for each.
/// The first failing target aborts the run with an error.
pub async fn execute(args: BuildArgs, color: bool) -> Result<()> {
    let start = Instant::now();
    let (cwd, project) = super::load_project(&args.project)?;
    let registry = project.registry()?;
    let targets = registry.select(args.target.as_deref())?;

    debug!(
        project = %project.config.name,
        version = %project.version,
        targets = targets.len(),
        "starting build"
    );

    let orchestrator = Orchestrator::new(BuildExecutor::rolldown(), project.context());
    let reporter = ConsoleReporter::new(cwd, color);

    match orchestrator.run(&targets, &reporter).await {
        RunOutcome::Completed(results) => {
            ui::success(&format!(
                "Built {} target{} in {}",
                results.len(),
                if results.len() == 1 { "" } else { "s" },
                ui::format_duration(start.elapsed())
            ));
            Ok(())
        }
        RunOutcome::Aborted {
            completed,
            failure,
            skipped,
        } => {
            if !skipped.is_empty() {
                ui::warning(&format!(
                    "{} built, {} not attempted: {}",
                    completed.len(),
                    skipped.len(),
                    skipped.join(", ")
                ));
            }
            Err(failure.into())
        }
    }
}
