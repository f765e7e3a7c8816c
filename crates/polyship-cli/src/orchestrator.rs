//! Sequential build of the selected targets.
//!
//! Each target is compiled and built before the next one starts. The first
//! failure ends the run: nothing after it is attempted, and whatever was
//! already written stays on disk.

use std::fmt;

use polyship_bundler::{BuildExecutor, BuildResult};
use polyship_config::{BuildContext, ConfigError, TargetSpec, compile};
use thiserror::Error;
use tracing::debug;

/// Phase of a target's build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Build,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Compile => f.write_str("compile"),
            Stage::Build => f.write_str("build"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error(transparent)]
    Compile(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] polyship_bundler::Error),
}

impl TargetError {
    pub fn stage(&self) -> Stage {
        match self {
            TargetError::Compile(_) => Stage::Compile,
            TargetError::Build(_) => Stage::Build,
        }
    }
}

/// The target that stopped a run.
#[derive(Debug, Error)]
#[error("target '{target}' failed during {}: {error}", .error.stage())]
pub struct TargetFailure {
    pub target: String,
    #[source]
    pub error: TargetError,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Every selected target was built.
    Completed(Vec<BuildResult>),
    /// A target failed; `skipped` lists the targets never attempted.
    Aborted {
        completed: Vec<BuildResult>,
        failure: TargetFailure,
        skipped: Vec<String>,
    },
}

impl RunOutcome {
    pub fn completed(&self) -> &[BuildResult] {
        match self {
            RunOutcome::Completed(results) => results,
            RunOutcome::Aborted { completed, .. } => completed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    pub fn into_result(self) -> Result<Vec<BuildResult>, TargetFailure> {
        match self {
            RunOutcome::Completed(results) => Ok(results),
            RunOutcome::Aborted { failure, .. } => Err(failure),
        }
    }
}

/// Receives each artifact as soon as it is written.
pub trait Reporter {
    fn target_built(&self, result: &BuildResult);
}

impl<F> Reporter for F
where
    F: Fn(&BuildResult),
{
    fn target_built(&self, result: &BuildResult) {
        self(result)
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    executor: BuildExecutor,
    context: BuildContext,
}

impl Orchestrator {
    pub fn new(executor: BuildExecutor, context: BuildContext) -> Self {
        Self { executor, context }
    }

    /// Build `targets` in order, halting on the first failure.
    pub async fn run(&self, targets: &[&TargetSpec], reporter: &dyn Reporter) -> RunOutcome {
        let mut completed = Vec::with_capacity(targets.len());

        for (index, spec) in targets.iter().enumerate() {
            debug!(target_name = %spec.name, position = index + 1, total = targets.len(), "starting target");

            match self.build_one(spec).await {
                Ok(result) => {
                    reporter.target_built(&result);
                    completed.push(result);
                }
                Err(error) => {
                    let skipped: Vec<String> =
                        targets[index + 1..].iter().map(|t| t.name.clone()).collect();
                    debug!(
                        target_name = %spec.name,
                        stage = %error.stage(),
                        skipped = skipped.len(),
                        "aborting build"
                    );
                    return RunOutcome::Aborted {
                        completed,
                        failure: TargetFailure {
                            target: spec.name.clone(),
                            error,
                        },
                        skipped,
                    };
                }
            }
        }

        RunOutcome::Completed(completed)
    }

    async fn build_one(&self, spec: &TargetSpec) -> Result<BuildResult, TargetError> {
        let config = compile(spec, &self.context)?;
        Ok(self.executor.execute(&config).await?)
    }
}
