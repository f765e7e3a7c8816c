use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Available polyship commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build every configured target, or the one selected with --target
    ///
    /// Targets are built one after another in declaration order. The first
    /// failing target stops the run.
    Build(BuildArgs),

    /// List target names in build order
    List(ListArgs),

    /// Print the resolved build configuration of a target as JSON
    Inspect(InspectArgs),
}

/// Project location shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root containing polyship.toml or package.json
    ///
    /// Defaults to the current directory.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

impl ProjectArgs {
    /// Project root, falling back to `current` when `--cwd` is absent.
    pub fn root(&self, current: &Path) -> PathBuf {
        match &self.cwd {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current.join(dir),
            None => current.to_path_buf(),
        }
    }
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build only this target
    #[arg(short, long, env = "TARGET", value_name = "NAME")]
    pub target: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Target to inspect
    #[arg(value_name = "NAME")]
    pub target: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}
