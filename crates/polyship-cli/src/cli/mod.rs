//! Command-line interface definitions.

mod commands;


pub use commands::{BuildArgs, Command, InspectArgs, ListArgs, ProjectArgs};

use clap::Parser;

/// polyship - build every distribution flavour of a JavaScript library
#[derive(Parser, Debug)]
#[command(name = "polyship")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
