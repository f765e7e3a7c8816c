//! polyship - build every distribution flavour of a JavaScript library.
//!
//! Parses arguments, sets up logging and dispatches to the command.

use clap::Parser;
use miette::Result;
use polyship_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    let color = !args.no_color && ui::should_use_color();

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, color).await,
        cli::Command::List(list_args) => commands::list_execute(list_args),
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args),
    };

    result.map_err(error::cli_error_to_miette)
}
