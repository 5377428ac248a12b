//! Repograph CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to a command.

use clap::Parser;
use miette::Result;
use repograph_cli::{cli, commands, error, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let quiet = args.quiet;
    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args, quiet).await,
        cli::Command::Languages => commands::languages_execute(),
    };

    result.map_err(error::cli_error_to_miette)
}
