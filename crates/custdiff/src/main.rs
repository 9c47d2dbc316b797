//! custdiff command-line entry point

mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use commands::RunOptions;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    logging::init(cli.verbose).context("Failed to initialize logging")?;

    let options = RunOptions::new(cli.dry_run, cli.config.as_deref(), cli.no_config);

    commands::Reconcile::execute(&cli.args, &options).context("Failed to reconcile trees")?;

    Ok(())
}
