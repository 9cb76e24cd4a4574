//! Refpoll CLI - version-control resource plugin for pipeline
//! orchestrators.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> Result<()> {
    // Initialize logging on stderr; stdout carries the response envelope.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments and run
    let cli = cli::Cli::parse();
    cli.run()
}
