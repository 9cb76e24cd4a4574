//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Poll, materialize and publish versions of a remote Git repository.
#[derive(Debug, Parser)]
#[command(name = "refpoll")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enumerate versions produced since the previously observed one
    Check,

    /// Materialize a version into a destination directory
    Fetch(commands::fetch::FetchArgs),

    /// Mint a tag from a working directory and push it to the remote
    Publish(commands::publish::PublishArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Check => commands::check::run(),
            Commands::Fetch(args) => commands::fetch::run(args),
            Commands::Publish(args) => commands::publish::run(args),
        }
    }
}
