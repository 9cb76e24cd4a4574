//! Publish command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use refpoll_config::PublishPayload;

/// Arguments for the publish command.
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Working directory holding the repository and tag files
    pub workdir: PathBuf,
}

/// Mints a tag from the working directory, pushes it to the remote, and
/// reports the tagged commit on stdout.
pub fn run(args: PublishArgs) -> Result<()> {
    let payload: PublishPayload = refpoll_config::payload_from_reader(io::stdin().lock())
        .context("reading publish payload from stdin")?;

    let response = refpoll_core::publish(&payload.source, &payload.params, &args.workdir)?;

    super::emit(&response)
}
