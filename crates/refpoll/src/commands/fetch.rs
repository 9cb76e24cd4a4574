//! Fetch command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use refpoll_config::FetchPayload;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Directory to materialize the requested version into
    pub destination: PathBuf,
}

/// Checks the requested version out into the destination directory and
/// reports its metadata on stdout.
pub fn run(args: FetchArgs) -> Result<()> {
    let payload: FetchPayload = refpoll_config::payload_from_reader(io::stdin().lock())
        .context("reading fetch payload from stdin")?;

    let response = refpoll_core::fetch(&payload.source, &payload.version, &args.destination)?;

    super::emit(&response)
}
