//! Check command.

use std::io;

use anyhow::{Context, Result};
use refpoll_config::CheckPayload;
use tracing::info;

/// Reads the check payload from stdin and reports new versions on stdout.
pub fn run() -> Result<()> {
    let payload: CheckPayload = refpoll_config::payload_from_reader(io::stdin().lock())
        .context("reading check payload from stdin")?;

    info!(remote = %payload.source.url, "checking for new versions");
    let versions = refpoll_core::check(&payload.source, payload.version.as_ref())?;

    super::emit(&versions)
}
