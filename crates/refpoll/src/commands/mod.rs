//! CLI command implementations.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

pub mod check;
pub mod fetch;
pub mod publish;

/// Writes a JSON response to stdout, followed by a newline.
pub(crate) fn emit<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
