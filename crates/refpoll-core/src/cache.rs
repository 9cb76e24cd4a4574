//! Deterministic per-remote cache paths.
//!
//! Repeated checks against the same remote reuse one on-disk clone instead
//! of recloning. The orchestrator is responsible for serializing access to
//! a given cache path; nothing here locks it.

use std::path::PathBuf;

/// Returns the cache directory for a remote URL, one directory per remote,
/// under the system temporary directory.
#[must_use]
pub fn cache_dir(remote_url: &str) -> PathBuf {
    std::env::temp_dir()
        .join("refpoll-cache")
        .join(sanitize(remote_url))
}

fn sanitize(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
