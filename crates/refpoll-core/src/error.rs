//! Core error types.
//!
//! Variants map onto the failure classes the operations distinguish:
//! configuration errors (bad patterns, missing or empty publish inputs),
//! transport and resolution errors surfaced through [`GitError`], and
//! plain IO failures. Malformed payloads are rejected before an operation
//! starts and never reach this enum. Only the binary entry point turns
//! any of these into a process exit.

use std::path::PathBuf;

use refpoll_git::GitError;
use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// Malformed tag filter pattern.
    #[error("invalid tag filter {pattern:?}: {source}")]
    TagFilter {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// Malformed path glob pattern.
    #[error("invalid path glob {pattern:?}: {source}")]
    PathGlob {
        /// The offending pattern.
        pattern: String,
        /// The underlying glob error.
        source: glob::PatternError,
    },

    /// The tag name file for publish could not be read.
    #[error("tag name file not readable at {path}: {source}")]
    TagFileMissing {
        /// The resolved path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The tag name file for publish is empty.
    #[error("tag name file at {path} is empty")]
    TagFileEmpty {
        /// The resolved path.
        path: PathBuf,
    },

    /// The tag message file for publish could not be read.
    #[error("tag message file not readable at {path}: {source}")]
    TagMessageFileMissing {
        /// The resolved path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
