//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// The remote branch does not exist on origin.
    #[error("branch not found on origin: {0}")]
    BranchNotFound(String),

    /// A commit id that does not parse as an object id.
    #[error("invalid commit id: {0}")]
    InvalidCommitId(String),

    /// A commit or tag reference that does not resolve.
    #[error("reference not found: {0}")]
    RefNotFound(String),

    /// Tag creation refused because the name is taken.
    #[error("tag already exists: {0}")]
    TagExists(String),

    /// A tag whose target cannot be dereferenced to a commit.
    #[error("tag does not point at a commit: {0}")]
    NotACommit(String),

    /// Clone, fetch or push failure against the remote.
    #[error("transport failure talking to {remote}: {source}")]
    Transport {
        /// The remote URL the operation was talking to.
        remote: String,
        /// The underlying libgit2 error.
        source: git2::Error,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_invalid_commit_id_display() {
        let err = GitError::InvalidCommitId("zzzz".to_string());
        assert_eq!(err.to_string(), "invalid commit id: zzzz");
    }

    #[test]
    fn test_tag_exists_display() {
        let err = GitError::TagExists("v1.0.0".to_string());
        assert_eq!(err.to_string(), "tag already exists: v1.0.0");
    }

    #[test]
    fn test_error_is_debug() {
        let err = GitError::RefNotFound("v9".to_string());
        let debug = format!("{err:?}");
        assert!(debug.contains("RefNotFound"));
    }
}
