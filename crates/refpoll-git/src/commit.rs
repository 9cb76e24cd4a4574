//! Commit metadata as retrieved from a repository.

use chrono::{DateTime, TimeZone, Utc};

/// An identity attached to a commit or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// The name of the signer.
    pub name: String,

    /// The email of the signer.
    pub email: String,

    /// When the signature was made.
    pub when: DateTime<Utc>,
}

impl Signature {
    pub(crate) fn from_git(sig: &git2::Signature<'_>) -> Self {
        Self {
            name: sig.name().unwrap_or("").to_string(),
            email: sig.email().unwrap_or("").to_string(),
            when: Utc
                .timestamp_opt(sig.when().seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

/// An immutable snapshot of one commit.
///
/// Produced by [`crate::Repository`] and [`crate::CommitWalker`]; never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit id (40-hex content hash).
    pub id: String,

    /// The tag this commit was reached through, when any.
    pub tag: Option<String>,

    /// Paths changed by this commit, relative to the repository root.
    pub files: Vec<String>,

    /// The full commit message.
    pub message: String,

    /// The author identity.
    pub author: Signature,

    /// The committer identity.
    pub committer: Signature,

    /// The tagger identity for annotated tags.
    pub tagger: Option<Signature>,
}

impl Commit {
    pub(crate) fn from_git(commit: &git2::Commit<'_>) -> Self {
        Self {
            id: commit.id().to_string(),
            tag: None,
            files: Vec::new(),
            message: commit.message().unwrap_or("").to_string(),
            author: Signature::from_git(&commit.author()),
            committer: Signature::from_git(&commit.committer()),
            tagger: None,
        }
    }
}
