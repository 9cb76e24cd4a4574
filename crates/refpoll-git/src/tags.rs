//! Tag enumeration ordered by effective timestamp.

use tracing::trace;

use crate::repository::Repository;
use crate::{GitError, GitResult};

/// A tag resolved to its underlying commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagEntry {
    pub(crate) name: String,
    pub(crate) commit_id: String,
    /// Effective timestamp in seconds: the tagger time for annotated tags
    /// when present, else the target commit's committer time.
    pub(crate) when: i64,
}

/// Enumerates tags in ascending chronological order.
///
/// Callers walk the list until they reach the previously seen version, so
/// the contract is oldest first. Committer and tagger clocks have
/// second-level granularity and concurrent tag pushes commonly collide;
/// colliding timestamps are disambiguated by lexical tag name and then
/// nudged forward so the emitted order is strictly total and stable across
/// repeated calls on unchanged input.
pub struct TagCatalog<'repo> {
    repo: &'repo Repository,
}

impl<'repo> TagCatalog<'repo> {
    pub(crate) fn new(repo: &'repo Repository) -> Self {
        Self { repo }
    }

    /// Lists all tag names, oldest effective timestamp first.
    pub fn list(&self) -> GitResult<Vec<String>> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| a.when.cmp(&b.when).then_with(|| a.name.cmp(&b.name)));

        let mut last = i64::MIN;
        for entry in &mut entries {
            if entry.when <= last {
                entry.when = last + 1;
            }
            last = entry.when;
            trace!(tag = %entry.name, commit = %entry.commit_id, when = entry.when, "tag entry");
        }

        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    fn entries(&self) -> GitResult<Vec<TagEntry>> {
        let raw = self.repo.raw();
        let mut entries = Vec::new();

        for reference in raw.references()? {
            let reference = reference?;
            if !reference.is_tag() {
                continue;
            }
            let Some(full_name) = reference.name() else {
                continue;
            };
            let name = full_name.trim_start_matches("refs/tags/").to_string();
            let target = reference
                .target()
                .ok_or_else(|| GitError::RefNotFound(name.clone()))?;
            let object = raw.find_object(target, None)?;

            let entry = match object.as_tag() {
                Some(tag) => {
                    let commit = tag
                        .target()?
                        .peel(git2::ObjectType::Commit)
                        .map_err(|_| GitError::NotACommit(name.clone()))?
                        .into_commit()
                        .map_err(|_| GitError::NotACommit(name.clone()))?;
                    let when = tag
                        .tagger()
                        .map_or_else(|| commit.committer().when().seconds(), |t| t.when().seconds());
                    TagEntry {
                        name,
                        commit_id: commit.id().to_string(),
                        when,
                    }
                }
                None => {
                    let commit = object
                        .peel(git2::ObjectType::Commit)
                        .map_err(|_| GitError::NotACommit(name.clone()))?
                        .into_commit()
                        .map_err(|_| GitError::NotACommit(name.clone()))?;
                    TagEntry {
                        when: commit.committer().when().seconds(),
                        commit_id: commit.id().to_string(),
                        name,
                    }
                }
            };
            entries.push(entry);
        }

        Ok(entries)
    }
}
