//! The check algorithm: slicing an ordered history at the last known
//! version.

use refpoll_config::{Source, Version};
use refpoll_git::Repository;
use regex::Regex;
use tracing::debug;

use crate::pathspec::PathFilter;
use crate::{CoreError, CoreResult};

/// Computes the versions produced since a previously observed one.
///
/// Tag mode and commit mode are mutually exclusive: a configured tag
/// filter selects tag mode and path globs are ignored.
pub struct Reconciler {
    tag_filter: Option<Regex>,
    path_filter: PathFilter,
}

impl Reconciler {
    /// Compiles the filters from the source configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TagFilter`] or [`CoreError::PathGlob`] for
    /// malformed patterns.
    pub fn from_source(source: &Source) -> CoreResult<Self> {
        let tag_filter = match source.tag_regex.as_deref().filter(|re| !re.is_empty()) {
            Some(pattern) => Some(Regex::new(pattern).map_err(|err| CoreError::TagFilter {
                pattern: pattern.to_string(),
                source: err,
            })?),
            None => None,
        };
        let path_filter = if tag_filter.is_some() {
            PathFilter::empty()
        } else {
            PathFilter::new(&source.paths)?
        };
        Ok(Self {
            tag_filter,
            path_filter,
        })
    }

    /// Returns the qualifying versions, oldest first, re-confirming the
    /// previous version as the first element when it is still resolvable.
    ///
    /// With no baseline, or when the previous version no longer appears in
    /// the walked history (a rewritten branch, say), the result collapses
    /// to the single most recent qualifying version; the full backlog is
    /// never dumped. No qualifying version at all yields an empty list,
    /// not an error.
    pub fn check(
        &self,
        repo: &Repository,
        previous: Option<&Version>,
    ) -> CoreResult<Vec<Version>> {
        match &self.tag_filter {
            Some(filter) => self.check_tags(repo, filter, previous),
            None => self.check_commits(repo, previous),
        }
    }

    fn check_tags(
        &self,
        repo: &Repository,
        filter: &Regex,
        previous: Option<&Version>,
    ) -> CoreResult<Vec<Version>> {
        let names: Vec<String> = repo
            .tags()
            .list()?
            .into_iter()
            .filter(|name| filter.is_match(name))
            .collect();
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let start = previous
            .and_then(|prev| names.iter().position(|name| *name == prev.reference))
            .unwrap_or(names.len() - 1);
        debug!(total = names.len(), start, "sliced tag history");
        Ok(names.into_iter().skip(start).map(Version::new).collect())
    }

    fn check_commits(
        &self,
        repo: &Repository,
        previous: Option<&Version>,
    ) -> CoreResult<Vec<Version>> {
        let mut versions = Vec::new();
        let mut reached_previous = false;

        // Commits arrive children-first; collect until the baseline, then
        // flip to oldest-first.
        for commit in repo.commits().list()? {
            if !self.path_filter.is_empty() && !self.path_filter.matches_any(&commit.files) {
                continue;
            }
            let is_previous = previous.is_some_and(|prev| prev.reference == commit.id);
            versions.push(Version::new(commit.id));
            if is_previous {
                reached_previous = true;
                break;
            }
        }

        if versions.is_empty() {
            return Ok(Vec::new());
        }
        if !reached_previous {
            versions.truncate(1);
        }
        versions.reverse();
        debug!(count = versions.len(), "sliced commit history");
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{commit_file_at, init_repo, open_handle, tag_lightweight};

    fn source_with_paths(paths: &[&str]) -> Source {
        Source {
            paths: paths.iter().map(ToString::to_string).collect(),
            ..Source::default()
        }
    }

    fn source_with_tag_regex(pattern: &str) -> Source {
        Source {
            tag_regex: Some(pattern.to_string()),
            ..Source::default()
        }
    }

    fn refs(versions: &[Version]) -> Vec<&str> {
        versions.iter().map(|v| v.reference.as_str()).collect()
    }

    #[test]
    fn test_commits_since_previous_inclusive() {
        let (dir, repo) = init_repo();
        let c1 = commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);
        let c3 = commit_file_at(&repo, "a.txt", "3", "c3", 3_000);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&Source::default()).unwrap();
        let previous = Version::new(c1.to_string());
        let versions = reconciler.check(&handle, Some(&previous)).unwrap();

        assert_eq!(
            refs(&versions),
            vec![c1.to_string(), c2.to_string(), c3.to_string()]
        );
    }

    #[test]
    fn test_previous_is_latest_yields_single_element() {
        let (dir, repo) = init_repo();
        commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&Source::default()).unwrap();
        let previous = Version::new(c2.to_string());
        let versions = reconciler.check(&handle, Some(&previous)).unwrap();

        assert_eq!(refs(&versions), vec![c2.to_string()]);
    }

    #[test]
    fn test_first_check_collapses_to_latest() {
        let (dir, repo) = init_repo();
        commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&Source::default()).unwrap();
        let versions = reconciler.check(&handle, None).unwrap();

        assert_eq!(refs(&versions), vec![c2.to_string()]);
    }

    #[test]
    fn test_unresolvable_previous_collapses_to_latest() {
        let (dir, repo) = init_repo();
        commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&Source::default()).unwrap();
        let previous = Version::new("0".repeat(40));
        let versions = reconciler.check(&handle, Some(&previous)).unwrap();

        assert_eq!(refs(&versions), vec![c2.to_string()]);
    }

    #[test]
    fn test_path_filter_skips_untouched_commits() {
        let (dir, repo) = init_repo();
        let c1 = commit_file_at(&repo, "src/lib.rs", "1", "c1", 1_000);
        commit_file_at(&repo, "docs/readme.md", "docs", "c2", 2_000);
        let c3 = commit_file_at(&repo, "src/main.rs", "3", "c3", 3_000);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&source_with_paths(&["src/**"])).unwrap();
        let previous = Version::new(c1.to_string());
        let versions = reconciler.check(&handle, Some(&previous)).unwrap();

        assert_eq!(refs(&versions), vec![c1.to_string(), c3.to_string()]);
    }

    #[test]
    fn test_tag_mode_since_previous_inclusive() {
        let (dir, repo) = init_repo();
        let c1 = commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);
        tag_lightweight(&repo, "v1", c1);
        tag_lightweight(&repo, "v2", c2);
        tag_lightweight(&repo, "experimental", c2);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&source_with_tag_regex("^v")).unwrap();
        let previous = Version::new("v1");
        let versions = reconciler.check(&handle, Some(&previous)).unwrap();

        assert_eq!(refs(&versions), vec!["v1", "v2"]);
    }

    #[test]
    fn test_tag_mode_first_check_collapses_to_latest() {
        let (dir, repo) = init_repo();
        let c1 = commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        let c2 = commit_file_at(&repo, "a.txt", "2", "c2", 2_000);
        tag_lightweight(&repo, "v1", c1);
        tag_lightweight(&repo, "v2", c2);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&source_with_tag_regex("^v")).unwrap();
        let versions = reconciler.check(&handle, None).unwrap();

        assert_eq!(refs(&versions), vec!["v2"]);
    }

    #[test]
    fn test_no_qualifying_tags_is_empty_not_error() {
        let (dir, repo) = init_repo();
        let c1 = commit_file_at(&repo, "a.txt", "1", "c1", 1_000);
        tag_lightweight(&repo, "experimental", c1);

        let handle = open_handle(&dir);
        let reconciler = Reconciler::from_source(&source_with_tag_regex("^v")).unwrap();
        let versions = reconciler.check(&handle, None).unwrap();

        assert!(versions.is_empty());
    }

    #[test]
    fn test_malformed_tag_filter_is_config_error() {
        let result = Reconciler::from_source(&source_with_tag_regex("["));
        assert!(matches!(result, Err(CoreError::TagFilter { .. })));
    }
}
