//! Topological commit walking with per-commit changed-file sets.

use crate::commit::Commit;
use crate::repository::Repository;
use crate::GitResult;

/// Walks the commits reachable from HEAD in topological order.
///
/// A commit is never emitted after any of its ancestors: parents follow
/// children in the walk. Each call re-walks the full reachable history; the
/// walk is restartable but not incremental.
pub struct CommitWalker<'repo> {
    repo: &'repo Repository,
}

impl<'repo> CommitWalker<'repo> {
    pub(crate) fn new(repo: &'repo Repository) -> Self {
        Self { repo }
    }

    /// Lists every commit reachable from HEAD, children before parents,
    /// with its changed-file set.
    ///
    /// The per-commit diff against the first parent is the expensive step
    /// and dominates latency on large histories.
    pub fn list(&self) -> GitResult<Vec<Commit>> {
        let raw = self.repo.raw();
        let mut walk = raw.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL)?;
        walk.push_head()?;

        let mut commits = Vec::new();
        for oid in walk {
            let oid = oid?;
            let commit = raw.find_commit(oid)?;
            let mut snapshot = Commit::from_git(&commit);
            snapshot.files = self.changed_files(&commit)?;
            commits.push(snapshot);
        }
        Ok(commits)
    }

    /// Computes the paths touched by a commit.
    ///
    /// A root commit contributes every blob path in its tree. Otherwise the
    /// commit's tree is diffed against its first parent only; additional
    /// parents of merge commits are ignored.
    fn changed_files(&self, commit: &git2::Commit<'_>) -> GitResult<Vec<String>> {
        let tree = commit.tree()?;
        let mut files = Vec::new();

        if commit.parent_count() == 0 {
            tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
                if entry.kind() == Some(git2::ObjectType::Blob) {
                    files.push(format!("{root}{}", entry.name().unwrap_or("")));
                }
                git2::TreeWalkResult::Ok
            })?;
            return Ok(files);
        }

        let parent = commit.parent(0)?;
        let parent_tree = parent.tree()?;
        let diff = self
            .repo
            .raw()
            .diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path() {
                files.push(path.to_string_lossy().into_owned());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryParams;
    use crate::testutil::{commit_file, init_repo};

    #[test]
    fn test_list_is_children_before_parents() {
        let (dir, repo) = init_repo();
        let c1 = commit_file(&repo, "a.txt", "a", "c1");
        let c2 = commit_file(&repo, "b.txt", "b", "c2");
        let c3 = commit_file(&repo, "c.txt", "c", "c3");

        let handle = Repository::open(dir.path(), None, RepositoryParams::default()).unwrap();
        let commits = handle.commits().list().unwrap();

        let ids: Vec<String> = commits.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![c3.to_string(), c2.to_string(), c1.to_string()]);
    }

    #[test]
    fn test_no_commit_precedes_an_ancestor() {
        let (dir, repo) = init_repo();
        for i in 0..6 {
            commit_file(&repo, "a.txt", &format!("rev {i}"), &format!("c{i}"));
        }

        let handle = Repository::open(dir.path(), None, RepositoryParams::default()).unwrap();
        let commits = handle.commits().list().unwrap();

        // With a linear history every commit's parent must appear later.
        for window in commits.windows(2) {
            let child = handle.raw().revparse_single(&window[0].id).unwrap();
            let child = child.as_commit().unwrap();
            assert_eq!(child.parent_id(0).unwrap().to_string(), window[1].id);
        }
    }

    #[test]
    fn test_root_commit_lists_full_tree() {
        let (dir, repo) = init_repo();
        commit_file(&repo, "src/main.rs", "fn main() {}", "c1");

        let handle = Repository::open(dir.path(), None, RepositoryParams::default()).unwrap();
        let commits = handle.commits().list().unwrap();

        let root = commits.last().unwrap();
        assert_eq!(root.files, vec!["src/main.rs".to_string()]);
    }

    #[test]
    fn test_changed_files_is_first_parent_diff() {
        let (dir, repo) = init_repo();
        commit_file(&repo, "a.txt", "a", "c1");
        commit_file(&repo, "docs/readme.md", "docs", "c2");
        commit_file(&repo, "src/main.rs", "fn main() {}", "c3");

        let handle = Repository::open(dir.path(), None, RepositoryParams::default()).unwrap();
        let commits = handle.commits().list().unwrap();

        assert_eq!(commits[0].files, vec!["src/main.rs".to_string()]);
        assert_eq!(commits[1].files, vec!["docs/readme.md".to_string()]);
    }
}
