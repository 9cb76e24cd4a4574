//! Git repository wrapper.
//!
//! One [`Repository`] owns one on-disk working copy bound to one remote.
//! Dropping it releases every underlying libgit2 handle, on success and
//! error paths alike.

use std::path::Path;

use tracing::{debug, info};

use crate::commit::{Commit, Signature};
use crate::tags::TagCatalog;
use crate::walker::CommitWalker;
use crate::{GitError, GitResult};

/// The branch used when the source does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Connection parameters for a remote.
///
/// Exactly one credential scheme is active per repository; the SSH key wins
/// when both are configured.
#[derive(Debug, Clone, Default)]
pub struct RepositoryParams {
    /// The remote URL.
    pub url: String,

    /// HTTP basic-auth login, replacing whatever username the transport
    /// proposes.
    pub http_login: Option<String>,

    /// HTTP basic-auth password.
    pub http_password: Option<String>,

    /// SSH private key material (PEM text), consumed in memory.
    pub ssh_private_key: Option<String>,
}

/// A Git repository wrapper bound to one local path and one remote.
pub struct Repository {
    inner: git2::Repository,
    params: RepositoryParams,
    branch: String,
}

impl Repository {
    /// Opens an existing repository at the given path without touching the
    /// remote.
    ///
    /// When `branch` is `None` the repository's current local branch is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if the path is not a valid Git
    /// repository.
    pub fn open(
        path: impl AsRef<Path>,
        branch: Option<&str>,
        params: RepositoryParams,
    ) -> GitResult<Self> {
        let path = path.as_ref();
        let inner =
            git2::Repository::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => current_branch(&inner)?,
        };
        Ok(Self {
            inner,
            params,
            branch,
        })
    }

    /// Clones the remote into `path`, checking out `branch` directly.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Transport`] if the clone fails.
    pub fn clone(
        path: impl AsRef<Path>,
        branch: Option<&str>,
        params: RepositoryParams,
    ) -> GitResult<Self> {
        let branch = branch.unwrap_or(DEFAULT_BRANCH).to_string();
        info!(remote = %params.url, branch = %branch, "cloning repository");

        // The builder borrows `params` through its fetch options; scope it
        // so the borrow ends before `params` moves into the handle.
        let inner = {
            let mut builder = git2::build::RepoBuilder::new();
            builder
                .branch(&branch)
                .fetch_options(make_fetch_options(&params));
            builder.clone(&params.url, path.as_ref())
        }
        .map_err(|source| GitError::Transport {
            remote: params.url.clone(),
            source,
        })?;

        Ok(Self {
            inner,
            params,
            branch,
        })
    }

    /// Opens the repository at `path` and resynchronizes it with the
    /// remote, or clones it there if the path holds no repository yet.
    ///
    /// Resynchronization is destructive: when the local HEAD differs from
    /// the remote branch tip the working tree is hard-reset to the tip,
    /// discarding local modifications. It is idempotent, not a merge.
    pub fn open_or_clone(
        path: impl AsRef<Path>,
        branch: Option<&str>,
        params: RepositoryParams,
    ) -> GitResult<Self> {
        let path = path.as_ref();
        match Self::open(path, branch, params.clone()) {
            Ok(repo) => {
                repo.resync()?;
                Ok(repo)
            }
            Err(GitError::NotARepo(_)) => Self::clone(path, branch, params),
            Err(err) => Err(err),
        }
    }

    /// Fetches all refs and tags from origin and hard-resets the working
    /// tree to the remote branch tip when the local HEAD has drifted.
    pub fn resync(&self) -> GitResult<()> {
        let mut remote = self.inner.find_remote("origin")?;
        remote
            .fetch(
                &[] as &[&str],
                Some(&mut make_fetch_options(&self.params)),
                None,
            )
            .map_err(|source| GitError::Transport {
                remote: self.params.url.clone(),
                source,
            })?;
        drop(remote);

        let remote_ref = self
            .inner
            .find_reference(&format!("refs/remotes/origin/{}", self.branch))
            .map_err(|_| GitError::BranchNotFound(self.branch.clone()))?;
        let remote_target = remote_ref
            .target()
            .ok_or_else(|| GitError::BranchNotFound(self.branch.clone()))?;

        let head = self.inner.head()?;
        if head.target() == Some(remote_target) {
            return Ok(());
        }

        debug!(tip = %remote_target, "resetting working tree to remote tip");
        let commit = self.inner.find_commit(remote_target)?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();
        self.inner
            .reset(commit.as_object(), git2::ResetType::Hard, Some(&mut checkout))?;
        Ok(())
    }

    /// Detaches HEAD to the given commit id and force-checks-out the
    /// working tree.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidCommitId`] if `id` does not parse as an
    /// object id and [`GitError::RefNotFound`] if no such commit exists.
    pub fn checkout_commit(&self, id: &str) -> GitResult<Commit> {
        let oid = git2::Oid::from_str(id).map_err(|_| GitError::InvalidCommitId(id.to_string()))?;
        let commit = self
            .inner
            .find_commit(oid)
            .map_err(|_| GitError::RefNotFound(id.to_string()))?;
        self.checkout_detached(&commit)?;
        Ok(Commit::from_git(&commit))
    }

    /// Resolves a tag by short-name lookup, dereferences annotated tags to
    /// their target commit, and performs the same detached force-checkout
    /// as [`Repository::checkout_commit`].
    pub fn checkout_tag(&self, name: &str) -> GitResult<Commit> {
        let reference = self
            .inner
            .resolve_reference_from_short_name(name)
            .map_err(|_| GitError::RefNotFound(name.to_string()))?;
        let commit = reference
            .peel_to_commit()
            .map_err(|_| GitError::NotACommit(name.to_string()))?;
        self.checkout_detached(&commit)?;

        let mut snapshot = Commit::from_git(&commit);
        snapshot.tag = Some(name.to_string());
        if let Ok(object) = reference.peel(git2::ObjectType::Tag)
            && let Some(tag) = object.as_tag()
        {
            snapshot.tagger = tag.tagger().map(|sig| Signature::from_git(&sig));
        }
        Ok(snapshot)
    }

    /// Returns the commit HEAD currently points at.
    pub fn head_commit(&self) -> GitResult<Commit> {
        let head = self.inner.head()?;
        let commit = head.peel_to_commit()?;
        Ok(Commit::from_git(&commit))
    }

    /// Tags the current HEAD.
    ///
    /// An empty `message` creates a lightweight tag; otherwise an annotated
    /// tag is created with a fixed synthetic tagger identity and the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagExists`] if the name is already taken.
    pub fn create_tag(&self, name: &str, message: &str) -> GitResult<Commit> {
        let head = self.inner.head()?;
        let commit = head.peel_to_commit()?;
        let mut snapshot = Commit::from_git(&commit);
        snapshot.tag = Some(name.to_string());

        if message.is_empty() {
            self.inner
                .tag_lightweight(name, commit.as_object(), false)
                .map_err(|err| tag_error(name, err))?;
        } else {
            let tagger = git2::Signature::now("git", "git@localhost")?;
            self.inner
                .tag(name, commit.as_object(), &tagger, message, false)
                .map_err(|err| tag_error(name, err))?;
            snapshot.tagger = Some(Signature::from_git(&tagger));
        }

        info!(tag = %name, commit = %snapshot.id, "created tag");
        Ok(snapshot)
    }

    /// Pushes `refs/tags/<name>` to origin.
    ///
    /// Failures are never retried here; the caller's retry policy is the
    /// only recovery path.
    pub fn push_tag(&self, name: &str) -> GitResult<()> {
        let mut remote = self.inner.find_remote("origin")?;
        let mut options = git2::PushOptions::new();
        options.remote_callbacks(make_callbacks(&self.params));
        let refspec = format!("refs/tags/{name}");
        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .map_err(|source| GitError::Transport {
                remote: self.params.url.clone(),
                source,
            })?;
        info!(tag = %name, remote = %self.params.url, "pushed tag");
        Ok(())
    }

    /// Returns a walker over the commits reachable from HEAD.
    #[must_use]
    pub fn commits(&self) -> CommitWalker<'_> {
        CommitWalker::new(self)
    }

    /// Returns the catalog of tags in this repository.
    #[must_use]
    pub fn tags(&self) -> TagCatalog<'_> {
        TagCatalog::new(self)
    }

    /// The branch this repository tracks.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub(crate) fn raw(&self) -> &git2::Repository {
        &self.inner
    }

    fn checkout_detached(&self, commit: &git2::Commit<'_>) -> GitResult<()> {
        self.inner.set_head_detached(commit.id())?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();
        self.inner.checkout_head(Some(&mut checkout))?;
        Ok(())
    }
}

fn tag_error(name: &str, err: git2::Error) -> GitError {
    if err.code() == git2::ErrorCode::Exists {
        GitError::TagExists(name.to_string())
    } else {
        GitError::Git2(err)
    }
}

fn current_branch(repo: &git2::Repository) -> GitResult<String> {
    let head = repo.head()?;
    if head.is_branch()
        && let Some(name) = head.shorthand()
    {
        return Ok(name.to_string());
    }

    // Detached HEAD: fall back to the first local branch.
    let mut branches = repo.branches(Some(git2::BranchType::Local))?;
    match branches.next() {
        Some(branch) => {
            let (branch, _) = branch?;
            Ok(branch.name()?.unwrap_or(DEFAULT_BRANCH).to_string())
        }
        None => Ok(DEFAULT_BRANCH.to_string()),
    }
}

fn make_callbacks(params: &RepositoryParams) -> git2::RemoteCallbacks<'_> {
    let mut callbacks = git2::RemoteCallbacks::new();

    // The configured remote is trusted implicitly; certificate and host key
    // checks are bypassed.
    callbacks.certificate_check(|_cert, _host| Ok(git2::CertificateCheckStatus::CertificateOk));

    if let Some(key) = params.ssh_private_key.as_deref() {
        callbacks.credentials(move |_url, username_from_url, _allowed| {
            let username = username_from_url.unwrap_or("git");
            git2::Cred::ssh_key_from_memory(username, None, key, None)
        });
    } else {
        let login = params.http_login.as_deref();
        let password = params.http_password.as_deref().unwrap_or("");
        callbacks.credentials(move |_url, username_from_url, _allowed| {
            let username = login.or(username_from_url).unwrap_or("");
            git2::Cred::userpass_plaintext(username, password)
        });
    }

    callbacks
}

fn make_fetch_options(params: &RepositoryParams) -> git2::FetchOptions<'_> {
    let mut options = git2::FetchOptions::new();
    options.prune(git2::FetchPrune::Unspecified);
    options.download_tags(git2::AutotagOption::All);
    options.remote_callbacks(make_callbacks(params));
    options
}
