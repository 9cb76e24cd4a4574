//! The three resource operations.
//!
//! Single-threaded, blocking throughout: clone, fetch and push run to
//! completion on the calling thread. One repository handle is active per
//! operation and is released when it goes out of scope.

use std::fs;
use std::path::Path;

use refpoll_config::{OpResponse, PublishParams, Source, Version};
use refpoll_git::{Repository, RepositoryParams};
use tracing::info;

use crate::reconciler::Reconciler;
use crate::{CoreError, CoreResult, cache, metadata};

/// Enumerates the versions produced since `previous`, oldest first.
///
/// Clones or resynchronizes the per-remote cache copy, then slices the
/// ordered tag or commit history at the previous version.
pub fn check(source: &Source, previous: Option<&Version>) -> CoreResult<Vec<Version>> {
    // Compile filters before touching the network so malformed patterns
    // fail without side effects.
    let reconciler = Reconciler::from_source(source)?;

    let path = cache::cache_dir(&source.url);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let repo = Repository::open_or_clone(&path, source.branch(), remote_params(source))?;
    reconciler.check(&repo, previous)
}

/// Materializes `version` into `destination` and reports its metadata.
pub fn fetch(source: &Source, version: &Version, destination: &Path) -> CoreResult<OpResponse> {
    info!(destination = %destination.display(), remote = %source.url, "fetching version");
    let repo = Repository::open_or_clone(destination, source.branch(), remote_params(source))?;

    let commit = if source.tag_mode() {
        repo.checkout_tag(&version.reference)?
    } else {
        repo.checkout_commit(&version.reference)?
    };

    Ok(OpResponse {
        version: version.clone(),
        metadata: metadata::describe(&commit),
    })
}

/// Mints a tag from the working directory and pushes it to origin.
///
/// The tag name and message are read from files named by `params`,
/// trimmed of surrounding whitespace. A missing or empty tag name file
/// fails the operation before any tag is created or pushed. Without tag
/// parameters the operation only reports the repository's current HEAD.
pub fn publish(source: &Source, params: &PublishParams, workdir: &Path) -> CoreResult<OpResponse> {
    let repo = Repository::open(
        workdir.join(&params.repository),
        source.branch(),
        remote_params(source),
    )?;

    let commit = match params.tag_path.as_deref().filter(|path| !path.is_empty()) {
        Some(tag_path) => {
            let tag_file = workdir.join(tag_path);
            let tag = read_trimmed(&tag_file).map_err(|source| CoreError::TagFileMissing {
                path: tag_file.clone(),
                source,
            })?;
            if tag.is_empty() {
                return Err(CoreError::TagFileEmpty { path: tag_file });
            }

            let message = match params
                .tag_message_path
                .as_deref()
                .filter(|path| !path.is_empty())
            {
                Some(message_path) => {
                    let message_file = workdir.join(message_path);
                    read_trimmed(&message_file).map_err(|source| {
                        CoreError::TagMessageFileMissing {
                            path: message_file.clone(),
                            source,
                        }
                    })?
                }
                None => String::new(),
            };

            let commit = repo.create_tag(&tag, &message)?;
            repo.push_tag(&tag)?;
            commit
        }
        None => repo.head_commit()?,
    };

    Ok(OpResponse {
        version: Version::new(commit.id.clone()),
        metadata: metadata::describe(&commit),
    })
}

fn remote_params(source: &Source) -> RepositoryParams {
    RepositoryParams {
        url: source.url.clone(),
        http_login: source.login.clone(),
        http_password: source.password.clone(),
        ssh_private_key: source.private_key.clone(),
    }
}

fn read_trimmed(path: &Path) -> std::io::Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}
