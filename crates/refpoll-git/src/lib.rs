//! Git repository engine for Refpoll.
//!
//! This crate turns a live, mutable commit graph into the deterministic
//! views the resource operations need:
//! - Repository lifecycle: clone-or-resynchronize, checkout, tag, push
//! - Topological commit listing with first-parent changed-file sets
//! - Chronologically ordered tag enumeration

mod commit;
mod error;
mod repository;
mod tags;
mod walker;

pub use commit::{Commit, Signature};
pub use error::{GitError, GitResult};
pub use repository::{DEFAULT_BRANCH, Repository, RepositoryParams};
pub use tags::TagCatalog;
pub use walker::CommitWalker;
