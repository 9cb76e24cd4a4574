//! Version reconciliation engine for Refpoll.
//!
//! This crate turns the ordered views produced by `refpoll-git` into the
//! three resource operations: enumerating new versions since a baseline,
//! materializing one version into a working directory, and minting and
//! publishing a tag.

mod cache;
mod error;
mod metadata;
mod ops;
mod pathspec;
mod reconciler;

pub use cache::cache_dir;
pub use error::{CoreError, CoreResult};
pub use metadata::describe;
pub use ops::{check, fetch, publish};
pub use pathspec::PathFilter;
pub use reconciler::Reconciler;
