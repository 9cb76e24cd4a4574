//! Wire payload schema for Refpoll.
//!
//! This crate defines the JSON request payloads the three operations read
//! from stdin and the response envelopes they write to stdout.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{payload_from_reader, payload_from_slice};
pub use schema::{
    CheckPayload, FetchPayload, MetadataField, OpResponse, PublishParams, PublishPayload, Source,
    Version,
};
