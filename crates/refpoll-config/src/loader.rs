//! Payload deserialization.

use std::io::Read;

use serde::de::DeserializeOwned;

use crate::ConfigResult;

/// Reads a JSON payload from a reader, typically stdin.
///
/// # Errors
///
/// Returns [`crate::ConfigError::InvalidPayload`] if the payload is not
/// valid JSON for the expected shape.
pub fn payload_from_reader<T: DeserializeOwned>(reader: impl Read) -> ConfigResult<T> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parses a JSON payload from a byte slice.
///
/// # Errors
///
/// Returns [`crate::ConfigError::InvalidPayload`] if the payload is not
/// valid JSON for the expected shape.
pub fn payload_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> ConfigResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}
