//! Request and response payload schema.
//!
//! Every operation receives a JSON payload on stdin and emits a JSON
//! result on stdout; these are the types on that wire. Source
//! configuration is read-only input and is never mutated by an operation.

use serde::{Deserialize, Serialize};

/// The source repository configuration shared by all operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    /// The remote repository URL.
    pub url: String,

    /// The branch to track; defaults to `master` when empty.
    #[serde(default)]
    pub branch: Option<String>,

    /// SSH private key material (PEM text). Takes precedence over HTTP
    /// credentials when both are present.
    #[serde(default)]
    pub private_key: Option<String>,

    /// HTTP basic-auth login.
    #[serde(default)]
    pub login: Option<String>,

    /// HTTP basic-auth password.
    #[serde(default)]
    pub password: Option<String>,

    /// Tag name filter (regular expression). Its presence selects tag
    /// mode; path filters are ignored when it is set.
    #[serde(default)]
    pub tag_regex: Option<String>,

    /// Path glob patterns a commit's changed files must match.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Source {
    /// The configured branch, when non-empty.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref().filter(|branch| !branch.is_empty())
    }

    /// Whether checks and fetches operate on tags rather than commits.
    #[must_use]
    pub fn tag_mode(&self) -> bool {
        self.tag_regex.as_deref().is_some_and(|re| !re.is_empty())
    }
}

/// One point in history: a commit id or a tag name.
///
/// Equality is string equality on the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// The opaque reference.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl Version {
    /// Creates a version from a reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Request payload for the check operation.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckPayload {
    /// The source configuration.
    pub source: Source,

    /// The previously observed version; absent on the first check.
    #[serde(default)]
    pub version: Option<Version>,
}

/// Request payload for the fetch operation.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchPayload {
    /// The source configuration.
    pub source: Source,

    /// The version to materialize.
    pub version: Version,
}

/// Tagging parameters for the publish operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishParams {
    /// Repository subdirectory inside the working directory.
    #[serde(default)]
    pub repository: String,

    /// Path to a file holding the tag name, relative to the working
    /// directory.
    #[serde(default)]
    pub tag_path: Option<String>,

    /// Path to a file holding the tag message, relative to the working
    /// directory.
    #[serde(default)]
    pub tag_message_path: Option<String>,
}

/// Request payload for the publish operation.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishPayload {
    /// The source configuration.
    pub source: Source,

    /// Tagging parameters.
    #[serde(default)]
    pub params: PublishParams,
}

/// One named metadata value in an operation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// The field name.
    pub name: String,

    /// The field value.
    pub value: String,
}

impl MetadataField {
    /// Creates a metadata field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Response envelope for fetch and publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResponse {
    /// The materialized or minted version.
    pub version: Version,

    /// Ordered commit metadata.
    pub metadata: Vec<MetadataField>,
}
