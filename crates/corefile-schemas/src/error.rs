//! Error types for catalogue construction and lookups
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for catalogue operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, loading or validating a catalogue
#[derive(Error, Debug)]
pub enum Error {
    /// A version string is not a dotted three-component release
    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    /// An option pattern failed to compile
    #[error("Invalid option pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A release references a schema revision the registry does not hold
    #[error("Release {release} references unknown revision '{revision}' of plugin '{plugin}'")]
    UnknownRevision {
        release: String,
        plugin: String,
        revision: String,
    },

    /// Releases are not strictly ascending
    #[error("Release {version} is out of order (follows {previous})")]
    OutOfOrder { version: String, previous: String },

    /// YAML catalogue parsing errors
    #[error("Failed to parse YAML catalogue: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON catalogue parsing errors
    #[error("Failed to parse JSON catalogue: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid version error
    pub fn invalid_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
