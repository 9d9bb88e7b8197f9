//! Error types for the Corefile core library
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for Corefile operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed Corefile text
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A version string the catalogue does not know
    #[error("Unknown CoreDNS version: {version}")]
    UnknownVersion { version: String },

    /// An image digest the catalogue does not know
    #[error("Unknown image digest: {digest}")]
    UnknownDigest { digest: String },

    /// From/to ordering is wrong for the requested direction
    #[error("Invalid {direction} range: {from} to {to}")]
    InvalidVersionRange {
        from: String,
        to: String,
        direction: Direction,
    },

    /// A structural action could not be applied
    #[error("Migration failed: {message}")]
    Migration { message: String },

    /// Catalogue loading or validation errors
    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: corefile_schemas::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }
}

/// Direction of a version walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Upgrade,
    Downgrade,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upgrade => write!(f, "upgrade"),
            Direction::Downgrade => write!(f, "downgrade"),
        }
    }
}
