//! Error types and handling for the CLI
//!
//! Every failure a command can hit maps to its own process exit code so
//! scripts can tell a bad version range from an unreadable Corefile.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the migration engine
    #[error(transparent)]
    Core(#[from] corefile_core::Error),

    /// Error loading a custom catalogue
    #[error(transparent)]
    Catalog(#[from] corefile_schemas::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        use corefile_core::Error as Core;

        match self {
            Self::Io(_) => 1,
            Self::Core(Core::Syntax { .. }) => 20,
            Self::Core(Core::UnknownVersion { .. }) => 21,
            Self::Core(Core::UnknownDigest { .. }) => 22,
            Self::Core(Core::InvalidVersionRange { .. }) => 23,
            Self::Core(Core::Migration { .. }) => 24,
            Self::Core(Core::Catalog { .. }) | Self::Catalog(_) => 25,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(
            self,
            Self::Core(
                corefile_core::Error::InvalidVersionRange { .. }
                    | corefile_core::Error::UnknownVersion { .. }
            )
        )
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
