//! Corefile Core - migration engine for CoreDNS Corefiles
//!
//! This crate rewrites Corefile text so it stays valid across CoreDNS
//! releases and reports the options and plugins that change status on the way.
//!
//! # Main Components
//!
//! - **Corefile Model**: parser and canonical serializer for Corefile text
//! - **Migrator**: walks the release catalogue applying each release's changes
//! - **Analyzer**: reports deprecated, removed and unsupported configuration
//! - **DefaultDetector**: recognizes and renders the default Corefile of a release
//!
//! The free functions below run against the built-in catalogue; construct the
//! components with [`corefile_schemas::Catalog`] values to use another one.
//!
//! # Example
//!
//! ```
//! let corefile = ".:53 {\n    health\n    kubernetes cluster.local\n}\n";
//! let migrated = corefile_core::migrate("1.6.2", "1.6.6", corefile, false).unwrap();
//! assert!(migrated.contains("lameduck 5s"));
//! ```
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod analyzer;
pub mod corefile;
pub mod detector;
pub mod error;
pub mod migration;
pub mod notice;

mod proptest_strategies;

// Re-export main types for convenience
pub use analyzer::{AnalysisMode, Analyzer};
pub use corefile::{Corefile, Node, NodeKind, ServerBlock};
pub use detector::DefaultDetector;
pub use error::{Direction, Error, Result};
pub use migration::{MigrationReport, Migrator};
pub use notice::Notice;

pub use corefile_schemas::{Catalog, Status};

/// Upgrade a Corefile from one release to a later (or the same) one
pub fn migrate(from: &str, to: &str, corefile: &str, with_notices: bool) -> Result<String> {
    Migrator::builtin().migrate(from, to, corefile, with_notices)
}

/// Downgrade a Corefile from one release to an earlier (or the same) one
pub fn migrate_down(from: &str, to: &str, corefile: &str) -> Result<String> {
    Migrator::builtin().migrate_down(from, to, corefile)
}

/// Deprecated, ignored, removed and newly defaulted configuration after `from` up to `to`
pub fn deprecated(from: &str, to: &str, corefile: &str) -> Result<Vec<Notice>> {
    Analyzer::builtin().deprecated(from, to, corefile)
}

/// Plugins and options not recognized after `from` up to `to`
pub fn unsupported(from: &str, to: &str, corefile: &str) -> Result<Vec<Notice>> {
    Analyzer::builtin().unsupported(from, to, corefile)
}

/// Whether a Corefile is a release's default; an empty `k8s_version` checks every release
pub fn is_default(k8s_version: &str, corefile: &str) -> bool {
    DefaultDetector::builtin().is_default(k8s_version, corefile)
}

/// Every known CoreDNS version, ascending
pub fn valid_versions() -> Vec<String> {
    Catalog::builtin().manifest.versions()
}

/// The CoreDNS version published under an image digest
pub fn version_from_image_digest(digest: &str) -> Result<String> {
    Catalog::builtin()
        .manifest
        .by_digest(digest)
        .map(|release| release.version.to_string())
        .ok_or_else(|| Error::UnknownDigest {
            digest: digest.to_string(),
        })
}

/// Whether an image digest belongs to a known release
pub fn released(digest: &str) -> bool {
    version_from_image_digest(digest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lookup() {
        assert_eq!(
            version_from_image_digest(
                "73ca82b4ce829766d4f1f10947c3a338888f876fbed0540dc849c89ff256e90c"
            )
            .unwrap(),
            "1.7.0"
        );

        let err = version_from_image_digest("12345").unwrap_err();
        assert!(matches!(err, Error::UnknownDigest { .. }));
        assert!(!released("12345"));
        assert!(!released(""));
    }

    #[test]
    fn test_valid_versions() {
        let versions = valid_versions();
        assert_eq!(versions.first().map(String::as_str), Some("1.1.3"));
        assert!(versions.contains(&"1.6.9".to_string()));
        assert!(!versions.contains(&"1.6.8".to_string()));
    }
}
