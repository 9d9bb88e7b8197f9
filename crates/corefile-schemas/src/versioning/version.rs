//! CoreDNS release identifiers
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dotted three-component CoreDNS release, ordered numerically
///
/// Field order matters: the derived `Ord` compares major, then minor, then
/// patch, so `1.9.0 < 1.10.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoreDnsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl CoreDnsVersion {
    /// Create a new version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string such as `1.6.5` (a leading `v` is accepted)
    pub fn parse(version_str: &str) -> Result<Self, Error> {
        let trimmed = version_str.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(Error::invalid_version(
                version_str,
                "expected format X.Y.Z",
            ));
        }

        let component = |idx: usize, label: &str| -> Result<u32, Error> {
            parts[idx].parse().map_err(|_| {
                Error::invalid_version(
                    version_str,
                    format!("invalid {} component '{}'", label, parts[idx]),
                )
            })
        };

        Ok(Self {
            major: component(0, "major")?,
            minor: component(1, "minor")?,
            patch: component(2, "patch")?,
        })
    }
}

impl fmt::Display for CoreDnsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for CoreDnsVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CoreDnsVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CoreDnsVersion> for String {
    fn from(version: CoreDnsVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = CoreDnsVersion::parse("1.6.5").unwrap();
        assert_eq!(v, CoreDnsVersion::new(1, 6, 5));

        let v = CoreDnsVersion::parse("v1.8.4").unwrap();
        assert_eq!(v.to_string(), "1.8.4");

        assert!(CoreDnsVersion::parse("banana").is_err());
        assert!(CoreDnsVersion::parse("1.6").is_err());
        assert!(CoreDnsVersion::parse("1.6.x").is_err());
        assert!(CoreDnsVersion::parse("1.6.5.1").is_err());
    }

    #[test]
    fn test_numeric_ordering() {
        let v1_9 = CoreDnsVersion::new(1, 9, 0);
        let v1_10 = CoreDnsVersion::new(1, 10, 0);
        assert!(v1_9 < v1_10);
        assert!(CoreDnsVersion::new(1, 6, 9) < CoreDnsVersion::new(1, 6, 10));
        assert!(CoreDnsVersion::new(1, 8, 0) > CoreDnsVersion::new(1, 7, 1));
    }

    #[test]
    fn test_serde_as_string() {
        let v = CoreDnsVersion::new(1, 5, 0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"1.5.0\"");

        let back: CoreDnsVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        assert!(serde_json::from_str::<CoreDnsVersion>("\"apple\"").is_err());
    }
}
