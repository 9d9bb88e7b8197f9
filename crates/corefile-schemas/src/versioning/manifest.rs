//! Ordered release catalogue
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::version::CoreDnsVersion;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-Corefile rewrite applied after a release's plugin pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcess {
    /// Move every non-root `forward` instance of a root server block into its own block
    SplitStubForwards,
}

/// A plugin line used to build synthesized server blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginTemplate {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PluginTemplate {
    pub fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One CoreDNS release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub version: CoreDnsVersion,

    /// Kubernetes releases that ship this CoreDNS version by default
    #[serde(default)]
    pub k8s_releases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<String>,

    /// Default Corefile template; `*` and `***` mark caller-specific arguments
    pub default_corefile: String,

    /// Active schema revision per plugin
    pub plugins: BTreeMap<String, String>,

    #[serde(default)]
    pub post_process: Vec<PostProcess>,
}

impl Release {
    pub fn revision(&self, plugin: &str) -> Option<&str> {
        self.plugins.get(plugin).map(String::as_str)
    }
}

/// Known releases in ascending order plus the default-set conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    releases: Vec<Release>,

    /// Plugin whose presence marks a server block as the cluster DNS block
    pub default_anchor: String,

    /// Plugins trailing the `forward` of a split-out stub zone block
    pub stub_zone_plugins: Vec<PluginTemplate>,
}

impl VersionManifest {
    /// Build a manifest, rejecting releases that are not strictly ascending
    pub fn new(
        releases: Vec<Release>,
        default_anchor: impl Into<String>,
        stub_zone_plugins: Vec<PluginTemplate>,
    ) -> Result<Self> {
        let manifest = Self {
            releases,
            default_anchor: default_anchor.into(),
            stub_zone_plugins,
        };
        manifest.check_order()?;
        Ok(manifest)
    }

    /// Assemble a manifest without the ordering check
    pub(crate) fn from_parts(
        releases: Vec<Release>,
        default_anchor: impl Into<String>,
        stub_zone_plugins: Vec<PluginTemplate>,
    ) -> Self {
        Self {
            releases,
            default_anchor: default_anchor.into(),
            stub_zone_plugins,
        }
    }

    pub(crate) fn check_order(&self) -> Result<()> {
        for pair in self.releases.windows(2) {
            if pair[0].version >= pair[1].version {
                return Err(Error::OutOfOrder {
                    version: pair[1].version.to_string(),
                    previous: pair[0].version.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Index of a version string in the ascending release list
    ///
    /// Only the canonical `X.Y.Z` spelling matches; `v1.3.1` or `01.3.1`
    /// name no release.
    pub fn position(&self, version: &str) -> Option<usize> {
        let parsed = CoreDnsVersion::parse(version).ok()?;
        self.releases
            .binary_search_by(|release| release.version.cmp(&parsed))
            .ok()
            .filter(|&idx| self.releases[idx].version.to_string() == version)
    }

    pub fn release(&self, version: &str) -> Option<&Release> {
        self.position(version).map(|idx| &self.releases[idx])
    }

    pub fn next(&self, version: &str) -> Option<&Release> {
        self.position(version)
            .and_then(|idx| self.releases.get(idx + 1))
    }

    pub fn previous(&self, version: &str) -> Option<&Release> {
        self.position(version)
            .and_then(|idx| idx.checked_sub(1))
            .map(|idx| &self.releases[idx])
    }

    /// All known versions as strings, ascending
    pub fn versions(&self) -> Vec<String> {
        self.releases.iter().map(|r| r.version.to_string()).collect()
    }

    /// Release published under an image digest (with or without a `sha256:` prefix)
    pub fn by_digest(&self, digest: &str) -> Option<&Release> {
        let digest = digest.trim();
        let digest = digest.strip_prefix("sha256:").unwrap_or(digest);
        if digest.is_empty() {
            return None;
        }
        self.releases
            .iter()
            .find(|r| r.image_digest.as_deref() == Some(digest))
    }

    /// Releases shipped with a Kubernetes release
    pub fn for_k8s_release<'a>(&'a self, k8s: &'a str) -> impl Iterator<Item = &'a Release> + 'a {
        self.releases
            .iter()
            .filter(move |r| r.k8s_releases.iter().any(|k| k == k8s))
    }
}
