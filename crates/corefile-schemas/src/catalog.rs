//! The migration catalogue: plugin registry plus release manifest
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::registry::{builtin::builtin_registry, PluginRegistry, PluginSchema};
use crate::versioning::{builtin::builtin_manifest, Release, VersionManifest};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// Everything the migration engine knows about CoreDNS releases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub registry: PluginRegistry,
    pub manifest: VersionManifest,
}

impl Catalog {
    pub fn new(registry: PluginRegistry, manifest: VersionManifest) -> Result<Self> {
        let catalog = Self { registry, manifest };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalogue compiled into the crate, built once per process
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| Catalog {
            registry: builtin_registry(),
            manifest: builtin_manifest(),
        })
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(input)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(input)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that releases ascend and every referenced revision exists
    pub fn validate(&self) -> Result<()> {
        self.manifest.check_order()?;

        for release in self.manifest.releases() {
            for (plugin, revision) in &release.plugins {
                if self.registry.lookup(plugin, revision).is_none() {
                    return Err(Error::UnknownRevision {
                        release: release.version.to_string(),
                        plugin: plugin.clone(),
                        revision: revision.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn release(&self, version: &str) -> Option<&Release> {
        self.manifest.release(version)
    }

    /// Schema of a plugin as recognized by a release
    pub fn schema(&self, release: &Release, plugin: &str) -> Option<&PluginSchema> {
        let revision = release.revision(plugin)?;
        self.registry.lookup(plugin, revision)
    }
}
