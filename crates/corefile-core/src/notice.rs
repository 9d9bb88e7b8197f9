//! Lifecycle notices reported by the analyzer and the migration report
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use corefile_schemas::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle event for a plugin or option at one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub plugin: String,
    /// Empty for plugin-level notices
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub option: String,
    pub severity: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
    pub version: String,
}

impl Notice {
    pub fn plugin(plugin: impl Into<String>, severity: Status, version: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            option: String::new(),
            severity,
            replaced_by: None,
            additional: None,
            version: version.into(),
        }
    }

    pub fn option(
        plugin: impl Into<String>,
        option: impl Into<String>,
        severity: Status,
        version: impl Into<String>,
    ) -> Self {
        Self {
            option: option.into(),
            ..Self::plugin(plugin, severity, version)
        }
    }

    pub fn replaced_by(mut self, replacement: Option<&str>) -> Self {
        self.replaced_by = replacement.map(str::to_string);
        self
    }

    pub fn additional(mut self, additional: Option<&str>) -> Self {
        self.additional = additional.map(str::to_string);
        self
    }

    pub fn is_plugin_level(&self) -> bool {
        self.option.is_empty()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plugin_level() {
            write!(f, "Plugin \"{}\" ", self.plugin)?;
        } else {
            write!(f, "Option \"{}\" in plugin \"{}\" ", self.option, self.plugin)?;
        }

        match self.severity {
            Status::Unsupported => {
                write!(f, "is unsupported by this migration tool in {}.", self.version)?
            }
            Status::Newdefault => write!(f, "is added as a default in {}.", self.version)?,
            severity => write!(f, "is {} in {}.", severity, self.version)?,
        }

        if let Some(replacement) = &self.replaced_by {
            write!(f, " It is replaced by \"{}\".", replacement)?;
        }
        if let Some(additional) = &self.additional {
            write!(f, " {}", additional)?;
        }
        Ok(())
    }
}
