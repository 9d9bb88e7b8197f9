//! Plugin schema and option descriptor types
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle status of a plugin or option at a schema revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Recognized, no notice
    #[default]
    Current,
    /// Still functions but scheduled to change
    Deprecated,
    /// Accepted but has no effect
    Ignored,
    /// No longer accepted
    Removed,
    /// Part of the default configuration from this revision on
    Newdefault,
    /// Not recognized at all
    Unsupported,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Current => "current",
            Status::Deprecated => "deprecated",
            Status::Ignored => "ignored",
            Status::Removed => "removed",
            Status::Newdefault => "newdefault",
            Status::Unsupported => "unsupported",
        }
    }

    /// Statuses reported by the deprecation analysis for an element that is present
    pub fn is_reportable(&self) -> bool {
        matches!(self, Status::Deprecated | Status::Ignored | Status::Removed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform applied to a single option node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionAction {
    /// Delete the option
    Remove,
    /// Truncate the argument list to its first element
    UseFirstArgumentOnly,
    /// Delete the option only when its first argument equals `value`
    RemoveWhenFirstArgument { value: String },
    /// Rename the option, keeping its arguments and body
    Rename { to: String },
    /// Lift the option out of its plugin into a sibling plugin named `plugin`
    PromoteToPlugin { plugin: String },
}

/// Transform applied to a whole plugin instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginAction {
    /// Delete the plugin instance
    Remove,
    /// Rename the plugin; its options are remapped through the replaced schema
    ReplaceWith { plugin: String },
    /// Fold the plugin back into `option` entries of the sibling plugin `plugin`
    DemoteToOption { plugin: String, option: String },
}

/// Lifecycle and transforms of one option at one schema revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    #[serde(default)]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OptionAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_action: Option<OptionAction>,

    /// Arguments of the option synthesized when it is a new default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<String>>,
}

impl OptionDescriptor {
    pub fn current() -> Self {
        Self::default()
    }

    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn action(mut self, action: OptionAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn down_action(mut self, action: OptionAction) -> Self {
        self.down_action = Some(action);
        self
    }

    pub fn replaced_by(mut self, replacement: impl Into<String>) -> Self {
        self.replaced_by = Some(replacement.into());
        self
    }

    /// Mark as a new default synthesized with `args`
    pub fn new_default(args: &[&str]) -> Self {
        Self {
            status: Status::Newdefault,
            add: Some(args.iter().map(|a| a.to_string()).collect()),
            ..Self::default()
        }
    }
}

/// A compiled option-name pattern anchored to the whole name
#[derive(Clone)]
pub struct OptionPattern {
    source: String,
    regex: Regex,
}

impl OptionPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Debug for OptionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionPattern").field(&self.source).finish()
    }
}

impl PartialEq for OptionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for OptionPattern {}

impl Serialize for OptionPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for OptionPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        OptionPattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// An option descriptor reached through a name pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOption {
    pub pattern: OptionPattern,
    #[serde(flatten)]
    pub descriptor: OptionDescriptor,
}

/// Recognized options and lifecycle of one plugin at one schema revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSchema {
    #[serde(default)]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PluginAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_action: Option<PluginAction>,

    /// Arguments of the plugin appended when it is a new default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<String>>,

    #[serde(default)]
    pub named_options: BTreeMap<String, OptionDescriptor>,

    #[serde(default)]
    pub pattern_options: Vec<PatternOption>,
}

impl PluginSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema whose options are all current
    pub fn with_options(names: &[&str]) -> Self {
        let mut schema = Self::new();
        for name in names {
            schema.named_options.insert(name.to_string(), OptionDescriptor::current());
        }
        schema
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn replaced_by(mut self, replacement: impl Into<String>) -> Self {
        self.replaced_by = Some(replacement.into());
        self
    }

    pub fn action(mut self, action: PluginAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn down_action(mut self, action: PluginAction) -> Self {
        self.down_action = Some(action);
        self
    }

    /// Mark the plugin as a new default appended bare
    pub fn new_default(mut self) -> Self {
        self.status = Status::Newdefault;
        self.add = Some(Vec::new());
        self
    }

    /// Set or replace a named option
    pub fn option(mut self, name: &str, descriptor: OptionDescriptor) -> Self {
        self.named_options.insert(name.to_string(), descriptor);
        self
    }

    /// Drop a named option
    pub fn without(mut self, name: &str) -> Self {
        self.named_options.remove(name);
        self
    }

    pub fn pattern(mut self, pattern: OptionPattern, descriptor: OptionDescriptor) -> Self {
        self.pattern_options.push(PatternOption {
            pattern,
            descriptor,
        });
        self
    }

    /// Named options that are new defaults, in name order
    pub fn new_default_options(&self) -> impl Iterator<Item = (&str, &OptionDescriptor)> {
        self.named_options
            .iter()
            .filter(|(_, d)| d.status == Status::Newdefault)
            .map(|(name, d)| (name.as_str(), d))
    }
}
