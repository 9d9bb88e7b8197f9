//! Plugin schema registry
//!
//! Holds, for each plugin name, the schema revisions the catalogue knows
//! about and resolves option names against a revision:
//! - exact names are checked first
//! - patterns are tried in declared order, the first whole-name match wins
//! - no match means the option is unrecognized at that revision
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod builtin;
pub mod types;

pub use types::{
    OptionAction, OptionDescriptor, OptionPattern, PatternOption, PluginAction, PluginSchema,
    Status,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An option name resolved against a plugin schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMatch<'a> {
    /// The option name as written in the Corefile
    pub name: &'a str,
    pub descriptor: &'a OptionDescriptor,
    /// Whether the match came from the pattern table
    pub by_pattern: bool,
}

/// Read-only table of plugin schemas keyed by plugin and revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, BTreeMap<String, PluginSchema>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema revision, replacing any previous one
    pub fn insert(
        &mut self,
        plugin: impl Into<String>,
        revision: impl Into<String>,
        schema: PluginSchema,
    ) {
        self.plugins
            .entry(plugin.into())
            .or_default()
            .insert(revision.into(), schema);
    }

    /// Look up one revision of a plugin schema
    pub fn lookup(&self, plugin: &str, revision: &str) -> Option<&PluginSchema> {
        self.plugins.get(plugin)?.get(revision)
    }

    /// Revision identifiers known for a plugin
    pub fn revisions(&self, plugin: &str) -> impl Iterator<Item = &str> {
        self.plugins
            .get(plugin)
            .into_iter()
            .flat_map(|revisions| revisions.keys().map(String::as_str))
    }

    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }
}

/// Resolve an option name against a plugin schema
pub fn match_option<'a>(name: &'a str, schema: &'a PluginSchema) -> Option<OptionMatch<'a>> {
    if let Some(descriptor) = schema.named_options.get(name) {
        return Some(OptionMatch {
            name,
            descriptor,
            by_pattern: false,
        });
    }

    schema
        .pattern_options
        .iter()
        .find(|p| p.pattern.is_match(name))
        .map(|p| OptionMatch {
            name,
            descriptor: &p.descriptor,
            by_pattern: true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> PluginSchema {
        PluginSchema::with_options(&["named-option"]).pattern(
            OptionPattern::new("pattern-option-[A-Z]+[0-9]+").unwrap(),
            OptionDescriptor::current(),
        )
    }

    #[test]
    fn test_match_option() {
        let schema = sample_schema();

        let cases = [
            ("named-option", true),
            ("qwerty", false),
            ("pattern-option-A10", true),
            ("pattern-option-a10", false),
        ];

        for (name, matched) in cases {
            let result = match_option(name, &schema);
            assert_eq!(result.is_some(), matched, "option {}", name);
            if let Some(m) = result {
                assert_eq!(m.name, name);
            }
        }
    }

    #[test]
    fn test_named_before_pattern() {
        let schema = PluginSchema::new()
            .pattern(OptionPattern::new(".*").unwrap(), OptionDescriptor::current())
            .option(
                "upstream",
                OptionDescriptor::with_status(Status::Removed).action(OptionAction::Remove),
            );

        let m = match_option("upstream", &schema).unwrap();
        assert!(!m.by_pattern);
        assert_eq!(m.descriptor.status, Status::Removed);

        let m = match_option("anything", &schema).unwrap();
        assert!(m.by_pattern);
    }

    #[test]
    fn test_first_pattern_wins() {
        let schema = PluginSchema::new()
            .pattern(
                OptionPattern::new("[0-9.]+").unwrap(),
                OptionDescriptor::with_status(Status::Deprecated),
            )
            .pattern(OptionPattern::new(".*").unwrap(), OptionDescriptor::current());

        let m = match_option("10.0.0.1", &schema).unwrap();
        assert_eq!(m.descriptor.status, Status::Deprecated);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = PluginRegistry::new();
        registry.insert("errors", "v1", PluginSchema::new());
        registry.insert("errors", "v2", PluginSchema::with_options(&["consolidate"]));

        assert!(registry.lookup("errors", "v1").is_some());
        assert!(registry.lookup("errors", "v3").is_none());
        assert!(registry.lookup("route53", "v1").is_none());
        assert_eq!(registry.revisions("errors").collect::<Vec<_>>(), vec!["v1", "v2"]);
    }
}
