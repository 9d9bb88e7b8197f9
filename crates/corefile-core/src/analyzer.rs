//! Notice analyzer
//!
//! Shares the upgrade walk but never mutates the Corefile: at every release
//! after `from` up to and including `to` it reports the plugins and options
//! whose status at that release warrants a notice. Notices come out ordered
//! by release, then server block, plugin and option in document order.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::corefile::{Corefile, ServerBlock};
use crate::error::{Direction, Result};
use crate::migration::Migrator;
use crate::notice::Notice;
use corefile_schemas::{match_option, Catalog, Release, Status};
use tracing::debug;

/// Which statuses an analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// deprecated, ignored, removed and new defaults
    Deprecated,
    /// plugins and options the catalogue does not recognize
    Unsupported,
}

#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    catalog: &'a Catalog,
}

impl Analyzer<'static> {
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'a> Analyzer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn deprecated(&self, from: &str, to: &str, text: &str) -> Result<Vec<Notice>> {
        self.analyze(from, to, text, AnalysisMode::Deprecated)
    }

    pub fn unsupported(&self, from: &str, to: &str, text: &str) -> Result<Vec<Notice>> {
        self.analyze(from, to, text, AnalysisMode::Unsupported)
    }

    /// Collect notices for every release in the walk
    ///
    /// A same-version unsupported analysis evaluates that single release.
    pub fn analyze(&self, from: &str, to: &str, text: &str, mode: AnalysisMode) -> Result<Vec<Notice>> {
        let (start, end) =
            Migrator::new(self.catalog).resolve_range(from, to, Direction::Upgrade)?;
        let corefile = Corefile::parse(text)?;

        let first = if start == end && mode == AnalysisMode::Unsupported {
            start
        } else {
            start + 1
        };

        let mut notices = Vec::new();
        for release in &self.catalog.manifest.releases()[first..=end] {
            let version = release.version.to_string();
            for server in &corefile.servers {
                match mode {
                    AnalysisMode::Deprecated => {
                        self.deprecated_in(release, &version, server, &mut notices)
                    }
                    AnalysisMode::Unsupported => {
                        self.unsupported_in(release, &version, server, &mut notices)
                    }
                }
            }
        }

        debug!(from, to, ?mode, count = notices.len(), "analysis complete");
        Ok(notices)
    }

    fn deprecated_in(
        &self,
        release: &Release,
        version: &str,
        server: &ServerBlock,
        notices: &mut Vec<Notice>,
    ) {
        for plugin in &server.plugins {
            let Some(schema) = self.catalog.schema(release, &plugin.name) else {
                continue;
            };

            if schema.status.is_reportable() {
                notices.push(
                    Notice::plugin(&plugin.name, schema.status, version)
                        .replaced_by(schema.replaced_by.as_deref())
                        .additional(schema.additional.as_deref()),
                );
                continue;
            }

            for option in &plugin.children {
                if let Some(m) = match_option(&option.name, schema) {
                    if m.descriptor.status.is_reportable() {
                        notices.push(
                            Notice::option(&plugin.name, &option.name, m.descriptor.status, version)
                                .replaced_by(m.descriptor.replaced_by.as_deref()),
                        );
                    }
                }
            }

            for (name, _) in schema.new_default_options() {
                if !plugin.has_child(name) {
                    notices.push(Notice::option(&plugin.name, name, Status::Newdefault, version));
                }
            }
        }

        if !server.has_plugin(&self.catalog.manifest.default_anchor) {
            return;
        }
        for name in release.plugins.keys() {
            let is_new_default = self
                .catalog
                .schema(release, name)
                .is_some_and(|schema| schema.status == Status::Newdefault);
            if is_new_default && !server.has_plugin(name) {
                notices.push(Notice::plugin(name, Status::Newdefault, version));
            }
        }
    }

    fn unsupported_in(
        &self,
        release: &Release,
        version: &str,
        server: &ServerBlock,
        notices: &mut Vec<Notice>,
    ) {
        for plugin in &server.plugins {
            let Some(schema) = self.catalog.schema(release, &plugin.name) else {
                notices.push(Notice::plugin(&plugin.name, Status::Unsupported, version));
                continue;
            };

            for option in &plugin.children {
                if match_option(&option.name, schema).is_none() {
                    notices.push(Notice::option(
                        &plugin.name,
                        &option.name,
                        Status::Unsupported,
                        version,
                    ));
                }
            }
        }
    }
}
