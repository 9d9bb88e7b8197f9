//! Version-walking migration engine
//!
//! A migration parses the Corefile once and then visits every release
//! between the bounds in order, applying the changes each release records:
//! - upgrade steps apply the descriptors of the release being entered
//! - downgrade steps apply the `down_action`s of the release being left
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod actions;
pub mod downgrade;
pub mod fanout;
pub mod upgrade;

use crate::corefile::Corefile;
use crate::error::{Direction, Error, Result};
use crate::notice::Notice;
use actions::Changes;
use corefile_schemas::Catalog;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Migrated text plus the notices for every change applied on the way
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub corefile: String,
    pub notices: Vec<Notice>,
}

/// Migration engine bound to a catalogue
#[derive(Debug, Clone, Copy)]
pub struct Migrator<'a> {
    catalog: &'a Catalog,
}

impl Migrator<'static> {
    /// Engine over the built-in catalogue
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'a> Migrator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Positions of `from` and `to` in the manifest, checked for `direction`
    pub fn resolve_range(&self, from: &str, to: &str, direction: Direction) -> Result<(usize, usize)> {
        let manifest = &self.catalog.manifest;
        let start = manifest.position(from).ok_or_else(|| Error::UnknownVersion {
            version: from.to_string(),
        })?;
        let end = manifest.position(to).ok_or_else(|| Error::UnknownVersion {
            version: to.to_string(),
        })?;

        let ordered = match direction {
            Direction::Upgrade => start <= end,
            Direction::Downgrade => start >= end,
        };
        if !ordered {
            return Err(Error::InvalidVersionRange {
                from: from.to_string(),
                to: to.to_string(),
                direction,
            });
        }
        Ok((start, end))
    }

    /// Upgrade Corefile text from one release to a later one
    ///
    /// With `with_notices` the applied changes are also collected and
    /// logged at `debug`; the returned text is the same either way.
    pub fn migrate(&self, from: &str, to: &str, text: &str, with_notices: bool) -> Result<String> {
        if !with_notices {
            return self.run(from, to, text, Direction::Upgrade, None);
        }

        let report = self.migrate_with_report(from, to, text)?;
        for notice in &report.notices {
            debug!(%notice, "applied change");
        }
        Ok(report.corefile)
    }

    /// Upgrade and return the notices for every change applied, in walk order
    pub fn migrate_with_report(&self, from: &str, to: &str, text: &str) -> Result<MigrationReport> {
        let mut notices = Vec::new();
        let corefile = self.run(from, to, text, Direction::Upgrade, Some(&mut notices))?;
        Ok(MigrationReport { corefile, notices })
    }

    /// Downgrade Corefile text from one release to an earlier one
    pub fn migrate_down(&self, from: &str, to: &str, text: &str) -> Result<String> {
        self.run(from, to, text, Direction::Downgrade, None)
    }

    /// Walk an already parsed Corefile in place
    pub fn migrate_corefile(
        &self,
        from: &str,
        to: &str,
        corefile: &mut Corefile,
        direction: Direction,
    ) -> Result<()> {
        let (start, end) = self.resolve_range(from, to, direction)?;
        self.walk(start, end, corefile, direction, &mut Changes::new(None))
    }

    fn run(
        &self,
        from: &str,
        to: &str,
        text: &str,
        direction: Direction,
        sink: Option<&mut Vec<Notice>>,
    ) -> Result<String> {
        let (start, end) = self.resolve_range(from, to, direction)?;
        let span = debug_span!("migrate", from, to, %direction);
        let _enter = span.enter();

        let mut corefile = Corefile::parse(text)?;
        self.walk(start, end, &mut corefile, direction, &mut Changes::new(sink))?;
        Ok(corefile.to_text())
    }

    fn walk(
        &self,
        start: usize,
        end: usize,
        corefile: &mut Corefile,
        direction: Direction,
        changes: &mut Changes<'_>,
    ) -> Result<()> {
        let releases = self.catalog.manifest.releases();

        match direction {
            Direction::Upgrade => {
                for release in &releases[start + 1..=end] {
                    debug!(version = %release.version, "upgrade step");
                    upgrade::upgrade_step(self.catalog, release, corefile, changes)?;
                }
            }
            Direction::Downgrade => {
                for release in releases[end + 1..=start].iter().rev() {
                    debug!(version = %release.version, "downgrade step");
                    downgrade::downgrade_step(self.catalog, release, corefile, changes)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_up_migration() {
        let migrator = Migrator::builtin();
        let cases = [
            ("1.3.1", "1.3.1", false),
            ("1.3.1", "1.5.0", false),
            ("1.5.0", "1.3.1", true),
            ("banana", "1.5.0", true),
            ("1.3.1", "apple", true),
            ("banana", "apple", true),
        ];

        for (from, to, should_err) in cases {
            let result = migrator.resolve_range(from, to, Direction::Upgrade);
            assert_eq!(result.is_err(), should_err, "{} to {}", from, to);
        }
    }

    #[test]
    fn test_valid_down_migration() {
        let migrator = Migrator::builtin();
        let cases = [
            ("1.3.1", "1.3.1", false),
            ("1.3.1", "1.5.0", true),
            ("1.5.0", "1.3.1", false),
            ("banana", "1.5.0", true),
            ("1.3.1", "apple", true),
            ("banana", "apple", true),
        ];

        for (from, to, should_err) in cases {
            let result = migrator.resolve_range(from, to, Direction::Downgrade);
            assert_eq!(result.is_err(), should_err, "{} to {}", from, to);
        }
    }

    #[test]
    fn test_range_checked_before_parsing() {
        let err = Migrator::builtin()
            .migrate("1.5.0", "1.3.1", "not { a corefile", false)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidVersionRange { .. }));

        let err = Migrator::builtin()
            .migrate_down("1.5.0", "9.9.9", "")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownVersion { version } if version == "9.9.9"));
    }

    #[test]
    fn test_report_collects_applied_changes() {
        let report = Migrator::builtin()
            .migrate_with_report(
                "1.4.0",
                "1.5.0",
                ".:53 {\n    kubernetes cluster.local {\n        upstream\n    }\n    proxy . /etc/resolv.conf\n}\n",
            )
            .unwrap();

        let rendered: Vec<String> = report.notices.iter().map(|n| n.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "Option \"upstream\" in plugin \"kubernetes\" is ignored in 1.5.0.",
                "Plugin \"proxy\" is removed in 1.5.0. It is replaced by \"forward\".",
                "Plugin \"ready\" is added as a default in 1.5.0.",
            ]
        );
    }
}
