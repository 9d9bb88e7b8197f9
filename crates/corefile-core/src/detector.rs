//! Default Corefile detection and generation
//!
//! Default templates mark caller-specific arguments with wildcards:
//! `*` matches exactly one argument and `***` matches every remaining one.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::corefile::{zone_of, Corefile, Node};
use crate::error::{Error, Result};
use corefile_schemas::{Catalog, Release};
use tracing::debug;

const ONE: &str = "*";
const REST: &str = "***";
const REVERSE_ZONES: [&str; 2] = ["in-addr.arpa", "ip6.arpa"];

#[derive(Debug, Clone, Copy)]
pub struct DefaultDetector<'a> {
    catalog: &'a Catalog,
}

impl DefaultDetector<'static> {
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'a> DefaultDetector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Whether `text` is the default Corefile of a release
    ///
    /// An empty `k8s_version` compares against every release; otherwise only
    /// the releases shipped with that Kubernetes version are considered.
    pub fn is_default(&self, k8s_version: &str, text: &str) -> bool {
        let corefile = match Corefile::parse(text) {
            Ok(corefile) => corefile,
            Err(err) => {
                debug!(error = %err, "unparsable Corefile is not a default");
                return false;
            }
        };

        let manifest = &self.catalog.manifest;
        let mut candidates: Box<dyn Iterator<Item = &Release> + '_> = if k8s_version.is_empty() {
            Box::new(manifest.releases().iter())
        } else {
            Box::new(manifest.for_k8s_release(k8s_version))
        };

        candidates.any(|release| match Corefile::parse(&release.default_corefile) {
            Ok(template) => matches_template(&template, &corefile),
            Err(err) => {
                debug!(version = %release.version, error = %err, "default template does not parse");
                false
            }
        })
    }

    /// The default Corefile of `version` with its wildcards filled in
    ///
    /// `*` becomes `cluster_zone` on the default anchor plugin and
    /// `upstream` everywhere else; `***` becomes the reverse lookup zones.
    pub fn render_default(&self, version: &str, cluster_zone: &str, upstream: &str) -> Result<String> {
        let release = self
            .catalog
            .release(version)
            .ok_or_else(|| Error::UnknownVersion {
                version: version.to_string(),
            })?;

        let mut corefile = Corefile::parse(&release.default_corefile)?;
        let anchor = &self.catalog.manifest.default_anchor;
        for server in &mut corefile.servers {
            for plugin in &mut server.plugins {
                let value = if &plugin.name == anchor { cluster_zone } else { upstream };
                fill(plugin, value);
            }
        }
        Ok(corefile.to_text())
    }
}

fn fill(node: &mut Node, value: &str) {
    node.args = std::mem::take(&mut node.args)
        .into_iter()
        .flat_map(|arg| match arg.as_str() {
            ONE => vec![value.to_string()],
            REST => REVERSE_ZONES.iter().map(|z| z.to_string()).collect(),
            _ => vec![arg],
        })
        .collect();
    for child in &mut node.children {
        fill(child, value);
    }
}

/// Structural comparison of a Corefile against a default template
pub fn matches_template(template: &Corefile, corefile: &Corefile) -> bool {
    template.servers.len() == corefile.servers.len()
        && template
            .servers
            .iter()
            .zip(&corefile.servers)
            .all(|(t, c)| {
                t.keys.len() == c.keys.len()
                    && t.keys.iter().zip(&c.keys).all(|(a, b)| same_zone(a, b))
                    && nodes_match(&t.plugins, &c.plugins)
            })
}

fn nodes_match(template: &[Node], actual: &[Node]) -> bool {
    template.len() == actual.len()
        && template.iter().zip(actual).all(|(t, a)| {
            t.name == a.name && args_match(&t.args, &a.args) && nodes_match(&t.children, &a.children)
        })
}

fn args_match(template: &[String], actual: &[String]) -> bool {
    for (idx, expected) in template.iter().enumerate() {
        if expected == REST {
            return true;
        }
        match actual.get(idx) {
            None => return false,
            Some(_) if expected == ONE => {}
            Some(arg) if arg != expected => return false,
            Some(_) => {}
        }
    }
    template.len() == actual.len()
}

/// Compare server keys by zone, ignoring ports
pub fn same_zone(a: &str, b: &str) -> bool {
    zone_of(a) == zone_of(b)
}
