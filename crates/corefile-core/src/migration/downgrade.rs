//! One downward step of the version walk
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::actions::{apply_option_actions, demote, Changes};
use crate::corefile::{Corefile, Node, ServerBlock};
use crate::error::{Direction, Result};
use crate::notice::Notice;
use corefile_schemas::{Catalog, PluginAction, Release, Status};
use tracing::{trace, warn};

/// Undo the changes introduced by `release`, the release being left
pub(crate) fn downgrade_step(
    catalog: &Catalog,
    release: &Release,
    corefile: &mut Corefile,
    changes: &mut Changes<'_>,
) -> Result<()> {
    let version = release.version.to_string();
    for server in &mut corefile.servers {
        downgrade_server(catalog, release, &version, server, changes)?;
    }
    Ok(())
}

fn downgrade_server(
    catalog: &Catalog,
    release: &Release,
    version: &str,
    server: &mut ServerBlock,
    changes: &mut Changes<'_>,
) -> Result<()> {
    let fallback_zone = server.zones().next().unwrap_or(".").to_string();
    let mut kept: Vec<Node> = Vec::with_capacity(server.plugins.len());
    let mut demoted: Vec<(String, Vec<Node>)> = Vec::new();
    let present: Vec<String> = server.plugins.iter().map(|p| p.name.clone()).collect();

    for mut plugin in std::mem::take(&mut server.plugins) {
        let Some(schema) = catalog.schema(release, &plugin.name) else {
            kept.push(plugin);
            continue;
        };

        match &schema.down_action {
            Some(PluginAction::Remove) => {
                trace!(plugin = %plugin.name, version, "removing plugin");
                changes.record(|| Notice::plugin(&plugin.name, Status::Removed, version));
                continue;
            }
            Some(PluginAction::ReplaceWith { plugin: replacement }) => {
                trace!(plugin = %plugin.name, replacement = %replacement, version, "replacing plugin");
                changes.record(|| {
                    Notice::plugin(&plugin.name, Status::Removed, version)
                        .replaced_by(Some(replacement.as_str()))
                });
                plugin.name = replacement.clone();
            }
            Some(PluginAction::DemoteToOption { plugin: host, option }) => {
                if present.iter().any(|p| p == host) {
                    trace!(plugin = %plugin.name, host = %host, version, "demoting plugin to options");
                    changes.record(|| {
                        Notice::plugin(&plugin.name, Status::Removed, version)
                            .replaced_by(Some(host.as_str()))
                    });
                    demoted.push((host.clone(), demote(plugin, option)));
                    continue;
                }
                warn!(plugin = %plugin.name, host = %host, version, "no host plugin to demote into, keeping plugin");
            }
            None => {}
        }

        apply_option_actions(
            &mut plugin,
            schema,
            Direction::Downgrade,
            &fallback_zone,
            version,
            changes,
        )?;
        kept.push(plugin);
    }

    for (host, options) in demoted {
        if let Some(target) = kept.iter_mut().find(|p| p.name == host) {
            target.children.extend(options);
        }
    }

    server.plugins = kept;
    Ok(())
}
