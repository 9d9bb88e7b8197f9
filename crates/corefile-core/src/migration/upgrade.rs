//! One upward step of the version walk
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::actions::{add_new_default_options, apply_option_actions, merge_promoted, Changes};
use super::fanout::split_stub_forwards;
use crate::corefile::{Corefile, Node, ServerBlock};
use crate::error::{Direction, Result};
use crate::notice::Notice;
use corefile_schemas::{Catalog, PluginAction, PostProcess, Release, Status};
use tracing::trace;

/// Rewrite `corefile` into the shape expected by `release`
pub(crate) fn upgrade_step(
    catalog: &Catalog,
    release: &Release,
    corefile: &mut Corefile,
    changes: &mut Changes<'_>,
) -> Result<()> {
    let version = release.version.to_string();

    for server in &mut corefile.servers {
        upgrade_server(catalog, release, &version, server, changes)?;
    }

    for post in &release.post_process {
        match post {
            PostProcess::SplitStubForwards => {
                split_stub_forwards(&catalog.manifest, corefile, &version)?
            }
        }
    }
    Ok(())
}

fn upgrade_server(
    catalog: &Catalog,
    release: &Release,
    version: &str,
    server: &mut ServerBlock,
    changes: &mut Changes<'_>,
) -> Result<()> {
    let fallback_zone = server.zones().next().unwrap_or(".").to_string();
    let anchored = server.has_plugin(&catalog.manifest.default_anchor);
    let present: Vec<String> = server.plugins.iter().map(|p| p.name.clone()).collect();

    let mut kept = Vec::with_capacity(server.plugins.len());
    let mut promoted = Vec::new();

    for mut plugin in std::mem::take(&mut server.plugins) {
        let Some(schema) = catalog.schema(release, &plugin.name) else {
            kept.push(plugin);
            continue;
        };

        match &schema.action {
            Some(PluginAction::Remove) => {
                trace!(plugin = %plugin.name, version, "removing plugin");
                changes.record(|| {
                    Notice::plugin(&plugin.name, schema.status, version)
                        .replaced_by(schema.replaced_by.as_deref())
                });
                continue;
            }
            Some(PluginAction::ReplaceWith { plugin: replacement }) => {
                trace!(plugin = %plugin.name, replacement = %replacement, version, "replacing plugin");
                changes.record(|| {
                    Notice::plugin(&plugin.name, schema.status, version)
                        .replaced_by(Some(replacement.as_str()))
                });
                // options stay matched against the replaced plugin's schema
                plugin.name = replacement.clone();
            }
            Some(PluginAction::DemoteToOption { .. }) | None => {}
        }

        promoted.extend(apply_option_actions(
            &mut plugin,
            schema,
            Direction::Upgrade,
            &fallback_zone,
            version,
            changes,
        )?);
        add_new_default_options(&mut plugin, schema, version, changes);
        kept.push(plugin);
    }

    merge_promoted(&mut kept, promoted);

    if anchored {
        for plugin in release.plugins.keys() {
            let Some(schema) = catalog.schema(release, plugin) else {
                continue;
            };
            if schema.status != Status::Newdefault
                || present.iter().any(|p| p == plugin)
                || kept.iter().any(|p| &p.name == plugin)
            {
                continue;
            }
            trace!(plugin = %plugin, version, "adding default plugin");
            changes.record(|| Notice::plugin(plugin, Status::Newdefault, version));
            kept.push(Node::plugin(
                plugin.clone(),
                schema.add.clone().unwrap_or_default(),
            ));
        }
    }

    server.plugins = kept;
    Ok(())
}
