//! Stub-zone fan-out of `forward` instances into their own server blocks
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::corefile::{Corefile, Node, ServerBlock};
use crate::error::{Error, Result};
use corefile_schemas::VersionManifest;
use tracing::{trace, warn};

const FORWARD: &str = "forward";

/// Move each root-block `forward` for a zone other than `.` into a new
/// server block for that zone
///
/// New blocks hold `forward . <upstreams>` followed by the manifest's stub
/// zone plugins and are appended after the existing blocks in the order the
/// instances appeared.
pub(crate) fn split_stub_forwards(
    manifest: &VersionManifest,
    corefile: &mut Corefile,
    version: &str,
) -> Result<()> {
    let mut stub_blocks = Vec::new();

    for server in &mut corefile.servers {
        let has_stubs = server
            .plugins
            .iter()
            .any(|p| p.name == FORWARD && p.first_arg() != Some("."));
        if !has_stubs {
            continue;
        }
        if !server.is_root() {
            warn!(keys = ?server.keys, version, "leaving stub zone forwards in a non-root server block");
            continue;
        }

        let mut kept = Vec::with_capacity(server.plugins.len());
        for plugin in std::mem::take(&mut server.plugins) {
            if plugin.name != FORWARD {
                kept.push(plugin);
                continue;
            }

            let mut args = plugin.args.into_iter();
            match args.next() {
                None => {
                    return Err(Error::migration(format!(
                        "{} plugin in server block '{}' has no arguments",
                        FORWARD,
                        server.keys.join(" ")
                    )))
                }
                Some(zone) if zone == "." => {
                    let mut restored = vec![zone];
                    restored.extend(args);
                    kept.push(Node::plugin(FORWARD, restored).with_children(plugin.children));
                }
                Some(zone) => {
                    trace!(zone = %zone, version, "splitting stub zone into its own server block");
                    let mut upstreams = vec![".".to_string()];
                    upstreams.extend(args);

                    let mut plugins =
                        vec![Node::plugin(FORWARD, upstreams).with_children(plugin.children)];
                    plugins.extend(
                        manifest
                            .stub_zone_plugins
                            .iter()
                            .map(|t| Node::plugin(t.name.clone(), t.args.clone())),
                    );
                    stub_blocks.push(ServerBlock::new(vec![zone], plugins));
                }
            }
        }
        server.plugins = kept;
    }

    corefile.servers.extend(stub_blocks);
    Ok(())
}
