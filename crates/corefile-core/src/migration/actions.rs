//! Interpreters for option-level actions
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::corefile::Node;
use crate::error::{Direction, Error, Result};
use crate::notice::Notice;
use corefile_schemas::{match_option, OptionAction, PluginSchema, Status};
use tracing::trace;

/// Optional sink for notices describing applied changes
pub(crate) struct Changes<'a> {
    sink: Option<&'a mut Vec<Notice>>,
}

impl<'a> Changes<'a> {
    pub(crate) fn new(sink: Option<&'a mut Vec<Notice>>) -> Self {
        Self { sink }
    }

    pub(crate) fn record(&mut self, notice: impl FnOnce() -> Notice) {
        if let Some(sink) = self.sink.as_mut() {
            sink.push(notice());
        }
    }
}

/// Apply the option actions of `schema` to a plugin's body
///
/// Returns the plugins produced by options promoted out of the body, in the
/// order their options appeared.
pub(crate) fn apply_option_actions(
    plugin: &mut Node,
    schema: &PluginSchema,
    direction: Direction,
    fallback_zone: &str,
    version: &str,
    changes: &mut Changes<'_>,
) -> Result<Vec<Node>> {
    let plugin_name = plugin.name.clone();
    let host_zone = plugin.first_arg().unwrap_or(fallback_zone).to_string();
    let mut kept = Vec::with_capacity(plugin.children.len());
    let mut promoted = Vec::new();

    for mut option in std::mem::take(&mut plugin.children) {
        let descriptor = match match_option(&option.name, schema) {
            Some(m) => m.descriptor.clone(),
            None => {
                kept.push(option);
                continue;
            }
        };
        let action = match direction {
            Direction::Upgrade => descriptor.action.as_ref(),
            Direction::Downgrade => descriptor.down_action.as_ref(),
        };
        let Some(action) = action else {
            kept.push(option);
            continue;
        };

        let severity = match (direction, descriptor.status) {
            (Direction::Downgrade, _) | (_, Status::Current) => Status::Removed,
            (_, status) => status,
        };
        let applied = |changes: &mut Changes<'_>, option: &Node| {
            trace!(plugin = %plugin_name, option = %option.name, version, ?action, "applying option action");
            changes.record(|| {
                Notice::option(&plugin_name, &option.name, severity, version)
                    .replaced_by(descriptor.replaced_by.as_deref())
            });
        };

        match action {
            OptionAction::Remove => applied(changes, &option),
            OptionAction::UseFirstArgumentOnly => {
                if option.args.len() > 1 {
                    applied(changes, &option);
                    option.args.truncate(1);
                }
                kept.push(option);
            }
            OptionAction::RemoveWhenFirstArgument { value } => {
                if option.first_arg() == Some(value.as_str()) {
                    applied(changes, &option);
                } else {
                    kept.push(option);
                }
            }
            OptionAction::Rename { to } => {
                if option.name != *to {
                    applied(changes, &option);
                    option.name = to.clone();
                }
                kept.push(option);
            }
            OptionAction::PromoteToPlugin { plugin: target } => {
                applied(changes, &option);
                promoted.push(promote(option, target, &host_zone)?);
            }
        }
    }

    plugin.children = kept;
    Ok(promoted)
}

/// Turn `option a b c` into `target zone { a b c }`
fn promote(option: Node, target: &str, zone: &str) -> Result<Node> {
    let mut args = option.args.into_iter();
    let Some(name) = args.next() else {
        return Err(Error::migration(format!(
            "option '{}' has no arguments to promote into plugin '{}'",
            option.name, target
        )));
    };

    let child = Node::option(name, args.collect()).with_children(option.children);
    Ok(Node::plugin(target, vec![zone.to_string()]).with_children(vec![child]))
}

/// Append promoted plugins, folding each into an existing plugin with the
/// same name and arguments
pub(crate) fn merge_promoted(plugins: &mut Vec<Node>, promoted: Vec<Node>) {
    for node in promoted {
        match plugins
            .iter_mut()
            .find(|p| p.name == node.name && p.args == node.args)
        {
            Some(existing) => existing.children.extend(node.children),
            None => plugins.push(node),
        }
    }
}

/// Fold a plugin's body back into options named `option` on a host plugin
pub(crate) fn demote(plugin: Node, option: &str) -> Vec<Node> {
    plugin
        .children
        .into_iter()
        .map(|child| {
            let mut args = Vec::with_capacity(child.args.len() + 1);
            args.push(child.name);
            args.extend(child.args);
            Node::option(option, args).with_children(child.children)
        })
        .collect()
}

/// Synthesize new default options missing from a plugin's body
pub(crate) fn add_new_default_options(
    plugin: &mut Node,
    schema: &PluginSchema,
    version: &str,
    changes: &mut Changes<'_>,
) {
    for (name, descriptor) in schema.new_default_options() {
        if plugin.has_child(name) {
            continue;
        }
        trace!(plugin = %plugin.name, option = name, version, "adding default option");
        changes.record(|| Notice::option(&plugin.name, name, Status::Newdefault, version));
        plugin
            .children
            .push(Node::option(name, descriptor.add.clone().unwrap_or_default()));
    }
}
