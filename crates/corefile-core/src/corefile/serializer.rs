//! Canonical Corefile rendering
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::{Corefile, Node};

const INDENT: &str = "    ";

/// Render a Corefile in canonical form: four spaces per nesting level and a
/// blank line between server blocks
pub fn serialize(corefile: &Corefile) -> String {
    let mut out = String::new();

    for (idx, server) in corefile.servers.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&server.keys.join(" "));
        out.push_str(" {\n");
        for plugin in &server.plugins {
            write_node(&mut out, plugin, 1);
        }
        out.push_str("}\n");
    }

    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push_str(&node.name);
    for arg in &node.args {
        out.push(' ');
        out.push_str(arg);
    }

    if node.children.is_empty() {
        out.push('\n');
        return;
    }

    out.push_str(" {\n");
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
    out.push_str(&indent);
    out.push_str("}\n");
}
