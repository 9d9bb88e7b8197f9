//! Property-based testing strategies for generating Corefiles
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

#![cfg(test)]

use crate::corefile::{Corefile, Node, NodeKind, ServerBlock};
use proptest::collection::vec;
use proptest::prelude::*;

/// Strategy for bare words that tokenize back to themselves
pub fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_./:@-][a-z0-9_./:@-]{0,11}"
}

/// Strategy for quoted arguments with embedded spaces and escapes
pub fn quoted_strategy() -> impl Strategy<Value = String> {
    "[a-z {}#]{0,10}".prop_map(|inner| format!("\"{}\"", inner.replace('"', "\\\"")))
}

pub fn arg_strategy() -> impl Strategy<Value = String> {
    prop_oneof![4 => word_strategy(), 1 => quoted_strategy()]
}

/// Strategy for option nodes nested up to three levels
pub fn option_strategy() -> impl Strategy<Value = Node> {
    let leaf = (word_strategy(), vec(arg_strategy(), 0..3))
        .prop_map(|(name, args)| Node::new(NodeKind::Option, name, args));

    leaf.prop_recursive(3, 16, 4, |inner| {
        (word_strategy(), vec(arg_strategy(), 0..3), vec(inner, 0..4)).prop_map(
            |(name, args, children)| Node::new(NodeKind::Option, name, args).with_children(children),
        )
    })
}

pub fn plugin_strategy() -> impl Strategy<Value = Node> {
    (word_strategy(), vec(arg_strategy(), 0..4), vec(option_strategy(), 0..4)).prop_map(
        |(name, args, children)| Node::plugin(name, args).with_children(children),
    )
}

pub fn server_block_strategy() -> impl Strategy<Value = ServerBlock> {
    (vec(word_strategy(), 1..3), vec(plugin_strategy(), 0..6))
        .prop_map(|(keys, plugins)| ServerBlock::new(keys, plugins))
}

pub fn corefile_strategy() -> impl Strategy<Value = Corefile> {
    vec(server_block_strategy(), 0..4).prop_map(Corefile::new)
}

/// Strategy for plugin lines exercising the built-in catalogue's actions
pub fn known_plugin_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("errors"),
        Just("health"),
        Just("kubernetes cluster.local in-addr.arpa ip6.arpa {\n        pods insecure\n        upstream\n        endpoint a b\n        transfer to 10.0.0.1\n    }"),
        Just("proxy . /etc/resolv.conf {\n        protocol https_google\n    }"),
        Just("proxy example.org 1.2.3.4"),
        Just("forward . 8.8.8.8"),
        Just("cache 30"),
        Just("loop"),
        Just("federation cluster.local {\n        prod prod.example.org\n    }"),
        Just("route53 example.org.:Z1Z2"),
    ]
}

/// Strategy for a single root server block built from catalogue plugins
pub fn migratable_corefile_strategy() -> impl Strategy<Value = String> {
    vec(known_plugin_strategy(), 1..8).prop_map(|lines| {
        let mut text = String::from(".:53 {\n");
        for line in lines {
            text.push_str("    ");
            text.push_str(line);
            text.push('\n');
        }
        text.push_str("}\n");
        text
    })
}

/// Strategy for an index into the built-in release list
pub fn release_index_strategy() -> impl Strategy<Value = usize> {
    0..crate::valid_versions().len()
}
