//! Structural model of Corefile text
//!
//! A Corefile is a list of server blocks; each block holds plugin nodes,
//! and a plugin's body is a list of option nodes of the same shape.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod lexer;
pub mod parser;
pub mod serializer;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a node sits directly in a server block or inside a plugin body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Plugin,
    Option,
}

/// A plugin or option: name, positional arguments and an optional body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            args,
            children: Vec::new(),
        }
    }

    pub fn plugin(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(NodeKind::Plugin, name, args)
    }

    pub fn option(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(NodeKind::Option, name, args)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Whether a direct child with this name exists
    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }
}

/// One server block: its zone/address keys and its plugins in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerBlock {
    pub keys: Vec<String>,
    pub plugins: Vec<Node>,
}

impl ServerBlock {
    pub fn new(keys: Vec<String>, plugins: Vec<Node>) -> Self {
        Self { keys, plugins }
    }

    /// Zones served by this block, without scheme or port
    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| zone_of(k))
    }

    /// A block keyed only by the root zone
    pub fn is_root(&self) -> bool {
        self.keys.len() == 1 && zone_of(&self.keys[0]) == "."
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }
}

/// Strip a `dns://` scheme and a trailing `:port` from a server key
pub fn zone_of(key: &str) -> &str {
    let key = key.strip_prefix("dns://").unwrap_or(key);
    match key.rsplit_once(':') {
        Some((zone, port))
            if !zone.is_empty() && !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            zone
        }
        _ => key,
    }
}

/// A parsed Corefile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corefile {
    pub servers: Vec<ServerBlock>,
}

impl Corefile {
    pub fn new(servers: Vec<ServerBlock>) -> Self {
        Self { servers }
    }

    /// Parse Corefile text; an empty document has no server blocks
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = lexer::tokenize(text)?;
        parser::Parser::new(tokens).parse()
    }

    /// Canonical text form
    pub fn to_text(&self) -> String {
        serializer::serialize(self)
    }
}

impl FromStr for Corefile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Corefile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
