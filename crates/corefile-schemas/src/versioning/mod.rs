//! Release identifiers and the ordered release manifest
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod builtin;
pub mod manifest;
pub mod version;

pub use manifest::{PluginTemplate, PostProcess, Release, VersionManifest};
pub use version::CoreDnsVersion;
