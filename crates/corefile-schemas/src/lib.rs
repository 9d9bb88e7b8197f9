//! Corefile Schemas - versioned CoreDNS plugin schemas and release catalogue
//!
//! This crate holds the data the migration engine interprets:
//! - **PluginSchema**: recognized options, lifecycle status and transforms of
//!   one plugin at one schema revision
//! - **VersionManifest**: the ordered CoreDNS releases, which revision of each
//!   plugin they recognize, their default Corefile and Kubernetes pairing
//!
//! Transforms are closed enums (`PluginAction`, `OptionAction`), so a
//! catalogue can be written out as YAML or JSON and loaded back.
//!
//! ## Quick Start
//!
//! ```rust
//! use corefile_schemas::{match_option, Catalog};
//!
//! let catalog = Catalog::builtin();
//! let release = catalog.release("1.6.5").unwrap();
//! let health = catalog.schema(release, "health").unwrap();
//! assert!(match_option("lameduck", health).is_some());
//! ```
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod error;
pub mod registry;
pub mod versioning;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use registry::{
    match_option, OptionAction, OptionDescriptor, OptionMatch, OptionPattern, PatternOption,
    PluginAction, PluginRegistry, PluginSchema, Status,
};
pub use versioning::{CoreDnsVersion, PluginTemplate, PostProcess, Release, VersionManifest};
