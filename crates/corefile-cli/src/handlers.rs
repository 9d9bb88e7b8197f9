//! Command handlers for CLI subcommands
//!
//! Each handler reads its input, runs one engine operation against the
//! active catalogue and writes the result through the [`OutputWriter`].
//!
//! [`OutputWriter`]: crate::output::OutputWriter

mod analyze;
mod completions;
mod default;
mod downgrade;
mod migrate;
mod utils;
mod versions;

pub use analyze::{handle_deprecated, handle_unsupported};
pub use completions::handle_completions;
pub use default::handle_default;
pub use downgrade::handle_downgrade;
pub use migrate::handle_migrate;
pub use versions::{handle_released, handle_validversions};

#[cfg(test)]
mod test_support {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write a Corefile into a fresh temporary directory
    pub fn corefile(text: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Corefile");
        fs::write(&path, text).unwrap();
        (dir, path)
    }

    pub const PROXY_ERA: &str = r#".:53 {
    errors
    health
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    proxy . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
"#;
}
