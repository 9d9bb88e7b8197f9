//! Default command handler

use super::utils::read_corefile;
use crate::cli::DefaultArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use corefile_core::DefaultDetector;
use corefile_schemas::Catalog;
use serde::Serialize;

#[derive(Serialize)]
struct DefaultOutput<'a> {
    default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    k8s_version: Option<&'a str>,
}

/// Handle the default command
///
/// Without `--k8s-version` (or a configured one) the Corefile is compared
/// against the default of every known release.
pub fn handle_default(
    args: DefaultArgs,
    config: &Config,
    catalog: &Catalog,
    output: &mut OutputWriter,
) -> Result<()> {
    let k8s_version = args
        .k8s_version
        .or_else(|| config.migration.k8s_version.clone())
        .unwrap_or_default();

    let text = read_corefile(&args.corefile)?;
    let default = DefaultDetector::new(catalog).is_default(&k8s_version, &text);
    tracing::info!(k8s_version = %k8s_version, default, "default check finished");

    if output.is_human() {
        output.writeln(if default { "true" } else { "false" })
    } else {
        output.data(&DefaultOutput {
            default,
            k8s_version: Some(k8s_version.as_str()).filter(|v| !v.is_empty()),
        })
    }
}
