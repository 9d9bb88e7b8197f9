//! Release lookup command handlers

use crate::cli::ReleasedArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use corefile_schemas::Catalog;
use serde::Serialize;

#[derive(Serialize)]
struct VersionsOutput {
    versions: Vec<String>,
}

#[derive(Serialize)]
struct ReleasedOutput<'a> {
    digest: &'a str,
    released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

/// Handle the validversions command
pub fn handle_validversions(catalog: &Catalog, output: &mut OutputWriter) -> Result<()> {
    let versions = catalog.manifest.versions();

    if output.is_human() {
        output.writeln("The following are valid CoreDNS versions:")?;
        output.writeln(&versions.join(", "))
    } else {
        output.data(&VersionsOutput { versions })
    }
}

/// Handle the released command
pub fn handle_released(args: ReleasedArgs, catalog: &Catalog, output: &mut OutputWriter) -> Result<()> {
    let digest = args.docker_image_sha.trim_start_matches("sha256:");
    let version = catalog
        .manifest
        .by_digest(digest)
        .map(|release| release.version.to_string());
    tracing::info!(digest, version = ?version, "image digest lookup");

    if output.is_human() {
        let verdict = if version.is_some() { "valid" } else { "invalid" };
        output.writeln(&format!("The docker image SHA is {}", verdict))
    } else {
        output.data(&ReleasedOutput {
            digest,
            released: version.is_some(),
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::testing::capture;
    use pretty_assertions::assert_eq;

    const DIGEST_1_7_0: &str = "73ca82b4ce829766d4f1f10947c3a338888f876fbed0540dc849c89ff256e90c";

    fn released(sha: &str, format: OutputFormat) -> String {
        let (mut output, out, _) = capture(format, false);
        let args = ReleasedArgs {
            docker_image_sha: sha.to_string(),
        };
        handle_released(args, Catalog::builtin(), &mut output).unwrap();
        out.contents()
    }

    #[test]
    fn test_validversions() {
        let (mut output, out, _) = capture(OutputFormat::Human, false);
        handle_validversions(Catalog::builtin(), &mut output).unwrap();

        let contents = out.contents();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("The following are valid CoreDNS versions:"));
        let versions = lines.next().unwrap();
        assert!(versions.starts_with("1.1.3, 1.1.4, 1.2.0, "));
        assert!(versions.ends_with(", 1.8.4"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_released() {
        assert_eq!(released("12345", OutputFormat::Human), "The docker image SHA is invalid\n");
        assert_eq!(released(DIGEST_1_7_0, OutputFormat::Human), "The docker image SHA is valid\n");
        assert_eq!(
            released(&format!("sha256:{}", DIGEST_1_7_0), OutputFormat::Human),
            "The docker image SHA is valid\n"
        );
    }

    #[test]
    fn test_released_json() {
        let value: serde_json::Value =
            serde_json::from_str(&released(DIGEST_1_7_0, OutputFormat::Json)).unwrap();
        assert_eq!(value["released"], true);
        assert_eq!(value["version"], "1.7.0");

        let value: serde_json::Value =
            serde_json::from_str(&released("12345", OutputFormat::Json)).unwrap();
        assert_eq!(value["released"], false);
        assert!(value.get("version").is_none());
    }
}
