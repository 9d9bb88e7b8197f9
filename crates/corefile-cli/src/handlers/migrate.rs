//! Migrate command handler

use super::utils::read_corefile;
use crate::cli::MigrateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use corefile_core::{MigrationReport, Migrator};
use corefile_schemas::Catalog;

/// Handle the migrate command
///
/// In human mode the migrated Corefile is the only thing on stdout; the
/// notices for the applied changes go to stderr.
pub fn handle_migrate(
    args: MigrateArgs,
    config: &Config,
    catalog: &Catalog,
    output: &mut OutputWriter,
) -> Result<()> {
    let range = args.range;
    let deprecations = args.deprecations.unwrap_or(config.migration.deprecations);
    output.info(&format!("Migrating {} from {} to {}", range.corefile.display(), range.from, range.to))?;

    let timer = Timer::with_details("migrate", &format!("{} -> {}", range.from, range.to));
    let _span = timer.span().enter();

    let text = read_corefile(&range.corefile)?;
    let migrator = Migrator::new(catalog);

    let report = if deprecations {
        migrator.migrate_with_report(&range.from, &range.to, &text)?
    } else {
        MigrationReport {
            corefile: migrator.migrate(&range.from, &range.to, &text, false)?,
            notices: Vec::new(),
        }
    };
    tracing::info!(
        notices = report.notices.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "migration finished"
    );

    if !output.is_human() {
        return output.data(&report);
    }

    output.write(&report.corefile)?;
    for notice in &report.notices {
        output.warning(&notice.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{OutputFormat, RangeArgs};
    use crate::handlers::test_support::{corefile, PROXY_ERA};
    use crate::output::testing::capture;

    fn args(path: std::path::PathBuf, deprecations: Option<bool>) -> MigrateArgs {
        MigrateArgs {
            range: RangeArgs {
                from: "1.3.1".to_string(),
                to: "1.5.0".to_string(),
                corefile: path,
            },
            deprecations,
        }
    }

    #[test]
    fn test_migrate_human() {
        let (_dir, path) = corefile(PROXY_ERA);
        let (mut output, out, err) = capture(OutputFormat::Human, false);

        handle_migrate(args(path, None), &Config::default(), Catalog::builtin(), &mut output).unwrap();

        let migrated = out.contents();
        assert!(migrated.contains("    forward . /etc/resolv.conf\n"));
        assert!(migrated.ends_with("    ready\n}\n"));
        assert!(!migrated.contains("proxy"));
        assert!(err
            .contents()
            .contains("WARNING: Plugin \"proxy\" is deprecated in 1.4.0. It is replaced by \"forward\".\n"));
    }

    #[test]
    fn test_deprecations_flag_overrides_config() {
        let (_dir, path) = corefile(PROXY_ERA);
        let (mut output, out, err) = capture(OutputFormat::Human, false);

        handle_migrate(args(path, Some(false)), &Config::default(), Catalog::builtin(), &mut output)
            .unwrap();

        assert!(out.contents().contains("forward"));
        assert_eq!(err.contents(), "");
    }

    #[test]
    fn test_migrate_json_report() {
        let (_dir, path) = corefile(PROXY_ERA);
        let (mut output, out, _) = capture(OutputFormat::Json, false);

        handle_migrate(args(path, None), &Config::default(), Catalog::builtin(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert!(value["corefile"].as_str().unwrap().contains("forward"));
        assert!(!value["notices"].as_array().unwrap().is_empty());
    }
}
