//! Deprecated and unsupported command handlers

use super::utils::read_corefile;
use crate::cli::RangeArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use corefile_core::{AnalysisMode, Analyzer};
use corefile_schemas::Catalog;

/// Handle the deprecated command
pub fn handle_deprecated(args: RangeArgs, catalog: &Catalog, output: &mut OutputWriter) -> Result<()> {
    analyze(args, catalog, AnalysisMode::Deprecated, output)
}

/// Handle the unsupported command
pub fn handle_unsupported(args: RangeArgs, catalog: &Catalog, output: &mut OutputWriter) -> Result<()> {
    analyze(args, catalog, AnalysisMode::Unsupported, output)
}

fn analyze(
    args: RangeArgs,
    catalog: &Catalog,
    mode: AnalysisMode,
    output: &mut OutputWriter,
) -> Result<()> {
    output.info(&format!("Analyzing {} from {} to {}", args.corefile.display(), args.from, args.to))?;

    let timer = Timer::with_details("analyze", &format!("{:?} {} -> {}", mode, args.from, args.to));
    let _span = timer.span().enter();

    let text = read_corefile(&args.corefile)?;
    let notices = Analyzer::new(catalog).analyze(&args.from, &args.to, &text, mode)?;
    tracing::info!(
        ?mode,
        count = notices.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "analysis finished"
    );

    output.notices(&notices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::handlers::test_support::{corefile, PROXY_ERA};
    use crate::output::testing::capture;
    use pretty_assertions::assert_eq;

    fn range(from: &str, to: &str, path: std::path::PathBuf) -> RangeArgs {
        RangeArgs {
            from: from.to_string(),
            to: to.to_string(),
            corefile: path,
        }
    }

    #[test]
    fn test_deprecated_lines() {
        let (_dir, path) = corefile(PROXY_ERA);
        let (mut output, out, _) = capture(OutputFormat::Human, false);

        handle_deprecated(range("1.2.0", "1.5.0", path), Catalog::builtin(), &mut output).unwrap();

        assert_eq!(
            out.contents(),
            "Option \"upstream\" in plugin \"kubernetes\" is deprecated in 1.4.0.\n\
             Plugin \"proxy\" is deprecated in 1.4.0. It is replaced by \"forward\".\n\
             Option \"upstream\" in plugin \"kubernetes\" is ignored in 1.5.0.\n\
             Plugin \"proxy\" is removed in 1.5.0. It is replaced by \"forward\".\n\
             Plugin \"ready\" is added as a default in 1.5.0.\n"
        );
    }

    #[test]
    fn test_unsupported_same_version() {
        let text = PROXY_ERA.replace("    cache 30\n", "    route53 example.org.:Z1Z2\n    cache 30\n");
        let (_dir, path) = corefile(&text);
        let (mut output, out, _) = capture(OutputFormat::Human, false);

        handle_unsupported(range("1.3.1", "1.3.1", path), Catalog::builtin(), &mut output).unwrap();

        assert_eq!(
            out.contents(),
            "Plugin \"route53\" is unsupported by this migration tool in 1.3.1.\n"
        );
    }

    #[test]
    fn test_serialized_notices() {
        let (_dir, path) = corefile(PROXY_ERA);
        let (mut output, out, _) = capture(OutputFormat::Yaml, false);

        handle_deprecated(range("1.3.1", "1.4.0", path), Catalog::builtin(), &mut output).unwrap();

        let notices: Vec<corefile_core::Notice> = serde_yaml::from_str(&out.contents()).unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].replaced_by.as_deref(), Some("forward"));
    }
}
