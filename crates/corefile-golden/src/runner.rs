//! Golden test runner driving the migration engine over corpus cases
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::{
    corpus::{CaseOperation, CorpusManager, GoldenCase},
    diff::DiffEngine,
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use corefile_core::{Analyzer, Migrator, Notice};
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    pub name: String,

    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    pub duration_ms: u64,

    /// Whether the expected output was rewritten
    pub updated: bool,
}

impl TestResult {
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Expected output updated".yellow());
        }
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    diff_engine: DiffEngine,
}

impl GoldenTestRunner {
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);
        let diff_engine = DiffEngine::new(config.diff_options.clone());

        Self {
            config,
            corpus_manager,
            diff_engine,
        }
    }

    /// Run a single case by its `category/name` id
    pub fn run_test(&self, case_id: &str) -> Result<TestResult> {
        let mut case = self.corpus_manager.load_by_id(case_id)?;
        let result = self.run_case(&mut case);

        if self.config.verbose {
            result.print(true);
        }
        Ok(result)
    }

    /// Run every enabled case whose id contains `pattern` (`*` runs all)
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let cases = self
            .corpus_manager
            .filter_enabled(self.corpus_manager.discover_cases()?);

        let selected: Vec<GoldenCase> = cases
            .into_iter()
            .filter(|c| pattern == "*" || c.id().contains(pattern))
            .collect();

        if selected.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No tests found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} tests...\n", selected.len());

        let mut results = Vec::with_capacity(selected.len());
        for mut case in selected {
            let result = self.run_case(&mut case);
            result.print(self.config.verbose);
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.passed).count();
        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            (results.len() - failed).to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} test(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    pub fn list_tests(&self) -> Result<Vec<String>> {
        Ok(self
            .corpus_manager
            .discover_cases()?
            .iter()
            .map(GoldenCase::id)
            .collect())
    }

    fn run_case(&self, case: &mut GoldenCase) -> TestResult {
        let start = Instant::now();
        let outcome = self.execute_case(case);
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok((passed, diff, updated)) => TestResult {
                name: case.id(),
                passed,
                error: (!passed).then(|| "Output mismatch".to_string()),
                diff,
                duration_ms,
                updated,
            },
            Err(e) => TestResult {
                name: case.id(),
                passed: false,
                error: Some(e.to_string()),
                diff: None,
                duration_ms,
                updated: false,
            },
        }
    }

    /// Run the engine and compare with (or record) the expected output
    fn execute_case(&self, case: &mut GoldenCase) -> Result<(bool, Option<String>, bool)> {
        let input = self.corpus_manager.read_input(case)?;
        let actual = perform(case, &input)?;

        match self.corpus_manager.read_expected(case)? {
            Some(expected) => {
                let diff = self.diff_engine.compare(&expected, &actual);
                if diff.matches {
                    Ok((true, None, false))
                } else if self.config.update_expected {
                    self.corpus_manager.write_expected(case, &actual)?;
                    Ok((true, Some(diff.diff_output), true))
                } else {
                    Ok((false, Some(diff.diff_output), false))
                }
            }
            None if self.config.update_expected => {
                self.corpus_manager.write_expected(case, &actual)?;
                Ok((true, None, true))
            }
            None => Err(GoldenError::CorpusError(format!(
                "{} has no {}; run with UPDATE_GOLDEN=1 to record it",
                case.id(),
                case.operation.expected_file()
            ))),
        }
    }
}

/// Output of the engine for one case
pub fn perform(case: &GoldenCase, input: &str) -> Result<String> {
    let output = match case.operation {
        CaseOperation::Migrate => {
            Migrator::builtin().migrate(&case.from, &case.to, input, case.deprecations)?
        }
        CaseOperation::Downgrade => Migrator::builtin().migrate_down(&case.from, &case.to, input)?,
        CaseOperation::Deprecated => {
            render_notices(&Analyzer::builtin().deprecated(&case.from, &case.to, input)?)
        }
        CaseOperation::Unsupported => {
            render_notices(&Analyzer::builtin().unsupported(&case.from, &case.to, input)?)
        }
    };
    Ok(output)
}

fn render_notices(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("{}\n", n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CASE_FILE, INPUT_FILE};
    use std::fs;

    fn corpus_with_case(expected: Option<&str>) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("upgrade/lameduck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(CASE_FILE),
            r#"{"name": "lameduck", "operation": "migrate", "from": "1.6.4", "to": "1.6.5"}"#,
        )
        .unwrap();
        fs::write(dir.join(INPUT_FILE), ".:53 {\n    health\n}\n").unwrap();
        if let Some(expected) = expected {
            fs::write(dir.join("expected.Corefile"), expected).unwrap();
        }
        root
    }

    fn runner(root: &tempfile::TempDir, update: bool) -> GoldenTestRunner {
        let mut config = GoldenConfig::default().with_corpus_dir(root.path());
        config.update_expected = update;
        config.diff_options.colored = false;
        GoldenTestRunner::new(config)
    }

    #[test]
    fn test_runner_passes_matching_case() {
        let root = corpus_with_case(Some(".:53 {\n    health {\n        lameduck 5s\n    }\n}\n"));
        let result = runner(&root, false).run_test("upgrade/lameduck").unwrap();
        assert!(result.passed, "{:?}", result.diff);
        assert_eq!(runner(&root, false).list_tests().unwrap(), vec!["upgrade/lameduck"]);
    }

    #[test]
    fn test_runner_reports_mismatch() {
        let root = corpus_with_case(Some(".:53 {\n    health\n}\n"));
        let result = runner(&root, false).run_test("upgrade/lameduck").unwrap();
        assert!(!result.passed);
        assert!(result.diff.unwrap().contains("+        lameduck 5s"));
    }

    #[test]
    fn test_runner_records_missing_expected() {
        let root = corpus_with_case(None);
        assert!(!runner(&root, false).run_test("upgrade/lameduck").unwrap().passed);

        let result = runner(&root, true).run_test("upgrade/lameduck").unwrap();
        assert!(result.passed && result.updated);
        assert!(runner(&root, false).run_batch("*").is_ok());
    }
}
