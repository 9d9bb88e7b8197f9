//! Golden test infrastructure for the Corefile migration engine
//!
//! Each corpus case is a directory holding a `case.json` descriptor, the
//! `input.Corefile` to feed the engine and the expected output. Migration
//! cases compare against `expected.Corefile`; analysis cases compare the
//! rendered notices, one per line, against `expected.notices`.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

pub mod corpus;
pub mod diff;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

pub use corpus::{CaseOperation, CorpusManager, GoldenCase};
pub use diff::{DiffEngine, DiffOptions, DiffResult};
pub use runner::{GoldenTestRunner, TestResult};

/// Golden test error types
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Engine(#[from] corefile_core::Error),

    #[error("Output mismatch: {0}")]
    Mismatch(String),

    #[error("Corpus error: {0}")]
    CorpusError(String),

    #[error("Test failed: {0}")]
    TestFailed(String),
}

pub type Result<T> = std::result::Result<T, GoldenError>;

/// Configuration for golden tests
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Root directory for the test corpus
    pub corpus_dir: PathBuf,

    /// Rewrite expected files with the engine's current output
    pub update_expected: bool,

    pub diff_options: DiffOptions,

    /// Print every result, not only failures
    pub verbose: bool,
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Default for GoldenConfig {
    fn default() -> Self {
        let update_expected = std::env::var("UPDATE_GOLDEN")
            .map(|v| flag(&v))
            .unwrap_or(false);

        Self {
            corpus_dir: PathBuf::from("../../golden-corpus"),
            update_expected,
            diff_options: DiffOptions::default(),
            verbose: false,
        }
    }
}

impl GoldenConfig {
    /// Create config from environment and defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(corpus_dir) = std::env::var("GOLDEN_CORPUS_DIR") {
            config.corpus_dir = PathBuf::from(corpus_dir);
        }

        if let Ok(verbose) = std::env::var("GOLDEN_VERBOSE") {
            config.verbose = flag(&verbose);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.diff_options.colored = false;
        }

        config
    }

    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }
}

/// Macro for defining a golden test over one corpus case
#[macro_export]
macro_rules! golden_test {
    ($name:ident, $case_path:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let runner = GoldenTestRunner::new(GoldenConfig::from_env());
            let result = runner
                .run_test($case_path)
                .unwrap_or_else(|e| panic!("Golden test {} errored: {}", $case_path, e));
            result.print(true);
            assert!(result.passed, "Golden test failed: {}", $case_path);
        }
    };
}

/// Macro for running every corpus case whose path matches a pattern
#[macro_export]
macro_rules! golden_test_batch {
    ($name:ident, $pattern:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let runner = GoldenTestRunner::new(GoldenConfig::from_env());
            runner
                .run_batch($pattern)
                .unwrap_or_else(|e| panic!("Golden test batch {} failed: {}", $pattern, e));
        }
    };
}
