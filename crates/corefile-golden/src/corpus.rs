//! Test corpus management for golden tests
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::{GoldenError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CASE_FILE: &str = "case.json";
pub const INPUT_FILE: &str = "input.Corefile";

/// What the engine does with a case's input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOperation {
    Migrate,
    Downgrade,
    Deprecated,
    Unsupported,
}

impl CaseOperation {
    /// Name of the file holding the expected output
    pub fn expected_file(self) -> &'static str {
        match self {
            Self::Migrate | Self::Downgrade => "expected.Corefile",
            Self::Deprecated | Self::Unsupported => "expected.notices",
        }
    }
}

/// A test case in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenCase {
    pub name: String,

    /// Category/group of the test, usually the parent directory
    #[serde(default)]
    pub category: String,

    pub operation: CaseOperation,

    pub from: String,

    pub to: String,

    /// Collect notices while migrating; the text must not change either way
    #[serde(default = "default_true")]
    pub deprecations: bool,

    #[serde(default)]
    pub metadata: CaseMetadata,

    /// Directory the case was loaded from
    #[serde(skip)]
    pub dir: PathBuf,
}

/// Metadata about a test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMetadata {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lower runs first
    #[serde(default)]
    pub priority: i32,

    /// Set when the expected output was last regenerated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for CaseMetadata {
    fn default() -> Self {
        Self {
            description: String::new(),
            tags: Vec::new(),
            enabled: true,
            priority: 0,
            updated_at: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl GoldenCase {
    /// `category/name`, the key used to run a single case
    pub fn id(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.category, self.name)
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_FILE)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.dir.join(self.operation.expected_file())
    }
}

/// Manager for the test corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
}

impl CorpusManager {
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    pub fn corpus_dir(&self) -> &Path {
        &self.corpus_dir
    }

    /// Discover every case under the corpus directory
    pub fn discover_cases(&self) -> Result<Vec<GoldenCase>> {
        if !self.corpus_dir.is_dir() {
            return Err(GoldenError::CorpusError(format!(
                "corpus directory {} does not exist",
                self.corpus_dir.display()
            )));
        }

        let mut cases = Vec::new();
        for entry in WalkDir::new(&self.corpus_dir).follow_links(true) {
            let entry = entry.map_err(|e| GoldenError::CorpusError(e.to_string()))?;
            if entry.file_type().is_file() && entry.file_name() == CASE_FILE {
                cases.push(self.load_case(entry.path())?);
            }
        }

        cases.sort_by(|a, b| {
            a.metadata
                .priority
                .cmp(&b.metadata.priority)
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(cases)
    }

    /// Load the case described by a `case.json` file
    pub fn load_case(&self, path: &Path) -> Result<GoldenCase> {
        let content = fs::read_to_string(path)?;
        let mut case: GoldenCase = serde_json::from_str(&content)?;

        let dir = path
            .parent()
            .ok_or_else(|| GoldenError::CorpusError(format!("{} has no parent", path.display())))?;
        case.dir = dir.to_path_buf();

        if case.category.is_empty() {
            case.category = dir
                .parent()
                .and_then(|p| p.strip_prefix(&self.corpus_dir).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
        }
        Ok(case)
    }

    /// Load a case by its `category/name` id
    pub fn load_by_id(&self, id: &str) -> Result<GoldenCase> {
        self.load_case(&self.corpus_dir.join(id).join(CASE_FILE))
    }

    pub fn read_input(&self, case: &GoldenCase) -> Result<String> {
        Ok(fs::read_to_string(case.input_path())?)
    }

    /// Expected output, or `None` when the case has not been recorded yet
    pub fn read_expected(&self, case: &GoldenCase) -> Result<Option<String>> {
        let path = case.expected_path();
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Replace the expected output and stamp the case's metadata
    pub fn write_expected(&self, case: &mut GoldenCase, output: &str) -> Result<()> {
        write_atomic(&case.expected_path(), output)?;

        case.metadata.updated_at = Some(Utc::now());
        let descriptor = serde_json::to_string_pretty(case)?;
        write_atomic(&case.dir.join(CASE_FILE), &(descriptor + "\n"))
    }

    pub fn filter_by_category(&self, cases: Vec<GoldenCase>, category: &str) -> Vec<GoldenCase> {
        cases
            .into_iter()
            .filter(|c| category == "*" || c.category == category)
            .collect()
    }

    pub fn filter_by_tags(&self, cases: Vec<GoldenCase>, tags: &[String]) -> Vec<GoldenCase> {
        if tags.is_empty() {
            return cases;
        }
        cases
            .into_iter()
            .filter(|c| tags.iter().any(|tag| c.metadata.tags.contains(tag)))
            .collect()
    }

    pub fn filter_enabled(&self, cases: Vec<GoldenCase>) -> Vec<GoldenCase> {
        cases.into_iter().filter(|c| c.metadata.enabled).collect()
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(path).map_err(|e| GoldenError::Io(e.error))?;
    Ok(())
}
