//! Line diffs between expected and actual golden output
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use colored::*;
use similar::{ChangeTag, TextDiff};

/// Options for diff output
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub colored: bool,

    /// Unchanged lines shown around each change
    pub context_lines: usize,

    /// Treat `\r\n` and a missing final newline as insignificant
    pub normalize_line_endings: bool,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            context_lines: 3,
            normalize_line_endings: true,
            max_diff_lines: 100,
        }
    }
}

/// Result of a comparison
#[derive(Debug)]
pub struct DiffResult {
    pub matches: bool,
    pub diff_output: String,
    pub added: usize,
    pub removed: usize,
}

pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn compare(&self, expected: &str, actual: &str) -> DiffResult {
        let expected = self.normalize(expected);
        let actual = self.normalize(actual);

        if expected == actual {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                added: 0,
                removed: 0,
            };
        }

        let text_diff = TextDiff::from_lines(expected.as_str(), actual.as_str());
        let (mut added, mut removed) = (0, 0);
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => removed += 1,
                ChangeTag::Insert => added += 1,
                ChangeTag::Equal => {}
            }
        }

        DiffResult {
            matches: false,
            diff_output: self.render(&text_diff),
            added,
            removed,
        }
    }

    fn normalize(&self, text: &str) -> String {
        if !self.options.normalize_line_endings {
            return text.to_string();
        }
        let mut text = text.replace("\r\n", "\n");
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    fn render<'a>(&self, text_diff: &TextDiff<'a, 'a, 'a, str>) -> String {
        let mut output = String::new();
        let header = "--- expected\n+++ actual\n";
        if self.options.colored {
            output.push_str(&header.bold().to_string());
        } else {
            output.push_str(header);
        }

        let mut line_count = 0;
        for group in text_diff.grouped_ops(self.options.context_lines) {
            for op in group {
                for change in text_diff.iter_changes(&op) {
                    if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                        output.push_str("... (diff truncated) ...\n");
                        return output;
                    }

                    let (sign, line) = match change.tag() {
                        ChangeTag::Delete => ("-", change.to_string_lossy()),
                        ChangeTag::Insert => ("+", change.to_string_lossy()),
                        ChangeTag::Equal => (" ", change.to_string_lossy()),
                    };
                    let rendered = format!("{}{}", sign, line);
                    let rendered = match (self.options.colored, change.tag()) {
                        (true, ChangeTag::Delete) => rendered.red().to_string(),
                        (true, ChangeTag::Insert) => rendered.green().to_string(),
                        _ => rendered,
                    };
                    output.push_str(&rendered);
                    if change.missing_newline() {
                        output.push('\n');
                    }
                    line_count += 1;
                }
            }
        }
        output
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffOptions::default())
    }
}
