//! Output formatting and writing utilities
//!
//! Results go to stdout in the selected format; status messages and
//! notices that accompany a Corefile go to stderr so the Corefile can be
//! piped straight back into a ConfigMap.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use corefile_core::{Notice, Status};
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output values
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format notices, one `Display` line each in human mode
    fn format_notices(&self, notices: &[Notice]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_notices(&self, notices: &[Notice]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(notices
                .iter()
                .map(|notice| format!("{}\n", notice))
                .collect()),
            _ => self.format(&notices),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
    diagnostics: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer over stdout and stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(
            format,
            use_color,
            quiet,
            verbose,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Create an output writer with custom result and diagnostic writers
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
        diagnostics: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
            diagnostics,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn diagnostic(&mut self, content: &str) -> Result<()> {
        writeln!(self.diagnostics, "{}", content)?;
        self.diagnostics.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_verbose() || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.diagnostic(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.diagnostic(&format!("INFO: {}", message))
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.diagnostic(&message.yellow().to_string())
        } else {
            self.diagnostic(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "writing data");

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write notices as the command result
    pub fn notices(&mut self, notices: &[Notice]) -> Result<()> {
        if !self.is_human() {
            return self.data(&notices);
        }

        let rendered = self.format.format_notices(notices)?;
        if self.use_color {
            for (notice, line) in notices.iter().zip(rendered.lines()) {
                self.writeln(&colorize(notice.severity, line))?;
            }
            Ok(())
        } else {
            self.write(&rendered)
        }
    }
}

fn colorize(severity: Status, line: &str) -> String {
    match severity {
        Status::Removed | Status::Unsupported => line.red().to_string(),
        Status::Deprecated | Status::Ignored => line.yellow().to_string(),
        Status::Newdefault => line.cyan().to_string(),
        Status::Current => line.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::capture;
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Notice> {
        vec![
            Notice::option("kubernetes", "upstream", Status::Deprecated, "1.4.0"),
            Notice::plugin("proxy", Status::Deprecated, "1.4.0").replaced_by(Some("forward")),
        ]
    }

    #[test]
    fn test_human_notices() {
        let (mut output, out, _) = capture(OutputFormat::Human, false);
        output.notices(&sample()).unwrap();
        assert_eq!(
            out.contents(),
            "Option \"upstream\" in plugin \"kubernetes\" is deprecated in 1.4.0.\n\
             Plugin \"proxy\" is deprecated in 1.4.0. It is replaced by \"forward\".\n"
        );
    }

    #[test]
    fn test_json_notices() {
        let (mut output, out, _) = capture(OutputFormat::Json, false);
        output.notices(&sample()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(value[0]["option"], "upstream");
        assert_eq!(value[1]["replaced_by"], "forward");
        assert_eq!(value[1]["severity"], "deprecated");
    }

    #[test]
    fn test_yaml_data() {
        let (mut output, out, _) = capture(OutputFormat::Yaml, false);
        output.data(&vec!["1.1.3", "1.2.0"]).unwrap();
        assert_eq!(out.contents(), "- 1.1.3\n- 1.2.0\n");
    }

    #[test]
    fn test_diagnostics_respect_quiet() {
        let (mut output, out, err) = capture(OutputFormat::Human, false);
        output.warning("careful").unwrap();
        output.info("hidden without -v").unwrap();
        assert_eq!(out.contents(), "");
        assert_eq!(err.contents(), "WARNING: careful\n");

        let (mut output, _, err) = capture(OutputFormat::Human, true);
        output.warning("careful").unwrap();
        assert_eq!(err.contents(), "");
    }
}
