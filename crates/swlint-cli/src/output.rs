//! Output formatting for swlint
//!
//! Supports text (colored terminal) and JSON output formats.

use colored::*;
use serde::Serialize;
use std::path::Path;

use swlint_core::Severity;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Information about a single finding
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticInfo {
    pub rule: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub fixable: bool,
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Fixes applied to this file (fix mode only)
    pub fixed: usize,
    /// Fixes skipped because they conflicted with an earlier fix
    pub skipped: usize,
}

impl FileResult {
    pub fn findings(path: &Path, diagnostics: Vec<DiagnosticInfo>) -> Self {
        Self {
            path: path.display().to_string(),
            diagnostics,
            error: None,
            fixed: 0,
            skipped: 0,
        }
    }

    pub fn error(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            diagnostics: Vec::new(),
            error: Some(error),
            fixed: 0,
            skipped: 0,
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub fixes_applied: usize,
    pub fixes_skipped: usize,
    pub file_errors: usize,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
struct JsonOutput {
    version: String,
    summary: Summary,
    files: Vec<FileResult>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileResult>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Record one processed file and, in text mode, print its findings.
    pub fn add(&mut self, result: FileResult) {
        self.summary.files_processed += 1;
        self.summary.fixes_applied += result.fixed;
        self.summary.fixes_skipped += result.skipped;

        for diagnostic in &result.diagnostics {
            match diagnostic.severity {
                Severity::Error => self.summary.errors += 1,
                Severity::Warn => self.summary.warnings += 1,
                Severity::Off => {}
            }
        }
        if result.error.is_some() {
            self.summary.file_errors += 1;
        }

        if self.format == OutputFormat::Text {
            self.print_file(&result);
        }

        self.results.push(result);
    }

    fn print_file(&self, result: &FileResult) {
        if let Some(error) = &result.error {
            println!("{}", result.path.bold());
            println!("  {} {}", "error".red().bold(), error);
            println!();
            return;
        }

        if result.diagnostics.is_empty() {
            if self.verbose {
                let note = if result.fixed > 0 {
                    format!("{} fixes applied", result.fixed)
                } else {
                    "no findings".to_string()
                };
                println!("{}: {}", result.path, note);
            }
            return;
        }

        println!("{}", result.path.bold());
        for diagnostic in &result.diagnostics {
            let severity = match diagnostic.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warn => "warn".yellow().bold(),
                Severity::Off => "off".normal(),
            };
            println!(
                "  {}:{}  {}  {}  {}",
                diagnostic.line,
                diagnostic.column,
                severity,
                diagnostic.message,
                diagnostic.rule.dimmed()
            );
        }
        println!();
    }

    /// Print the closing summary (text) or the whole payload (JSON).
    pub fn finish(self) -> Summary {
        match self.format {
            OutputFormat::Text => {
                let problems = self.summary.errors + self.summary.warnings;
                if problems > 0 {
                    let line = format!(
                        "{} problems ({} errors, {} warnings)",
                        problems, self.summary.errors, self.summary.warnings
                    );
                    if self.summary.errors > 0 {
                        println!("{}", line.red().bold());
                    } else {
                        println!("{}", line.yellow().bold());
                    }
                } else {
                    println!(
                        "{}",
                        format!("{} files checked, no problems", self.summary.files_processed)
                            .green()
                    );
                }

                if self.summary.fixes_applied > 0 || self.summary.fixes_skipped > 0 {
                    println!(
                        "{} fixes applied, {} skipped as conflicting",
                        self.summary.fixes_applied, self.summary.fixes_skipped
                    );
                }
                if self.summary.file_errors > 0 {
                    println!(
                        "{}",
                        format!("{} files could not be processed", self.summary.file_errors).red()
                    );
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary.clone(),
                    files: self.results,
                };
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("{}: failed to serialize output: {e}", "Error".red()),
                }
            }
        }

        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn info(severity: Severity) -> DiagnosticInfo {
        DiagnosticInfo {
            rule: "state-import".to_string(),
            severity,
            line: 1,
            column: 1,
            message: "message".to_string(),
            fixable: true,
        }
    }

    #[test]
    fn summary_counts_severities() {
        let mut reporter = Reporter::new(OutputFormat::Json, false);
        reporter.add(FileResult::findings(
            &PathBuf::from("a.js"),
            vec![info(Severity::Error), info(Severity::Warn)],
        ));
        reporter.add(FileResult::error(
            &PathBuf::from("b.js"),
            "unreadable".to_string(),
        ));

        let summary = reporter.finish();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.file_errors, 1);
    }

    #[test]
    fn format_from_str() {
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("diff"), None);
    }
}
