//! Output formatting.

use crate::cli::OutputFormat;
use crate::orchestrator::{FailedFile, FileReport, FixSummary};
use serde::Serialize;

/// JSON report shape.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: &'a [FileReport],
    failed: &'a [FailedFile],
    summary: JsonSummary,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    scanned: usize,
    changed: usize,
    sites: usize,
    failed: usize,
    wrote: bool,
}

/// Formats a run summary for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the full report.
    pub fn format(&self, summary: &FixSummary) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(summary),
            OutputFormat::Json => self.format_json(summary),
            OutputFormat::Machine => self.format_machine(summary),
        }
    }

    /// Formats as human-readable output.
    fn format_human(&self, summary: &FixSummary) -> String {
        let verb = if summary.wrote { "Fixed" } else { "Would fix" };
        let mut output = String::new();

        for file in &summary.files {
            output.push_str(&format!("{}: {}\n", verb, file.path));
            for site in &file.sites {
                output.push_str(&format!(
                    "  {}:{} {}\n",
                    site.line, site.column, site.component
                ));
            }
        }

        if !summary.files.is_empty() {
            output.push('\n');
        }
        output.push_str(&summary_line(summary));
        output.push('\n');
        output
    }

    /// Formats as a single JSON document.
    fn format_json(&self, summary: &FixSummary) -> String {
        let report = JsonReport {
            files: &summary.files,
            failed: &summary.failed,
            summary: JsonSummary {
                scanned: summary.scanned,
                changed: summary.changed_count(),
                sites: summary.site_count(),
                failed: summary.failed.len(),
                wrote: summary.wrote,
            },
        };

        let mut output = serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".into());
        output.push('\n');
        output
    }

    /// Formats as machine-readable output, one line per site.
    fn format_machine(&self, summary: &FixSummary) -> String {
        let tag = if summary.wrote { "FIXED" } else { "WOULD_FIX" };
        let mut output = String::new();

        for file in &summary.files {
            for site in &file.sites {
                output.push_str(&format!(
                    "{} {}:{}:{} {}\n",
                    tag, file.path, site.line, site.column, site.component
                ));
            }
        }
        for failed in &summary.failed {
            output.push_str(&format!("FAILED {} {}\n", failed.path, failed.error));
        }

        output
    }
}

/// Formats the closing summary line.
pub fn summary_line(summary: &FixSummary) -> String {
    let changed = summary.changed_count();
    let file_word = if changed == 1 { "file" } else { "files" };
    let verb = if summary.wrote { "Fixed" } else { "Would fix" };

    format!(
        "{} {} {} ({} scanned, {} failed)",
        verb,
        changed,
        file_word,
        summary.scanned,
        summary.failed.len()
    )
}
