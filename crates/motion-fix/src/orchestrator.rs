//! Batch loop over every file under the configured roots.

use crate::cli::Args;
use crate::config::FixConfig;
use crate::error::FixError;
use crate::output::Formatter;
use crate::walk::FileFilter;
use camino::{Utf8Path, Utf8PathBuf};
use motion_rewriter::{rewrite, RewriteOptions};
use serde::Serialize;
use source_text::LineIndex;
use std::collections::HashSet;
use std::fs;

/// A rewritten call site, positioned in the original file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteReport {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// The component constructor, e.g. `motion.div`.
    pub component: String,
}

/// A file that was (or would be) changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Path relative to the working directory where possible.
    pub path: Utf8PathBuf,
    /// Rewritten call sites in source order.
    pub sites: Vec<SiteReport>,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// Path relative to the working directory where possible.
    pub path: Utf8PathBuf,
    /// The error and its causes.
    pub error: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct FixSummary {
    /// Changed files in processing order.
    pub files: Vec<FileReport>,
    /// Files that failed to read or write.
    pub failed: Vec<FailedFile>,
    /// Number of files scanned.
    pub scanned: usize,
    /// Whether changes were written back.
    pub wrote: bool,
}

impl FixSummary {
    /// Number of changed files.
    pub fn changed_count(&self) -> usize {
        self.files.len()
    }

    /// Number of rewritten call sites across all files.
    pub fn site_count(&self) -> usize {
        self.files.iter().map(|file| file.sites.len()).sum()
    }
}

/// Runs a fix pass for `args` and prints the report to stdout.
pub fn run(args: &Args) -> Result<FixSummary, FixError> {
    let cwd = std::env::current_dir()
        .map_err(FixError::WorkingDirectory)
        .and_then(|dir| {
            Utf8PathBuf::try_from(dir)
                .map_err(|err| FixError::WorkingDirectory(err.into_io_error()))
        })?;

    let config = FixConfig::resolve(args, &cwd)?;
    let summary = fix(&config, &cwd)?;

    let formatter = Formatter::new(args.output);
    print!("{}", formatter.format(&summary));

    Ok(summary)
}

/// Rewrites every matching file under the configured roots.
///
/// Paths in the summary are shown relative to `display_base`. A file that
/// fails to read or write is recorded and the batch continues.
pub fn fix(config: &FixConfig, display_base: &Utf8Path) -> Result<FixSummary, FixError> {
    let roots = existing_roots(&config.roots)?;
    let filter = FileFilter::new(config)?;

    let mut summary = FixSummary {
        wrote: config.write,
        ..FixSummary::default()
    };
    let mut seen = HashSet::new();

    for root in roots {
        for path in filter.collect(root) {
            // Overlapping roots yield the same file twice.
            if !seen.insert(path.clone()) {
                continue;
            }

            summary.scanned += 1;
            let shown = display_path(&path, display_base);

            match fix_file(&path, &config.rewrite, config.write) {
                Ok(Some(sites)) => {
                    if config.write {
                        tracing::info!(path = %shown, sites = sites.len(), "fixed");
                    }
                    summary.files.push(FileReport {
                        path: shown,
                        sites,
                    });
                }
                Ok(None) => tracing::debug!(path = %shown, "no call sites"),
                Err(err) => {
                    let error = error_chain(&err);
                    tracing::warn!(path = %shown, %error, "skipping file");
                    summary.failed.push(FailedFile {
                        path: shown,
                        error,
                    });
                }
            }
        }
    }

    Ok(summary)
}

/// Rewrites one file, returning its sites if anything changed.
fn fix_file(
    path: &Utf8Path,
    options: &RewriteOptions,
    write: bool,
) -> Result<Option<Vec<SiteReport>>, FixError> {
    let source = fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_owned(),
        source,
    })?;

    let result = rewrite(&source, options);
    if !result.changed {
        return Ok(None);
    }

    if write {
        fs::write(path, &result.rewritten).map_err(|source| FixError::Write {
            path: path.to_owned(),
            source,
        })?;
    }

    let line_index = LineIndex::new(&source);
    let sites = result
        .sites
        .iter()
        .map(|site| {
            let (line, column) = line_index
                .line_col(site.original.start)
                .unwrap_or_default()
                .one_based();
            SiteReport {
                line,
                column,
                component: site.component.to_string(),
            }
        })
        .collect();

    Ok(Some(sites))
}

/// Keeps the roots that are existing directories, warning about the rest.
fn existing_roots(roots: &[Utf8PathBuf]) -> Result<Vec<&Utf8Path>, FixError> {
    let existing: Vec<&Utf8Path> = roots
        .iter()
        .filter(|root| {
            let is_dir = root.is_dir();
            if !is_dir {
                tracing::warn!(root = %root, "skipping root: not a directory");
            }
            is_dir
        })
        .map(|root| root.as_path())
        .collect();

    if existing.is_empty() {
        return Err(FixError::NoValidRoots);
    }
    Ok(existing)
}

fn display_path(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_owned()
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
