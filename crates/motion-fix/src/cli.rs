//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Moves `className` out of motion component props into a typed override spread.
#[derive(Debug, Parser)]
#[command(name = "motion-fix")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directories to scan [default: components apps/web/components]
    pub roots: Vec<Utf8PathBuf>,

    /// Path to a JSON config file (defaults to ./motion-fix.json if present)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// File extensions to process, repeatable [default: .tsx]
    #[arg(long = "extension")]
    pub extensions: Vec<String>,

    /// Additional directory names to skip
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// Glob patterns to ignore, matched against root-relative paths
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Report what would change without writing files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if any file would change
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Log every scanned file
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    Human,
    /// JSON output.
    Json,
    /// Machine-readable output, one line per rewritten site.
    Machine,
}

impl Args {
    /// Returns whether changed files are written back.
    pub fn writes(&self) -> bool {
        !(self.dry_run || self.check)
    }
}
