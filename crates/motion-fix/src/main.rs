//! motion-fix: moves `className` out of motion component props.

mod cli;
mod config;
mod error;
mod orchestrator;
mod output;
mod walk;

use clap::Parser;
use cli::Args;
use miette::Result;
use tracing::Level;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let summary = orchestrator::run(&args)?;

    if !summary.failed.is_empty() || (args.check && summary.changed_count() > 0) {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs to stderr so reports on stdout stay parseable.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
