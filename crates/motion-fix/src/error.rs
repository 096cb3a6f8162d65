//! Error types for a fix run.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use motion_rewriter::VocabularyError;
use thiserror::Error;

/// Errors that can occur during a fix run.
///
/// `Read` and `Write` are per-file: they are logged and counted, and the run
/// moves on to the next file. Every other variant aborts the run.
#[derive(Debug, Error, Diagnostic)]
pub enum FixError {
    /// None of the requested roots is an existing directory.
    #[error("no valid input roots")]
    #[diagnostic(
        code(motion_fix::no_roots),
        help("pass one or more existing directories, e.g. `motion-fix src/components`")
    )]
    NoValidRoots,

    /// The config file could not be read.
    #[error("failed to read config file {path}")]
    #[diagnostic(code(motion_fix::config))]
    ConfigRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this tool.
    #[error("invalid config file {path}: {source}")]
    #[diagnostic(code(motion_fix::config))]
    ConfigParse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configured components do not form a usable vocabulary.
    #[error("invalid component vocabulary")]
    #[diagnostic(code(motion_fix::vocabulary))]
    Vocabulary(#[from] VocabularyError),

    /// An `--ignore` pattern is not a valid glob.
    #[error("invalid glob pattern `{pattern}`")]
    #[diagnostic(code(motion_fix::glob))]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The working directory could not be determined.
    #[error("cannot determine the working directory")]
    WorkingDirectory(#[source] std::io::Error),

    /// A source file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten file could not be written back.
    #[error("failed to write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
