//! Source file discovery.

use crate::config::FixConfig;
use crate::error::FixError;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

/// Decides which files under a root are processed.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    ignore: GlobSet,
}

impl FileFilter {
    /// Builds the filter, compiling the ignore patterns.
    pub fn new(config: &FixConfig) -> Result<Self, FixError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.ignore {
            let glob = Glob::new(pattern).map_err(|source| FixError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }

        let ignore = builder.build().map_err(|source| FixError::InvalidGlob {
            pattern: config.ignore.join(", "),
            source,
        })?;

        Ok(Self {
            extensions: config.extensions.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            ignore,
        })
    }

    /// Returns every matching file under `root`, sorted by path.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn collect(&self, root: &Utf8Path) -> Vec<Utf8PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| match Utf8PathBuf::try_from(entry.into_path()) {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(path = %err.as_path().display(), "skipping non-UTF-8 path");
                    None
                }
            })
            .filter(|path| self.has_extension(path))
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path);
                !self.ignore.is_match(relative.as_str())
            })
            .collect()
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|dir| dir == name))
    }

    fn has_extension(&self, path: &Utf8Path) -> bool {
        let file_name = path.file_name().unwrap_or("");
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}
