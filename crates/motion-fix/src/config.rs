//! Configuration loading.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional `motion-fix.json` file, and command-line flags. List-valued
//! exclusions and ignore patterns accumulate across layers instead.

use crate::cli::Args;
use crate::error::FixError;
use camino::{Utf8Path, Utf8PathBuf};
use motion_rewriter::{
    ComponentVocabulary, RewriteOptions, DEFAULT_NAMESPACE, DEFAULT_TAGS, DEFAULT_TARGET_PROPERTY,
};
use serde::Deserialize;
use std::fs;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "motion-fix.json";

/// Roots scanned when none are given on the command line.
pub const DEFAULT_ROOTS: &[&str] = &["components", "apps/web/components"];

/// Extensions processed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".tsx"];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".next", "dist", "out", ".git"];

/// Contents of a `motion-fix.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    /// Namespace of the component constructors. An empty string matches bare tags.
    pub namespace: Option<String>,
    /// Replaces the default tag list.
    pub components: Option<Vec<String>>,
    /// Added to the tag list.
    pub extra_components: Vec<String>,
    /// Property to relocate instead of `className`.
    pub target_property: Option<String>,
    /// Replaces the default extensions.
    pub extensions: Option<Vec<String>>,
    /// Added to the default excluded directories.
    pub exclude_dirs: Vec<String>,
    /// Glob patterns to ignore.
    pub ignore: Vec<String>,
}

impl FileConfig {
    /// Loads and parses a config file.
    pub fn load(path: &Utf8Path) -> Result<Self, FixError> {
        let content = fs::read_to_string(path).map_err(|source| FixError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| FixError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Finds the config file to use, if any.
    ///
    /// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] in `cwd`
    /// is used when present.
    pub fn discover(
        explicit: Option<&Utf8Path>,
        cwd: &Utf8Path,
    ) -> Result<Option<(Utf8PathBuf, Self)>, FixError> {
        let path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    return Ok(None);
                }
                candidate
            }
        };

        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Directories to scan, resolved against the working directory.
    pub roots: Vec<Utf8PathBuf>,
    /// Call-site vocabulary and target property.
    pub rewrite: RewriteOptions,
    /// File extensions to process, each with a leading dot.
    pub extensions: Vec<String>,
    /// Directory names to skip.
    pub exclude_dirs: Vec<String>,
    /// Glob patterns to ignore.
    pub ignore: Vec<String>,
    /// Whether changed files are written back.
    pub write: bool,
}

impl FixConfig {
    /// Resolves the settings for `args`, loading the config file if there is one.
    pub fn resolve(args: &Args, cwd: &Utf8Path) -> Result<Self, FixError> {
        let file = match FileConfig::discover(args.config.as_deref(), cwd)? {
            Some((path, file)) => {
                tracing::debug!(%path, "loaded config file");
                file
            }
            None => FileConfig::default(),
        };

        Self::merge(args, file, cwd)
    }

    /// Layers `args` over `file` over the defaults.
    pub fn merge(args: &Args, file: FileConfig, cwd: &Utf8Path) -> Result<Self, FixError> {
        let roots = if args.roots.is_empty() {
            DEFAULT_ROOTS.iter().map(|root| cwd.join(root)).collect()
        } else {
            args.roots.iter().map(|root| cwd.join(root)).collect()
        };

        let namespace = match file.namespace.as_deref() {
            None => Some(DEFAULT_NAMESPACE),
            Some("") => None,
            Some(namespace) => Some(namespace),
        };
        let mut vocabulary = match &file.components {
            Some(components) => ComponentVocabulary::new(namespace, components)?,
            None => ComponentVocabulary::new(namespace, DEFAULT_TAGS)?,
        };
        vocabulary.extend(&file.extra_components)?;

        let target_property = file
            .target_property
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_PROPERTY);

        let extensions = if !args.extensions.is_empty() {
            args.extensions.iter().map(|ext| normalize_extension(ext)).collect()
        } else if let Some(extensions) = &file.extensions {
            extensions.iter().map(|ext| normalize_extension(ext)).collect()
        } else {
            DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
        };

        let mut exclude_dirs: Vec<String> =
            DEFAULT_EXCLUDE_DIRS.iter().map(|dir| dir.to_string()).collect();
        for dir in file.exclude_dirs.iter().chain(&args.exclude_dirs) {
            if !exclude_dirs.contains(dir) {
                exclude_dirs.push(dir.clone());
            }
        }

        let ignore = file
            .ignore
            .into_iter()
            .chain(args.ignore.iter().cloned())
            .collect();

        Ok(Self {
            roots,
            rewrite: RewriteOptions {
                vocabulary,
                target_property: target_property.into(),
            },
            extensions,
            exclude_dirs,
            ignore,
            write: args.writes(),
        })
    }
}

/// Ensures an extension starts with a dot, so `tsx` and `.tsx` are equivalent.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("motion-fix").chain(argv.iter().copied()))
    }

    fn cwd() -> &'static Utf8Path {
        Utf8Path::new("/project")
    }

    #[test]
    fn test_defaults() {
        let config = FixConfig::merge(&args(&[]), FileConfig::default(), cwd()).unwrap();
        assert_eq!(
            config.roots,
            [
                Utf8PathBuf::from("/project/components"),
                Utf8PathBuf::from("/project/apps/web/components"),
            ]
        );
        assert_eq!(config.extensions, [".tsx"]);
        assert_eq!(config.exclude_dirs, DEFAULT_EXCLUDE_DIRS);
        assert!(config.ignore.is_empty());
        assert!(config.write);
        assert_eq!(config.rewrite, RewriteOptions::default());
    }

    #[test]
    fn test_cli_roots_replace_defaults() {
        let config =
            FixConfig::merge(&args(&["src/ui", "/abs/lib"]), FileConfig::default(), cwd()).unwrap();
        assert_eq!(
            config.roots,
            [
                Utf8PathBuf::from("/project/src/ui"),
                Utf8PathBuf::from("/abs/lib"),
            ]
        );
    }

    #[test]
    fn test_parse_file_config() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "namespace": "m",
                "extraComponents": ["table"],
                "targetProperty": "class",
                "extensions": ["tsx", ".jsx"],
                "excludeDirs": ["storybook-static"],
                "ignore": ["**/*.test.tsx"]
            }"#,
        )
        .unwrap();

        assert_eq!(file.namespace.as_deref(), Some("m"));
        assert_eq!(file.components, None);
        assert_eq!(file.extra_components, ["table"]);

        let config = FixConfig::merge(&args(&["--dry-run"]), file, cwd()).unwrap();
        assert_eq!(config.rewrite.vocabulary.namespace(), Some("m"));
        assert!(config.rewrite.vocabulary.contains("table"));
        assert!(config.rewrite.vocabulary.contains("div"));
        assert_eq!(config.rewrite.target_property, "class");
        assert_eq!(config.extensions, [".tsx", ".jsx"]);
        assert!(config.exclude_dirs.iter().any(|d| d == "storybook-static"));
        assert!(config.exclude_dirs.iter().any(|d| d == "node_modules"));
        assert_eq!(config.ignore, ["**/*.test.tsx"]);
        assert!(!config.write);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = serde_json::from_str::<FileConfig>(r#"{ "nameSpace": "m" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_namespace_matches_bare_tags() {
        let file = FileConfig {
            namespace: Some(String::new()),
            components: Some(vec!["Box".to_string()]),
            ..FileConfig::default()
        };
        let config = FixConfig::merge(&args(&[]), file, cwd()).unwrap();
        assert_eq!(config.rewrite.vocabulary.namespace(), None);
        assert!(config.rewrite.vocabulary.contains("Box"));
        assert!(!config.rewrite.vocabulary.contains("div"));
    }

    #[test]
    fn test_invalid_component_is_an_error() {
        let file = FileConfig {
            extra_components: vec!["not a tag".to_string()],
            ..FileConfig::default()
        };
        let err = FixConfig::merge(&args(&[]), file, cwd()).unwrap_err();
        assert!(matches!(err, FixError::Vocabulary(_)));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            extensions: Some(vec![".jsx".to_string()]),
            exclude_dirs: vec!["fixtures".to_string()],
            ignore: vec!["a/**".to_string()],
            ..FileConfig::default()
        };
        let config = FixConfig::merge(
            &args(&[
                "--extension",
                "mtsx",
                "--exclude-dir",
                "fixtures",
                "--exclude-dir",
                "tmp",
                "--ignore",
                "b/**",
            ]),
            file,
            cwd(),
        )
        .unwrap();

        assert_eq!(config.extensions, [".mtsx"]);
        let extra: Vec<&str> = config.exclude_dirs[DEFAULT_EXCLUDE_DIRS.len()..]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(extra, ["fixtures", "tmp"]);
        assert_eq!(config.ignore, ["a/**", "b/**"]);
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        assert!(FileConfig::discover(None, root).unwrap().is_none());

        fs::write(root.join(CONFIG_FILE_NAME), r#"{ "namespace": "m" }"#).unwrap();
        let (path, file) = FileConfig::discover(None, root).unwrap().unwrap();
        assert_eq!(path, root.join(CONFIG_FILE_NAME));
        assert_eq!(file.namespace.as_deref(), Some("m"));

        fs::write(root.join("broken.json"), "{ namespace: ").unwrap();
        let err = FileConfig::discover(Some(Utf8Path::new("broken.json")), root).unwrap_err();
        assert!(matches!(err, FixError::ConfigParse { .. }));

        let err = FileConfig::discover(Some(Utf8Path::new("missing.json")), root).unwrap_err();
        assert!(matches!(err, FixError::ConfigRead { .. }));
    }
}
