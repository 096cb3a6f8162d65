//! The set of component constructors whose calls are rewritten.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;

/// Namespace the default vocabulary lives under (`motion.div`, ...).
pub const DEFAULT_NAMESPACE: &str = "motion";

/// Tags recognized by default: block and inline text elements, headings,
/// interactive controls, lists, form controls and SVG primitives.
pub const DEFAULT_TAGS: &[&str] = &[
    "div", "span", "section", "article", "header", "footer", "nav", "main", "p", "h1", "h2", "h3",
    "h4", "h5", "h6", "button", "a", "ul", "ol", "li", "form", "input", "textarea", "select",
    "label", "img", "svg", "path", "g", "circle", "rect", "line", "polyline", "polygon", "ellipse",
];

/// Errors from building a vocabulary out of user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    /// A namespace or tag is not a plain identifier.
    #[error("`{name}` is not a valid identifier")]
    InvalidIdentifier {
        /// The offending name.
        name: String,
    },

    /// The tag list is empty, so nothing could ever match.
    #[error("component vocabulary is empty")]
    Empty,
}

/// Recognized component constructors.
///
/// With a namespace, a call site is `<namespace>.<tag>(...)`; without one it
/// is a bare `<tag>(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVocabulary {
    namespace: Option<SmolStr>,
    tags: FxHashSet<SmolStr>,
}

impl Default for ComponentVocabulary {
    fn default() -> Self {
        Self {
            namespace: Some(SmolStr::new_static(DEFAULT_NAMESPACE)),
            tags: DEFAULT_TAGS.iter().map(|&tag| SmolStr::new_static(tag)).collect(),
        }
    }
}

impl ComponentVocabulary {
    /// Builds a vocabulary, validating every name.
    pub fn new<I, S>(namespace: Option<&str>, tags: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let namespace = namespace.map(validated).transpose()?;
        let tags = tags
            .into_iter()
            .map(|tag| validated(tag.as_ref()))
            .collect::<Result<FxHashSet<_>, _>>()?;

        if tags.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self { namespace, tags })
    }

    /// Adds more tags to the vocabulary.
    pub fn extend<I, S>(&mut self, tags: I) -> Result<(), VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.tags.insert(validated(tag.as_ref())?);
        }
        Ok(())
    }

    /// Returns the namespace, if call sites are namespaced.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns true if `tag` is a recognized component tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

fn validated(name: &str) -> Result<SmolStr, VocabularyError> {
    if is_identifier(name) {
        Ok(SmolStr::new(name))
    } else {
        Err(VocabularyError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
