//! Relocates `className` out of motion component prop literals.
//!
//! Animation wrappers such as `motion.div` manage the class name themselves,
//! so passing `className` inside the props literal clobbers it. This crate
//! finds those calls and moves the property into a trailing, type-widened
//! override spread:
//!
//! ```
//! use motion_rewriter::{rewrite, RewriteOptions};
//!
//! let source = r#"motion.div({ id: "a", className: x, onClick: f })"#;
//! let result = rewrite(source, &RewriteOptions::default());
//!
//! assert!(result.changed);
//! assert_eq!(
//!     result.rewritten,
//!     r#"motion.div({id: "a", onClick: f, ...({className: x} as any)})"#
//! );
//! ```
//!
//! The pipeline per source text is:
//! - [`lexer`]: tokenize, keeping strings, templates and comments opaque
//! - [`matcher`]: locate call sites with a balanced bracket scan
//! - [`splitter`]: separate the target property from the rest
//! - [`builder`]: render the replacement call
//! - [`rewrite()`]: splice every replacement into the original in one pass

pub mod builder;
pub mod lexer;
pub mod matcher;
pub mod splitter;
mod rewrite;
mod vocabulary;

pub use matcher::{CallSiteMatch, Matcher, Property, PropertyKind};
pub use rewrite::{rewrite, RewriteOptions, RewriteResult, RewrittenSite, DEFAULT_TARGET_PROPERTY};
pub use vocabulary::{ComponentVocabulary, VocabularyError, DEFAULT_NAMESPACE, DEFAULT_TAGS};
