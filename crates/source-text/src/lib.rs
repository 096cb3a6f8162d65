//! Source text utilities for motion-fix.
//!
//! Rewrites never mutate the text they were located in. Spans are collected
//! against the original source first, then a [`Splicer`] copies the untouched
//! regions and substitutes replacements in one left-to-right pass, recording
//! an [`Edit`] per substitution so callers can report where each rewrite
//! landed.

mod line_index;
mod span;
mod splice;

pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
pub use splice::{Edit, Spliced, Splicer};
