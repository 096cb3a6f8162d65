//! Byte spans into source text.

use std::ops::Range;
use text_size::TextSize;

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from a `usize` range, as produced by lexers.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }

    /// Returns the span as a `usize` range for slicing.
    #[inline]
    pub fn range(self) -> Range<usize> {
        u32::from(self.start) as usize..u32::from(self.end) as usize
    }

    /// Returns the text this span covers in `source`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds or not on a char boundary, exactly
    /// like slicing a `str`.
    #[inline]
    pub fn slice(self, source: &str) -> &str {
        &source[self.range()]
    }
}
