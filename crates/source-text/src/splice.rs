//! Single-pass splicing of replacements into an unmodified source.

use crate::{ByteOffset, Span};
use text_size::TextSize;

/// One substitution: where it was in the original and where it ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// The replaced span in the original source.
    pub original: Span,
    /// The replacement's span in the spliced output.
    pub generated: Span,
}

/// The output of a [`Splicer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spliced {
    /// The spliced text.
    pub text: String,
    /// Applied edits, in ascending original order.
    pub edits: Vec<Edit>,
}

/// Builds a new text from an original one and a series of replacements.
///
/// Replacements must be supplied in ascending, non-overlapping order, all
/// relative to the original text. Text between them is copied verbatim.
#[derive(Debug)]
pub struct Splicer<'src> {
    source: &'src str,
    output: String,
    /// End of the last consumed region of `source`.
    cursor: ByteOffset,
    edits: Vec<Edit>,
}

impl<'src> Splicer<'src> {
    /// Creates a splicer over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            output: String::with_capacity(source.len()),
            cursor: TextSize::from(0),
            edits: Vec::new(),
        }
    }

    /// Replaces `span` of the original with `replacement`.
    ///
    /// Returns `false` and leaves the output untouched when `span` starts
    /// before the end of a previous replacement.
    pub fn replace(&mut self, span: Span, replacement: &str) -> bool {
        if span.start < self.cursor {
            return false;
        }

        self.output
            .push_str(Span::new(self.cursor, span.start).slice(self.source));

        let generated_start = TextSize::from(self.output.len() as u32);
        self.output.push_str(replacement);
        let generated_end = TextSize::from(self.output.len() as u32);

        self.edits.push(Edit {
            original: span,
            generated: Span::new(generated_start, generated_end),
        });
        self.cursor = span.end;
        true
    }

    /// Copies the remaining original text and returns the result.
    pub fn finish(mut self) -> Spliced {
        let end = TextSize::from(self.source.len() as u32);
        self.output
            .push_str(Span::new(self.cursor, end).slice(self.source));

        Spliced {
            text: self.output,
            edits: self.edits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_edits_copies_source() {
        let spliced = Splicer::new("unchanged text").finish();
        assert_eq!(spliced.text, "unchanged text");
        assert!(spliced.edits.is_empty());
    }

    #[test]
    fn test_replacements_use_original_offsets() {
        let source = "aa BB cc DD ee";
        let mut splicer = Splicer::new(source);
        assert!(splicer.replace(Span::from_range(3..5), "bbbb"));
        assert!(splicer.replace(Span::from_range(9..11), "d"));
        let spliced = splicer.finish();

        assert_eq!(spliced.text, "aa bbbb cc d ee");
        assert_eq!(
            spliced.edits,
            vec![
                Edit {
                    original: Span::from_range(3..5),
                    generated: Span::from_range(3..7),
                },
                Edit {
                    original: Span::from_range(9..11),
                    generated: Span::from_range(11..12),
                },
            ]
        );
    }

    #[test]
    fn test_overlapping_replacement_is_refused() {
        let mut splicer = Splicer::new("0123456789");
        assert!(splicer.replace(Span::from_range(2..6), "x"));
        assert!(!splicer.replace(Span::from_range(4..8), "y"));
        assert_eq!(splicer.finish().text, "01x6789");
    }

    #[test]
    fn test_replacement_at_end() {
        let mut splicer = Splicer::new("abc");
        assert!(splicer.replace(Span::from_range(1..3), "Z"));
        assert_eq!(splicer.finish().text, "aZ");
    }
}
