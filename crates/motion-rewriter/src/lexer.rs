//! TypeScript/TSX tokenizer using logos.
//!
//! This is not a full TypeScript lexer. It only distinguishes what call-site
//! matching needs:
//! - identifiers, punctuation and the three bracket pairs
//! - string and template literals, so brackets inside them are inert; a
//!   quote with no closing partner on its line is plain punctuation
//! - comments, which are kept as tokens so they can travel with properties
//!
//! Regular-expression literals are not recognized; `/` is always [`TokenKind::Slash`].

use logos::Logos;
use source_text::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the source.
    pub span: Span,
}

/// Token kinds for the subset of TypeScript that matching cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// An identifier or keyword.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    /// A numeric literal (loosely matched).
    #[regex(r"[0-9][0-9A-Za-z_]*")]
    Number,

    /// A single or double quoted string literal.
    #[regex(r#""([^"\\\r\n]|\\[^\r\n]|\\\r?\n)*""#)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n]|\\\r?\n)*'")]
    String,

    /// A template literal, including any `${}` interpolations.
    #[token("`", lex_template)]
    Template,

    /// `// ...` up to the end of the line.
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `/* ... */`
    #[token("/*", lex_block_comment)]
    BlockComment,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `,`
    #[token(",")]
    Comma,

    /// `:`
    #[token(":")]
    Colon,

    /// `.`
    #[token(".")]
    Dot,

    /// `...`
    #[token("...")]
    Spread,

    /// `/`
    #[token("/")]
    Slash,

    /// Any other single character, including a quote that opens no
    /// complete string (`it's` in JSX text).
    #[regex(r#"[^\sA-Za-z0-9_$"'`(){}\[\],:./]"#)]
    #[token("'")]
    #[token("\"")]
    Punct,

    /// Unterminated template or block comment.
    #[default]
    Error,
}

impl TokenKind {
    /// Returns true for comments.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Returns the closer that pairs with this opener, if it is one.
    #[inline]
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            _ => None,
        }
    }

    /// Returns true for `)`, `}` and `]`.
    #[inline]
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket
        )
    }
}

/// Consumes the rest of a template literal after its opening backtick.
fn lex_template(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    match template_len(lex.remainder().as_bytes()) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Consumes the rest of a block comment after its opening `/*`.
fn lex_block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Length of a template body up to and including its closing backtick.
fn template_len(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i += 2;
                i += interpolation_len(&bytes[i..])?;
            }
            _ => i += 1,
        }
    }
    None
}

/// Length of a `${` interpolation body up to and including its closing `}`.
fn interpolation_len(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i + 1),
            b'}' => depth -= 1,
            b'`' => {
                i += 1 + template_len(&bytes[i + 1..])?;
                continue;
            }
            quote @ (b'"' | b'\'') => {
                i += 1 + quoted_len(&bytes[i + 1..], quote)?;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let rest = &bytes[i..];
                i += rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let rest = &bytes[i + 2..];
                let end = rest.windows(2).position(|w| w == b"*/")?;
                i += 2 + end + 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Length of a quoted string body up to and including its closing quote.
fn quoted_len(bytes: &[u8], quote: u8) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// A lexer over TypeScript/TSX source.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(TokenKind::Error);
        Some(Token {
            kind,
            span: Span::from_range(self.inner.span()),
        })
    }
}

/// Tokenizes `source` in full.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
