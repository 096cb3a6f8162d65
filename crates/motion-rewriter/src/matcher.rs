//! Call-site matching.
//!
//! A call site is a recognized component constructor called with a single
//! object literal, where the literal has the target property at its top
//! level:
//!
//! ```text
//! motion.div({ initial: { opacity: 0 }, className: cn("card", active && "on") })
//! ^^^^^^^^^^ component                  ^^^^^^^^^ target
//! ```
//!
//! The literal is scanned with an explicit bracket stack over tokens, so
//! values may contain balanced `()`, `[]` and `{}` as well as brackets inside
//! strings, templates and comments. A literal that is unterminated, has a
//! mismatched closer or contains an unlexable token is not a call site.

use crate::lexer::{tokenize, Token, TokenKind};
use crate::vocabulary::ComponentVocabulary;
use source_text::Span;

/// How a top-level property of an object literal is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind<'src> {
    /// `key: value`, where the key is an identifier, string or number.
    KeyValue {
        /// The key as written, quotes included.
        key: &'src str,
        /// The value expression.
        value: &'src str,
    },
    /// `key`
    Shorthand,
    /// `...expr`
    Spread,
    /// Methods, accessors, computed keys.
    Other,
}

/// A top-level property of an object literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'src> {
    /// The property name for key/value and shorthand properties, unquoted.
    pub name: Option<&'src str>,
    /// The property text, from any leading comments to its last token.
    pub text: &'src str,
    /// The span of `text` in the source.
    pub span: Span,
    /// How the property is written.
    pub kind: PropertyKind<'src>,
}

impl<'src> Property<'src> {
    /// Returns true if this property assigns `name`.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == Some(name)
    }
}

/// A located call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteMatch<'src> {
    /// The component constructor as written, e.g. `motion.div`.
    pub component: &'src str,
    /// From the start of the component to the closing `)`.
    pub span: Span,
    /// Properties before the target, in source order.
    pub before: Vec<Property<'src>>,
    /// The last top-level assignment of the target property.
    pub target: Property<'src>,
    /// Properties after the target, in source order.
    pub after: Vec<Property<'src>>,
}

impl<'src> CallSiteMatch<'src> {
    /// Returns the target's value expression.
    ///
    /// For shorthand properties this is the property name itself.
    pub fn value(&self) -> &'src str {
        match self.target.kind {
            PropertyKind::KeyValue { value, .. } => value,
            _ => self.target.name.unwrap_or(self.target.text),
        }
    }
}

/// Locates call sites in one source text.
#[derive(Debug)]
pub struct Matcher<'cfg, 'src> {
    source: &'src str,
    vocabulary: &'cfg ComponentVocabulary,
    target: &'cfg str,
    tokens: Vec<Token>,
}

impl<'cfg, 'src> Matcher<'cfg, 'src> {
    /// Tokenizes `source` for matching call sites whose literal assigns `target`.
    pub fn new(
        source: &'src str,
        vocabulary: &'cfg ComponentVocabulary,
        target: &'cfg str,
    ) -> Self {
        Self {
            source,
            vocabulary,
            target,
            tokens: tokenize(source),
        }
    }

    /// Returns the call sites in ascending source order.
    ///
    /// Each call restarts from the beginning of the source.
    pub fn call_sites(&self) -> CallSites<'_, 'cfg, 'src> {
        CallSites {
            matcher: self,
            cursor: 0,
        }
    }

    fn kind(&self, idx: usize) -> Option<TokenKind> {
        self.tokens.get(idx).map(|t| t.kind)
    }

    fn text(&self, idx: usize) -> &'src str {
        self.tokens[idx].span.slice(self.source)
    }

    /// Index of the first non-comment token at or after `idx`.
    fn next_significant(&self, idx: usize) -> Option<usize> {
        (idx..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_comment())
    }

    /// Index of the last non-comment token before `idx`.
    fn prev_significant(&self, idx: usize) -> Option<usize> {
        (0..idx).rev().find(|&i| !self.tokens[i].kind.is_comment())
    }

    /// Tries to match a call site whose component starts at token `start`.
    ///
    /// Returns the match and the index of the token after its closing `)`.
    fn match_at(&self, start: usize) -> Option<(CallSiteMatch<'src>, usize)> {
        let tag = self.match_component(start)?;

        let lparen = self.next_significant(tag + 1)?;
        let lbrace = self.next_significant(lparen + 1)?;
        if self.kind(lparen) != Some(TokenKind::LParen)
            || self.kind(lbrace) != Some(TokenKind::LBrace)
        {
            return None;
        }

        let (mut properties, rbrace) = self.scan_literal(lbrace)?;

        let mut rparen = self.next_significant(rbrace + 1)?;
        if self.kind(rparen) == Some(TokenKind::Comma) {
            rparen = self.next_significant(rparen + 1)?;
        }
        if self.kind(rparen) != Some(TokenKind::RParen) {
            return None;
        }

        let target = properties.iter().rposition(|p| p.is_named(self.target))?;
        let after = properties.split_off(target + 1);
        let target = properties.pop()?;

        let site = CallSiteMatch {
            component: Span::new(self.tokens[start].span.start, self.tokens[tag].span.end)
                .slice(self.source),
            span: Span::new(self.tokens[start].span.start, self.tokens[rparen].span.end),
            before: properties,
            target,
            after,
        };
        Some((site, rparen + 1))
    }

    /// Matches `namespace.tag` (or a bare `tag`) at `start`, returning the tag index.
    fn match_component(&self, start: usize) -> Option<usize> {
        if self.kind(start) != Some(TokenKind::Ident) {
            return None;
        }

        let tag = match self.vocabulary.namespace() {
            Some(namespace) => {
                if self.text(start) != namespace {
                    return None;
                }
                let dot = self.next_significant(start + 1)?;
                if self.kind(dot) != Some(TokenKind::Dot) {
                    return None;
                }
                self.next_significant(dot + 1)?
            }
            None => {
                // `foo.div(...)` is a method call, not a component.
                let prev = self.prev_significant(start);
                if prev.and_then(|p| self.kind(p)) == Some(TokenKind::Dot) {
                    return None;
                }
                start
            }
        };

        (self.kind(tag) == Some(TokenKind::Ident) && self.vocabulary.contains(self.text(tag)))
            .then_some(tag)
    }

    /// Splits the literal opened at `open` into its top-level properties.
    ///
    /// Returns the properties and the index of the literal's closing `}`.
    fn scan_literal(&self, open: usize) -> Option<(Vec<Property<'src>>, usize)> {
        let mut properties = Vec::new();
        let mut closers: Vec<TokenKind> = Vec::new();
        let mut first: Option<usize> = None;
        let mut last: Option<usize> = None;

        for idx in open + 1..self.tokens.len() {
            let kind = self.tokens[idx].kind;
            let top_level = closers.is_empty();

            match kind {
                TokenKind::Error => return None,
                TokenKind::Comma if top_level => {
                    properties.extend(self.property(first.take(), last.take()));
                    continue;
                }
                TokenKind::RBrace if top_level => {
                    properties.extend(self.property(first, last));
                    return Some((properties, idx));
                }
                kind if kind.is_closer() => {
                    if closers.pop() != Some(kind) {
                        return None;
                    }
                }
                kind => {
                    if let Some(closer) = kind.closer() {
                        closers.push(closer);
                    }
                }
            }

            first.get_or_insert(idx);
            if !kind.is_comment() {
                last = Some(idx);
            }
        }

        None
    }

    /// Classifies the property spanning tokens `first..=last`.
    ///
    /// Comment-only segments are not properties.
    fn property(&self, first: Option<usize>, last: Option<usize>) -> Option<Property<'src>> {
        let (first, last) = (first?, last?);
        let span = Span::new(self.tokens[first].span.start, self.tokens[last].span.end);
        let significant: Vec<usize> = (first..=last)
            .filter(|&i| !self.tokens[i].kind.is_comment())
            .collect();

        let head = significant[0];
        let (name, kind) = match (self.kind(head), significant.get(1).map(|&i| self.tokens[i].kind)) {
            (Some(TokenKind::Spread), _) => (None, PropertyKind::Spread),
            (Some(TokenKind::Ident), None) => (Some(self.text(head)), PropertyKind::Shorthand),
            (
                Some(TokenKind::Ident | TokenKind::String | TokenKind::Number),
                Some(TokenKind::Colon),
            ) if significant.len() > 2 => {
                let key = self.text(head);
                let value =
                    Span::new(self.tokens[significant[2]].span.start, self.tokens[last].span.end)
                        .slice(self.source);
                (Some(unquote(key)), PropertyKind::KeyValue { key, value })
            }
            _ => (None, PropertyKind::Other),
        };

        Some(Property {
            name,
            text: span.slice(self.source),
            span,
            kind,
        })
    }
}

/// Iterator over the call sites of a [`Matcher`].
#[derive(Debug, Clone)]
pub struct CallSites<'m, 'cfg, 'src> {
    matcher: &'m Matcher<'cfg, 'src>,
    /// Next token index to try; never inside a previously matched site.
    cursor: usize,
}

impl<'src> Iterator for CallSites<'_, '_, 'src> {
    type Item = CallSiteMatch<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.matcher.tokens.len() {
            let start = self.cursor;
            match self.matcher.match_at(start) {
                Some((site, next)) => {
                    self.cursor = next;
                    return Some(site);
                }
                None => self.cursor = start + 1,
            }
        }
        None
    }
}

/// Returns the top-level properties of the first object literal in `source`.
///
/// Returns `None` if there is no complete, balanced literal.
pub fn literal_properties(source: &str) -> Option<Vec<Property<'_>>> {
    let vocabulary = ComponentVocabulary::default();
    let matcher = Matcher::new(source, &vocabulary, "");
    let open = matcher
        .tokens
        .iter()
        .position(|t| t.kind == TokenKind::LBrace)?;
    matcher.scan_literal(open).map(|(properties, _)| properties)
}

fn unquote(key: &str) -> &str {
    match key.as_bytes().first() {
        Some(b'"' | b'\'') if key.len() >= 2 => &key[1..key.len() - 1],
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(source: &str) -> Vec<CallSiteMatch<'_>> {
        let vocabulary = ComponentVocabulary::default();
        let matcher = Matcher::new(source, &vocabulary, "className");
        matcher.call_sites().collect()
    }

    fn names<'a>(properties: &[Property<'a>]) -> Vec<&'a str> {
        properties.iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_simple_call_site() {
        let source = r#"const el = motion.div({ id: "a", className: x, onClick: f });"#;
        let found = sites(source);
        assert_eq!(found.len(), 1);

        let site = &found[0];
        assert_eq!(site.component, "motion.div");
        assert_eq!(
            site.span.slice(source),
            r#"motion.div({ id: "a", className: x, onClick: f })"#
        );
        assert_eq!(names(&site.before), vec![r#"id: "a""#]);
        assert_eq!(site.value(), "x");
        assert_eq!(names(&site.after), vec!["onClick: f"]);
    }

    #[test]
    fn test_no_target_property() {
        assert!(sites(r#"motion.div({ id: "a", onClick: f })"#).is_empty());
    }

    #[test]
    fn test_unknown_component() {
        assert!(sites("motion.table({ className: x })").is_empty());
        assert!(sites("other.div({ className: x })").is_empty());
    }

    #[test]
    fn test_jsx_is_not_a_call() {
        assert!(sites("<motion.div className={x}>hi</motion.div>").is_empty());
    }

    #[test]
    fn test_nested_property_is_not_top_level() {
        assert!(sites("motion.div({ style: { className: x } })").is_empty());
    }

    #[test]
    fn test_nested_braces_in_value() {
        let found = sites(r#"motion.span({ className: cn({ active: on }, "x"), id: 1 })"#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value(), r#"cn({ active: on }, "x")"#);
        assert_eq!(names(&found[0].after), vec!["id: 1"]);
    }

    #[test]
    fn test_template_literal_value() {
        let found = sites("motion.p({ className: `a ${b ? `c` : '}'} d` })");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value(), "`a ${b ? `c` : '}'} d`");
    }

    #[test]
    fn test_unterminated_literal() {
        assert!(sites("motion.div({ className: x, id: y").is_empty());
    }

    #[test]
    fn test_mismatched_closer() {
        assert!(sites("motion.div({ className: f(x] })").is_empty());
    }

    #[test]
    fn test_regex_literal_with_brace_is_rejected() {
        assert!(sites(r#"motion.div({ className: s.replace(/}/g, "") })"#).is_empty());
    }

    #[test]
    fn test_second_argument_is_rejected() {
        assert!(sites("motion.div({ className: x }, ref)").is_empty());
    }

    #[test]
    fn test_trailing_comma_argument() {
        let source = "let a = motion.div({ className: x, },);";
        let found = sites(source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span.slice(source), "motion.div({ className: x, },)");
        assert!(found[0].after.is_empty());
    }

    #[test]
    fn test_last_duplicate_is_target() {
        let found = sites("motion.div({ className: a, id: 1, className: b })");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value(), "b");
        assert_eq!(names(&found[0].before), vec!["className: a", "id: 1"]);
        assert!(found[0].after.is_empty());
    }

    #[test]
    fn test_quoted_and_shorthand_keys() {
        let found = sites(r#"motion.a({ "className": x }); motion.li({ className })"#);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].target.name, Some("className"));
        assert_eq!(
            found[0].target.kind,
            PropertyKind::KeyValue {
                key: "\"className\"",
                value: "x"
            }
        );
        assert_eq!(found[1].target.kind, PropertyKind::Shorthand);
        assert_eq!(found[1].value(), "className");
    }

    #[test]
    fn test_spread_is_not_the_target() {
        assert!(sites("motion.div({ ...({ className: x } as any) })").is_empty());
    }

    #[test]
    fn test_multiple_sites_in_order() {
        let source = "motion.h1({ className: a }); motion.h2({ className: b });";
        let found = sites(source);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].component, "motion.h1");
        assert_eq!(found[1].component, "motion.h2");
        assert!(found[0].span.end <= found[1].span.start);
    }

    #[test]
    fn test_leading_comment_travels_with_property() {
        let found = sites("motion.div({\n  // first\n  id: 1,\n  className: x, /* gone */\n})");
        assert_eq!(names(&found[0].before), vec!["// first\n  id: 1"]);
        assert!(found[0].after.is_empty());
    }

    #[test]
    fn test_restartable() {
        let vocabulary = ComponentVocabulary::default();
        let source = "motion.div({ className: a }) motion.div({ className: b })";
        let matcher = Matcher::new(source, &vocabulary, "className");
        let first: Vec<_> = matcher.call_sites().collect();
        let second: Vec<_> = matcher.call_sites().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bare_vocabulary() {
        let vocabulary = ComponentVocabulary::new(None, ["tag"]).unwrap();
        let source = "tag({ className: x }); obj.tag({ className: y })";
        let matcher = Matcher::new(source, &vocabulary, "className");
        let found: Vec<_> = matcher.call_sites().collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].component, "tag");
        assert_eq!(found[0].value(), "x");
    }

    #[test]
    fn test_literal_properties() {
        let properties = literal_properties("{ a: 1, ...rest, b, get c() { return 1 } }").unwrap();
        let kinds: Vec<_> = properties.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PropertyKind::KeyValue {
                    key: "a",
                    value: "1"
                },
                PropertyKind::Spread,
                PropertyKind::Shorthand,
                PropertyKind::Other,
            ]
        );
        assert_eq!(properties[2].name, Some("b"));
    }
}
