//! Rewriting every call site of one source text.

use crate::builder::build_call;
use crate::matcher::{CallSiteMatch, Matcher};
use crate::splitter::split;
use crate::vocabulary::ComponentVocabulary;
use smol_str::SmolStr;
use source_text::{Span, Splicer};

/// Property moved into the override spread by default.
pub const DEFAULT_TARGET_PROPERTY: &str = "className";

/// Options for rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Component constructors whose calls are rewritten.
    pub vocabulary: ComponentVocabulary,
    /// The property to relocate.
    pub target_property: SmolStr,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            vocabulary: ComponentVocabulary::default(),
            target_property: SmolStr::new_static(DEFAULT_TARGET_PROPERTY),
        }
    }
}

/// A call site that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSite {
    /// The component constructor as written.
    pub component: SmolStr,
    /// The call's span in the original text.
    pub original: Span,
    /// The replacement's span in the rewritten text.
    pub generated: Span,
}

/// The result of rewriting one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult<'src> {
    /// The input text.
    pub original: &'src str,
    /// The output text.
    pub rewritten: String,
    /// Whether `rewritten` differs from `original`.
    pub changed: bool,
    /// Rewritten call sites, in source order. Nested sites are not listed
    /// separately.
    pub sites: Vec<RewrittenSite>,
}

/// Rewrites every call site in `source`.
///
/// All sites are located in the unmodified source before anything is
/// replaced, then spliced in one pass. Sites nested inside a matched call's
/// properties are rewritten as part of their enclosing call, so running the
/// rewrite again on its own output changes nothing.
pub fn rewrite<'src>(source: &'src str, options: &RewriteOptions) -> RewriteResult<'src> {
    let matcher = Matcher::new(source, &options.vocabulary, &options.target_property);
    let call_sites: Vec<CallSiteMatch<'src>> = matcher.call_sites().collect();

    let mut splicer = Splicer::new(source);
    let mut components = Vec::with_capacity(call_sites.len());
    for site in &call_sites {
        if splicer.replace(site.span, &rewrite_site(site, options)) {
            components.push(SmolStr::new(site.component));
        }
    }

    let spliced = splicer.finish();
    let sites = components
        .into_iter()
        .zip(spliced.edits)
        .map(|(component, edit)| RewrittenSite {
            component,
            original: edit.original,
            generated: edit.generated,
        })
        .collect();

    RewriteResult {
        original: source,
        changed: spliced.text != source,
        rewritten: spliced.text,
        sites,
    }
}

/// Builds the replacement text for one call site.
fn rewrite_site(site: &CallSiteMatch<'_>, options: &RewriteOptions) -> String {
    let split = split(site, &options.target_property);
    let remaining = rewrite(&split.remaining, options).rewritten;
    let value = rewrite(split.target.value(), options).rewritten;
    build_call(site.component, &remaining, &split.target.render(&value))
}
