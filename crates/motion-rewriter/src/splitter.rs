//! Separating the target property from the rest of a matched literal.

use crate::matcher::{CallSiteMatch, PropertyKind};

/// The target property as it will appear inside the override expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideProperty<'src> {
    /// `key: value`, keeping the key as written.
    KeyValue {
        /// The key, quotes included.
        key: &'src str,
        /// The value expression.
        value: &'src str,
    },
    /// A shorthand `key`.
    Shorthand {
        /// The property name.
        name: &'src str,
    },
}

impl OverrideProperty<'_> {
    /// Renders the property, substituting `value` for the original value.
    ///
    /// Shorthand properties have no separate value and ignore `value`.
    pub fn render(&self, value: &str) -> String {
        match self {
            OverrideProperty::KeyValue { key, .. } => format!("{key}: {value}"),
            OverrideProperty::Shorthand { name } => (*name).to_string(),
        }
    }

    /// Returns the original value expression.
    pub fn value(&self) -> &str {
        match self {
            OverrideProperty::KeyValue { value, .. } => value,
            OverrideProperty::Shorthand { name } => name,
        }
    }
}

/// A call site's literal, split for reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitProperties<'src> {
    /// Every other property in source order, joined with `", "`.
    pub remaining: String,
    /// The property to move into the override expression.
    pub target: OverrideProperty<'src>,
}

/// Splits a matched call site into its remaining properties and the target.
///
/// Earlier assignments of `target_key` are dropped, since the last one is the
/// one that takes effect. Empty segments never produce stray separators.
pub fn split<'src>(site: &CallSiteMatch<'src>, target_key: &str) -> SplitProperties<'src> {
    let remaining = site
        .before
        .iter()
        .chain(&site.after)
        .filter(|property| !property.is_named(target_key))
        .map(|property| property.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let target = match site.target.kind {
        PropertyKind::KeyValue { key, value } => OverrideProperty::KeyValue { key, value },
        _ => OverrideProperty::Shorthand {
            name: site.value(),
        },
    };

    SplitProperties { remaining, target }
}
