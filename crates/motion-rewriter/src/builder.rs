//! Reassembling a call with the target moved into an override spread.

/// Type assertion applied to the override object.
///
/// The wrapping library's prop types do not declare the target property, so
/// the override object is widened to keep the call type-correct.
pub const TYPE_WIDENING: &str = "as any";

/// Renders the override-merge expression for one target property.
///
/// `...({className: x} as any)`
pub fn override_merge(target: &str) -> String {
    format!("...({{{target}}} {TYPE_WIDENING})")
}

/// Renders the replacement call for `component`.
///
/// The override spread always comes last, so no other property of the same
/// name can shadow it.
pub fn build_call(component: &str, remaining: &str, target: &str) -> String {
    let merge = override_merge(target);
    if remaining.is_empty() {
        format!("{component}({{{merge}}})")
    } else {
        format!("{component}({{{remaining}, {merge}}})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_merge() {
        assert_eq!(override_merge("className: x"), "...({className: x} as any)");
    }

    #[test]
    fn test_build_with_remaining() {
        assert_eq!(
            build_call("motion.div", r#"id: "a", onClick: f"#, "className: x"),
            r#"motion.div({id: "a", onClick: f, ...({className: x} as any)})"#
        );
    }

    #[test]
    fn test_build_without_remaining() {
        assert_eq!(
            build_call("motion.span", "", "className: styles.root"),
            "motion.span({...({className: styles.root} as any)})"
        );
    }
}
