//! Placeholder rendering
//!
//! Replaces `[% name %]` placeholders with the scalar value of the named
//! variable. Whitespace inside the brackets is ignored.

use crate::runner::scope::VarLookup;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[%\s*(\S+?)\s*%\]").expect("placeholder pattern is valid"));

/// Render a template against a scope
///
/// Unknown names and list variables render as the empty string.
pub fn render(template: &str, scope: &impl VarLookup) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            scope
                .lookup(&caps[1])
                .map(|var| var.value.clone())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Names referenced by the placeholders in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
