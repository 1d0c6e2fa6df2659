#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

/// Matches a `class` attribute and captures its quoted value.
///
/// The attribute name must start the text or follow whitespace, which keeps
/// `data-class` and `className` out.
static CLASS_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(?i:class)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("class attribute pattern is valid")
});

/// Collects every whitespace-separated token found in `class` attribute
/// values.
pub fn class_tokens(html: &str) -> HashSet<&str> {
    CLASS_ATTRIBUTE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .flat_map(|value| value.as_str().split_whitespace())
        .collect()
}
