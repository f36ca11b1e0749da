//! Slugs and explicit heading anchors.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]").expect("valid regex"));

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#([\w-]+)\}").expect("valid regex"));

/// Deterministic slug for a heading or changelog title.
///
/// Whitespace runs collapse to a single hyphen first, then every character
/// outside `[\w-]` is removed, then the result is lowercased. The ordering
/// matters: `v1.2.0` becomes `v120`, not `v1-2-0`.
pub fn slugify(text: &str) -> String {
    let hyphenated = WHITESPACE.replace_all(text.trim(), "-");
    NON_SLUG.replace_all(&hyphenated, "").to_lowercase()
}

/// Split an explicit `{#anchor}` marker out of rendered heading text.
///
/// Returns the text with the first marker removed and trimmed, plus the
/// anchor id when present. Text without a marker passes through unchanged.
pub fn split_anchor(text: &str) -> (String, Option<String>) {
    let Some(captures) = ANCHOR.captures(text) else {
        return (text.to_string(), None);
    };
    let id = captures[1].to_string();
    let full = captures.get(0).map_or("", |m| m.as_str());
    let cleaned = text.replacen(full, "", 1).trim().to_string();
    (cleaned, Some(id))
}
