//! Markup-to-plain-text conversion for event descriptions.
//!
//! Descriptions coming from the calendar are HTML fragments. The rules below
//! run in a fixed order: block-level tags become newlines before any other
//! tag is stripped, and entities are decoded only after tags are gone.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_DESCRIPTION_CHARS;

static RE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("regex is compile-time constant"));
static RE_PARAGRAPH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>").expect("regex is compile-time constant"));
static RE_LIST_ITEM_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</li>").expect("regex is compile-time constant"));
static RE_ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("regex is compile-time constant"));
static RE_EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("regex is compile-time constant"));

/// Named entities decoded after tag stripping, in replacement order.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Convert a raw description into trimmed plain text of at most
/// [`MAX_DESCRIPTION_CHARS`] characters.
pub fn sanitize_description(raw: &str) -> String {
    let text = RE_LINE_BREAK.replace_all(raw, "\n");
    let text = RE_PARAGRAPH_CLOSE.replace_all(&text, "\n\n");
    let text = RE_LIST_ITEM_CLOSE.replace_all(&text, "\n");
    let text = RE_ANY_TAG.replace_all(&text, "");

    let mut text = text.into_owned();
    for (entity, decoded) in ENTITIES {
        text = text.replace(entity, decoded);
    }

    let text = RE_EXCESS_NEWLINES.replace_all(&text, "\n\n");
    truncate_chars(text.trim(), MAX_DESCRIPTION_CHARS)
}

/// Hard cut at `max` characters, no ellipsis.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
