//! Inline emphasis rewriting.
//!
//! Only two forms are recognised: `**strong**` and `*emphasis*`. Both passes are
//! non-greedy and strong runs first, so a leftover single `*` pair is treated as
//! emphasis once the doubled markers are gone. Anything unmatched stays literal.

use std::sync::LazyLock;

use regex::Regex;

/// Rewrite emphasis markup in a single line of text into HTML spans.
pub fn format_inline(text: &str) -> String {
    static STRONG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
    static EM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

    if !text.contains('*') {
        return text.to_string();
    }

    let strong = STRONG_RE.replace_all(text, "<strong>$1</strong>");
    EM_RE.replace_all(&strong, "<em>$1</em>").into_owned()
}
