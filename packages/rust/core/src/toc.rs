//! TOC (Table of Contents) builder.
//!
//! Uses the configured entries when there are any, otherwise falls back to the
//! chapter headings (`# `) of the parts that were actually included.

use tracing::debug;

use folio_markdown::{Block, format_inline};
use folio_shared::TocConfig;

/// Collect chapter titles (level-1 headings) from a part's blocks.
pub fn chapter_titles(blocks: &[Block]) -> impl Iterator<Item = &str> {
    blocks.iter().filter_map(|block| match block {
        Block::Heading { level: 1, text } => Some(text.as_str()),
        _ => None,
    })
}

/// Render the TOC box, or `None` when there is nothing to list.
///
/// `chapters` are already inline-formatted heading texts.
pub fn build_toc(config: &TocConfig, chapters: &[String]) -> Option<String> {
    let entries: Vec<String> = if config.entries.is_empty() {
        debug!(chapters = chapters.len(), "deriving TOC from chapter headings");
        chapters.to_vec()
    } else {
        config.entries.iter().map(|e| format_inline(e)).collect()
    };

    if entries.is_empty() {
        return None;
    }

    let mut html = String::from("<div class=\"toc\">\n");
    if !config.title.is_empty() {
        html.push_str(&format!("<h2>{}</h2>\n", format_inline(&config.title)));
    }
    html.push_str("<ul>\n");
    for entry in &entries {
        html.push_str(&format!("<li>{entry}</li>\n"));
    }
    html.push_str("</ul>\n</div>");

    Some(html)
}
