//! Fixed report sections around the chapters: intro, part separator, footer.

use folio_markdown::format_inline;
use folio_shared::{FooterConfig, IntroConfig};

/// Visual break appended after every included part.
pub const PART_SEPARATOR: &str = "<div class=\"section-break\"></div>";

/// Render the introduction block. Empty fields are left out; a fully empty
/// intro renders as nothing.
pub fn render_intro(intro: &IntroConfig) -> String {
    let mut inner = String::new();

    if !intro.meta_tag.is_empty() {
        inner.push_str(&format!(
            "<div class=\"meta-tag\">{}</div>\n",
            format_inline(&intro.meta_tag)
        ));
    }
    if !intro.title.is_empty() {
        inner.push_str(&format!(
            "<h1 class=\"report-title\">{}</h1>\n",
            format_inline(&intro.title)
        ));
    }
    if !intro.subtitle.is_empty() {
        inner.push_str(&format!(
            "<p class=\"report-subtitle\">{}</p>\n",
            format_inline(&intro.subtitle)
        ));
    }
    if !intro.summary.is_empty() {
        inner.push_str("<div class=\"executive-summary\">\n");
        if !intro.summary_label.is_empty() {
            inner.push_str(&format!(
                "<span class=\"summary-label\">{}</span>\n",
                format_inline(&intro.summary_label)
            ));
        }
        inner.push_str(&format!("<p>{}</p>\n", format_inline(&intro.summary)));
        inner.push_str("</div>\n");
    }

    if inner.is_empty() {
        return String::new();
    }

    format!("<div class=\"intro-section\">\n{inner}</div>\n<hr class=\"divider\">")
}

/// Render the footer block.
pub fn render_footer(footer: &FooterConfig) -> String {
    let mut html = String::from("<div class=\"footer\">\n");
    for line in &footer.lines {
        html.push_str(&format!("<p>{}</p>\n", format_inline(line)));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intro_has_summary() {
        let html = render_intro(&IntroConfig::default());
        assert!(html.starts_with("<div class=\"intro-section\">"));
        assert!(html.contains("<div class=\"meta-tag\">2025 Q4 STRATEGY</div>"));
        assert!(html.contains("<span class=\"summary-label\">EXECUTIVE SUMMARY</span>"));
        assert!(html.contains("<strong>4.72%</strong>"));
        assert!(html.ends_with("<hr class=\"divider\">"));
    }

    #[test]
    fn partial_intro_skips_empty_fields() {
        let intro = IntroConfig {
            meta_tag: String::new(),
            title: "标题".into(),
            subtitle: String::new(),
            summary_label: "LABEL".into(),
            summary: String::new(),
        };
        let html = render_intro(&intro);
        assert!(html.contains("<h1 class=\"report-title\">标题</h1>"));
        assert!(!html.contains("meta-tag"));
        assert!(!html.contains("LABEL"));
    }

    #[test]
    fn empty_intro_renders_nothing() {
        let intro = IntroConfig {
            meta_tag: String::new(),
            title: String::new(),
            subtitle: String::new(),
            summary_label: String::new(),
            summary: String::new(),
        };
        assert_eq!(render_intro(&intro), "");
    }

    #[test]
    fn footer_lines() {
        let footer = FooterConfig {
            lines: vec!["© 2025".into(), "*仅供参考*".into()],
        };
        assert_eq!(
            render_footer(&footer),
            "<div class=\"footer\">\n<p>© 2025</p>\n<p><em>仅供参考</em></p>\n</div>"
        );
    }
}
