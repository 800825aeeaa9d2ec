//! Rendered output units and their HTML serialization.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// One structural unit of the output document.
///
/// Text fields already carry inline-formatted HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    /// One list container holding consecutive list items.
    List(Vec<String>),
    Quote(String),
    Paragraph(String),
    /// An embedded image; `data` is the base64 payload of the asset bytes.
    Image {
        mime: String,
        data: String,
        caption: String,
    },
}

impl Block {
    /// Serialize this block as an HTML fragment.
    pub fn to_html(&self) -> String {
        match self {
            Self::Heading { level: 1, text } => format!("<h1 class=\"chapter-title\">{text}</h1>"),
            Self::Heading { level, text } => format!("<h{level}>{text}</h{level}>"),
            Self::List(items) => {
                let mut html = String::from("<ul>\n");
                for item in items {
                    html.push_str("<li>");
                    html.push_str(item);
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>");
                html
            }
            Self::Quote(text) => format!("<blockquote>{text}</blockquote>"),
            Self::Paragraph(text) => format!("<p>{text}</p>"),
            Self::Image {
                mime,
                data,
                caption,
            } => format!(
                "<figure class=\"chart-wrapper\">\n\
                 <img src=\"data:{mime};base64,{data}\" alt=\"{alt}\">\n\
                 <figcaption>{caption}</figcaption>\n\
                 </figure>",
                alt = encode_double_quoted_attribute(caption),
                caption = encode_text(caption),
            ),
        }
    }
}

/// Serialize a block stream, one block per line.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_heading_gets_class() {
        let block = Block::Heading {
            level: 1,
            text: "第一部分".into(),
        };
        assert_eq!(block.to_html(), "<h1 class=\"chapter-title\">第一部分</h1>");

        let block = Block::Heading {
            level: 3,
            text: "1.1.1 暴跌回顾".into(),
        };
        assert_eq!(block.to_html(), "<h3>1.1.1 暴跌回顾</h3>");
    }

    #[test]
    fn list_wraps_items() {
        let block = Block::List(vec!["要点一".into(), "<strong>要点二</strong>".into()]);
        assert_eq!(
            block.to_html(),
            "<ul>\n<li>要点一</li>\n<li><strong>要点二</strong></li>\n</ul>"
        );
    }

    #[test]
    fn image_escapes_caption() {
        let block = Block::Image {
            mime: "image/png".into(),
            data: "iVBORw0K".into(),
            caption: "Q&A \"Chart\"".into(),
        };
        let html = block.to_html();
        assert!(html.contains("src=\"data:image/png;base64,iVBORw0K\""));
        assert!(html.contains("alt=\"Q&amp;A &quot;Chart&quot;\""));
        assert!(html.contains("<figcaption>Q&amp;A \"Chart\"</figcaption>"));
    }

    #[test]
    fn image_markup_parses_as_figure() {
        let block = Block::Image {
            mime: "image/png".into(),
            data: "AAAA".into(),
            caption: "Chart A".into(),
        };
        let fragment = scraper::Html::parse_fragment(&block.to_html());
        let img = scraper::Selector::parse("figure.chart-wrapper > img").unwrap();
        let el = fragment.select(&img).next().expect("img inside figure");
        assert_eq!(el.value().attr("alt"), Some("Chart A"));
    }

    #[test]
    fn blocks_join_with_newlines() {
        let blocks = vec![
            Block::Paragraph("a".into()),
            Block::Quote("b".into()),
        ];
        assert_eq!(render_blocks(&blocks), "<p>a</p>\n<blockquote>b</blockquote>");
    }
}
