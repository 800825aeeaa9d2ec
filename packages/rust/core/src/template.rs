//! Static page wrapper: head metadata, embedded stylesheet and font faces.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{debug, warn};

use folio_shared::{DocumentConfig, FontFace, Result};

use crate::store::ContentStore;

/// A font face whose file has been read and encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFont {
    pub family: String,
    pub weight: u16,
    pub mime: &'static str,
    pub format: &'static str,
    pub data: String,
}

/// Read configured font files. Missing files are skipped with a warning.
pub fn load_fonts<S: ContentStore + ?Sized>(
    fonts: &[FontFace],
    store: &S,
) -> Result<Vec<EmbeddedFont>> {
    let mut loaded = Vec::with_capacity(fonts.len());

    for font in fonts {
        let Some(bytes) = store.read_bytes(Path::new(&font.path))? else {
            warn!(path = %font.path, family = %font.family, "font file missing, skipping");
            continue;
        };

        let (mime, format) = font_kind(&font.path);
        debug!(path = %font.path, weight = font.weight, size = bytes.len(), "embedding font");

        loaded.push(EmbeddedFont {
            family: font.family.clone(),
            weight: font.weight,
            mime,
            format,
            data: STANDARD.encode(&bytes),
        });
    }

    Ok(loaded)
}

fn font_kind(path: &str) -> (&'static str, &'static str) {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("otf") => ("font/otf", "opentype"),
        Some("woff") => ("font/woff", "woff"),
        Some("woff2") => ("font/woff2", "woff2"),
        _ => ("font/ttf", "truetype"),
    }
}

/// `@font-face` rules for the embedded fonts.
pub fn font_face_css(fonts: &[EmbeddedFont]) -> String {
    fonts
        .iter()
        .map(|font| {
            format!(
                "@font-face {{\n  font-family: '{family}';\n  src: url('data:{mime};base64,{data}') format('{format}');\n  font-weight: {weight};\n}}\n",
                family = font.family.replace('\'', ""),
                mime = font.mime,
                data = font.data,
                format = font.format,
                weight = font.weight,
            )
        })
        .collect()
}

/// Wrap a rendered body in the full HTML page.
pub fn render_page(doc: &DocumentConfig, fonts: &[EmbeddedFont], body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>\n{fonts}{STYLESHEET}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         {body}\n\
         </div>\n\
         </body>\n\
         </html>\n",
        lang = encode_double_quoted_attribute(&doc.lang),
        title = encode_text(&doc.title),
        fonts = font_face_css(fonts),
    )
}

const STYLESHEET: &str = r#":root {
  --bg-color: #fcfcfc;
  --paper-color: #ffffff;
  --text-main: #1a1a1a;
  --text-muted: #666666;
  --accent: #b91c1c;
  --border: #e5e7eb;
  --font-main: 'HarmonyOS Sans SC', system-ui, -apple-system, sans-serif;
}
* { box-sizing: border-box; }
body {
  font-family: var(--font-main);
  background-color: var(--bg-color);
  color: var(--text-main);
  line-height: 1.75;
  margin: 0;
  font-size: 17px;
  -webkit-font-smoothing: antialiased;
}
.container {
  max-width: 760px;
  margin: 0 auto;
  background: var(--paper-color);
  padding: 80px 60px;
  box-shadow: 0 10px 40px rgba(0, 0, 0, 0.03);
  min-height: 100vh;
}
h1, h2, h3 {
  color: #000;
  margin-top: 3rem;
  margin-bottom: 1.5rem;
  font-weight: 700;
  letter-spacing: -0.02em;
}
.chapter-title {
  font-size: 32px;
  border-top: 2px solid #000;
  padding-top: 20px;
  margin-top: 60px;
}
h2 { font-size: 24px; }
h3 { font-size: 19px; color: #333; margin-top: 2rem; }
p { margin-bottom: 1.5rem; text-align: justify; }
strong { font-weight: 700; color: #000; }
ul { padding-left: 1.5rem; margin-bottom: 1.5rem; }
li { margin-bottom: 0.5rem; }
.intro-section { margin-bottom: 60px; }
.meta-tag {
  font-size: 12px;
  font-weight: 700;
  letter-spacing: 2px;
  color: var(--accent);
  margin-bottom: 20px;
}
.report-title { font-size: 48px; line-height: 1.1; margin: 0 0 20px 0; }
.report-subtitle {
  font-size: 20px;
  color: var(--text-muted);
  font-weight: 300;
  margin-bottom: 40px;
}
.executive-summary {
  background: #f8f9fa;
  padding: 30px;
  border-left: 4px solid var(--accent);
}
.summary-label {
  display: block;
  font-size: 11px;
  font-weight: 700;
  letter-spacing: 1px;
  color: var(--text-muted);
  margin-bottom: 10px;
}
.executive-summary p { font-size: 16px; margin: 0; font-weight: 500; }
.toc {
  background: #f8f9fa;
  padding: 40px;
  margin-bottom: 60px;
  border-radius: 8px;
}
.toc h2 { margin-top: 0; font-size: 20px; }
.toc li { margin-bottom: 10px; }
.chart-wrapper { margin: 40px -40px; text-align: center; }
.chart-wrapper img {
  max-width: 100%;
  height: auto;
  border: 1px solid rgba(0, 0, 0, 0.05);
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.05);
}
figcaption { font-size: 12px; color: #888; margin-top: 10px; }
blockquote {
  font-size: 20px;
  font-weight: 300;
  font-style: italic;
  text-align: center;
  margin: 40px 0;
  padding: 20px;
  border-top: 1px solid var(--border);
  border-bottom: 1px solid var(--border);
}
.divider { border: 0; height: 1px; background: var(--border); margin: 60px 0; }
.section-break { height: 1px; margin: 60px 0; background: var(--border); }
.footer {
  margin-top: 100px;
  padding-top: 40px;
  border-top: 1px solid var(--border);
  text-align: center;
  font-size: 12px;
  color: #aaa;
}
@media (max-width: 768px) {
  .container { padding: 40px 20px; }
  .chart-wrapper { margin: 30px 0; }
  .report-title { font-size: 36px; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn font(path: &str, weight: u16) -> FontFace {
        FontFace {
            family: "HarmonyOS Sans SC".into(),
            path: path.into(),
            weight,
        }
    }

    #[test]
    fn missing_fonts_are_skipped() {
        let store = MemoryStore::default().with("Regular.ttf", vec![0u8, 1, 0, 0]);
        let fonts = [font("Regular.ttf", 400), font("Bold.ttf", 700)];

        let loaded = load_fonts(&fonts, &store).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].weight, 400);
        assert_eq!(loaded[0].data, "AAEAAA==");
    }

    #[test]
    fn font_face_rules_are_inline() {
        let store = MemoryStore::default().with("Light.woff2", b"wOF2".to_vec());
        let loaded = load_fonts(&[font("Light.woff2", 300)], &store).unwrap();

        let css = font_face_css(&loaded);
        assert!(css.contains("font-family: 'HarmonyOS Sans SC';"));
        assert!(css.contains("url('data:font/woff2;base64,d09GMg==') format('woff2')"));
        assert!(css.contains("font-weight: 300;"));
    }

    #[test]
    fn page_wraps_body_and_escapes_title() {
        let doc = DocumentConfig {
            title: "Q&A <Report>".into(),
            lang: "en".into(),
        };
        let html = render_page(&doc, &[], "<p>body</p>");

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>Q&amp;A &lt;Report&gt;</title>"));
        assert!(html.contains("<div class=\"container\">\n<p>body</p>\n</div>"));
        assert!(!html.contains("@font-face"));
    }
}
