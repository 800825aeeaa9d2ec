//! Lightweight Markdown-to-HTML conversion for report chapters.
//!
//! Supports exactly what chapter sources use: three heading levels, flat
//! `-`/`*` lists, `>` quotes, paragraphs, and `**strong**`/`*em*` spans.
//! Tables, nested lists, code fences, links and escaping are out of scope.
//!
//! Parsing is infallible; every line falls back to a paragraph.

pub mod block;
pub mod inline;
pub mod line;
pub mod parser;

pub use block::{Block, render_blocks};
pub use inline::format_inline;
pub use line::{Line, LineKind, classify};
pub use parser::{NoSections, ParserState, SectionHook, parse_part, parse_text};
