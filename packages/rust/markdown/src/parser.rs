//! Line-by-line block parser.
//!
//! The only state carried between lines is the open list container, kept as an
//! explicit [`ParserState`] value that is folded across the input. A container
//! is flushed as a single [`Block::List`] by the first non-item line or by
//! [`ParserState::finish`], so containers are always balanced.

use tracing::trace;

use crate::block::Block;
use crate::inline::format_inline;
use crate::line::{LineKind, classify};

/// Callback invoked for every section-marker (`### `) line.
///
/// Receives the trimmed, unformatted line and may return one block to place
/// directly after the heading.
pub trait SectionHook {
    fn on_section_marker(&mut self, line: &str) -> Option<Block>;
}

impl<F> SectionHook for F
where
    F: FnMut(&str) -> Option<Block>,
{
    fn on_section_marker(&mut self, line: &str) -> Option<Block> {
        self(line)
    }
}

/// Hook that never injects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSections;

impl SectionHook for NoSections {
    fn on_section_marker(&mut self, _line: &str) -> Option<Block> {
        None
    }
}

/// Parser state between two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Items of the currently open list; `None` when no list is open.
    open_list: Option<Vec<String>>,
}

impl ParserState {
    pub fn is_list_open(&self) -> bool {
        self.open_list.is_some()
    }

    /// Consume one source line, pushing any completed blocks onto `out`.
    pub fn step(mut self, line: &str, hook: &mut impl SectionHook, out: &mut Vec<Block>) -> Self {
        let line = classify(line);

        if line.kind != LineKind::ListItem {
            self.close_list(out);
        }

        match line.kind {
            LineKind::Blank => {}
            LineKind::ListItem => self
                .open_list
                .get_or_insert_with(Vec::new)
                .push(format_inline(line.content)),
            LineKind::Heading1 | LineKind::Heading2 | LineKind::Heading3 => {
                let level = line.kind.heading_level().unwrap_or(3);
                out.push(Block::Heading {
                    level,
                    text: format_inline(line.content),
                });
                if line.kind == LineKind::Heading3 {
                    if let Some(block) = hook.on_section_marker(line.raw) {
                        out.push(block);
                    }
                }
            }
            LineKind::Quote => out.push(Block::Quote(format_inline(line.content))),
            LineKind::Paragraph => out.push(Block::Paragraph(format_inline(line.content))),
        }

        self
    }

    /// Flush a list left open at end of input.
    pub fn finish(mut self, out: &mut Vec<Block>) {
        self.close_list(out);
    }

    fn close_list(&mut self, out: &mut Vec<Block>) {
        if let Some(items) = self.open_list.take() {
            out.push(Block::List(items));
        }
    }
}

/// Parse one part's text into blocks, calling `hook` on every section marker.
pub fn parse_part(text: &str, hook: &mut impl SectionHook) -> Vec<Block> {
    let mut blocks = Vec::new();
    let state = text
        .lines()
        .fold(ParserState::default(), |state, line| {
            state.step(line, hook, &mut blocks)
        });
    state.finish(&mut blocks);

    trace!(blocks = blocks.len(), "parsed part");
    blocks
}

/// Parse text with no section hook.
pub fn parse_text(text: &str) -> Vec<Block> {
    parse_part(text, &mut NoSections)
}
