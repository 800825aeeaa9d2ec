//! Line classification.

/// Structural kind of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Heading1,
    Heading2,
    /// Section marker; the only kind that can trigger asset injection.
    Heading3,
    ListItem,
    Quote,
    Blank,
    Paragraph,
}

impl LineKind {
    /// Heading level for heading kinds.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            _ => None,
        }
    }
}

/// A classified line: the trimmed source text and its content with the prefix removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub kind: LineKind,
    /// Whole line, surrounding whitespace removed.
    pub raw: &'a str,
    /// Text after the classification prefix.
    pub content: &'a str,
}

/// Prefixes tested in order; the first hit decides the kind.
const PREFIXES: &[(&str, LineKind)] = &[
    ("# ", LineKind::Heading1),
    ("## ", LineKind::Heading2),
    ("### ", LineKind::Heading3),
    ("- ", LineKind::ListItem),
    ("* ", LineKind::ListItem),
    ("> ", LineKind::Quote),
];

/// Classify one line of source text. Never fails: anything unrecognised is a paragraph.
pub fn classify(line: &str) -> Line<'_> {
    let raw = line.trim();

    for (prefix, kind) in PREFIXES {
        if let Some(content) = raw.strip_prefix(prefix) {
            return Line {
                kind: *kind,
                raw,
                content,
            };
        }
    }

    let kind = if raw.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Paragraph
    };

    Line {
        kind,
        raw,
        content: raw,
    }
}
