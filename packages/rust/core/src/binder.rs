//! Chart injection at section markers.
//!
//! Each `### ` line is tested against the configured bindings in order; the
//! first binding whose section key occurs anywhere in the line wins. The test
//! is a plain substring match, so key `1.1` also matches `### 1.1.2 小节`.
//! Bindings are never consumed and may fire on several markers.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use folio_markdown::{Block, SectionHook};
use folio_shared::{AssetBinding, FolioError, Result};

use crate::store::ContentStore;

/// Counters for one assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinderStats {
    pub embedded: usize,
    pub missing: usize,
}

/// Section hook that embeds bound chart images.
pub struct AssetBinder<'a, S: ContentStore + ?Sized> {
    bindings: &'a [AssetBinding],
    store: &'a S,
    stats: BinderStats,
    error: Option<FolioError>,
}

impl<'a, S: ContentStore + ?Sized> AssetBinder<'a, S> {
    pub fn new(bindings: &'a [AssetBinding], store: &'a S) -> Self {
        Self {
            bindings,
            store,
            stats: BinderStats::default(),
            error: None,
        }
    }

    pub fn stats(&self) -> BinderStats {
        self.stats
    }

    /// Surface a read failure hit while parsing.
    ///
    /// The parser cannot propagate errors from a hook, so the first failure is
    /// parked here and further lookups are suppressed until it is taken.
    pub fn take_error(&mut self) -> Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<S: ContentStore + ?Sized> SectionHook for AssetBinder<'_, S> {
    fn on_section_marker(&mut self, line: &str) -> Option<Block> {
        if self.error.is_some() {
            return None;
        }

        let binding = find_binding(line, self.bindings)?;

        match self.store.read_bytes(Path::new(&binding.path)) {
            Ok(Some(bytes)) => {
                debug!(
                    asset = %binding.path,
                    section = %binding.section,
                    size = bytes.len(),
                    "embedding chart"
                );
                self.stats.embedded += 1;
                Some(image_block(&binding.path, &bytes))
            }
            Ok(None) => {
                debug!(asset = %binding.path, "chart file missing, skipping");
                self.stats.missing += 1;
                None
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

/// First binding whose section key is a substring of `line`.
pub fn find_binding<'b>(line: &str, bindings: &'b [AssetBinding]) -> Option<&'b AssetBinding> {
    bindings
        .iter()
        .find(|binding| line.contains(binding.section.as_str()))
}

/// Build an inline image block from raw asset bytes.
pub fn image_block(path: &str, bytes: &[u8]) -> Block {
    Block::Image {
        mime: mime_for(path).to_string(),
        data: STANDARD.encode(bytes),
        caption: caption_for(path),
    }
}

/// MIME type guessed from the file extension; the bytes are never inspected.
pub fn mime_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Human-readable caption derived from an asset path.
///
/// `charts/chart_rate-cut.png` becomes `Charts Chart Rate Cut`.
pub fn caption_for(path: &str) -> String {
    let path = path.trim_start_matches("./");
    let stem = match path.rfind('.') {
        Some(dot) if !path[dot..].contains(['/', '\\']) => &path[..dot],
        _ => path,
    };

    stem.replace(['/', '\\', '_', '-'], " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            format!("{upper}{}", chars.as_str().to_lowercase())
        }
        None => String::new(),
    }
}
