//! Report assembler.
//!
//! Reads each configured part, parses it (injecting charts at section
//! markers), and stitches intro, TOC, chapters and footer into one page.
//! Missing parts contribute nothing; write failures abort the run.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use folio_markdown::{parse_part, render_blocks};
use folio_shared::{FolioError, LoadedConfig, ReportConfig, Result};

use crate::binder::AssetBinder;
use crate::sections::{PART_SEPARATOR, render_footer, render_intro};
use crate::store::{ContentStore, FsStore};
use crate::template::{load_fonts, render_page};
use crate::toc::{build_toc, chapter_titles};

/// Output of a successful assembly, before anything is written.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// The complete HTML document.
    pub html: String,
    /// Number of parts that were found and rendered.
    pub parts_included: usize,
    /// Configured parts with no backing file.
    pub parts_skipped: Vec<String>,
    /// Charts embedded.
    pub images_embedded: usize,
    /// Chart bindings that matched a marker but whose file was missing.
    pub images_missing: usize,
}

/// Metadata about the written report file.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub size_bytes: usize,
    pub sha256: String,
}

/// Builds a report from an immutable config and a content store.
pub struct Assembler<'a, S: ContentStore + ?Sized> {
    config: &'a ReportConfig,
    store: &'a S,
}

impl<'a, S: ContentStore + ?Sized> Assembler<'a, S> {
    pub fn new(config: &'a ReportConfig, store: &'a S) -> Self {
        Self { config, store }
    }

    /// Produce the full document in memory.
    #[instrument(skip_all, fields(parts = self.config.parts.len(), assets = self.config.assets.len()))]
    pub fn assemble(&self) -> Result<AssembleResult> {
        let mut binder = AssetBinder::new(&self.config.assets, self.store);
        let mut chapters_html = String::new();
        let mut chapter_list: Vec<String> = Vec::new();
        let mut parts_included = 0;
        let mut parts_skipped = Vec::new();

        for part in &self.config.parts {
            let Some(text) = self.store.read_text(Path::new(part))? else {
                warn!(part = %part, "part source missing, skipping");
                parts_skipped.push(part.clone());
                continue;
            };

            let blocks = parse_part(&text, &mut binder);
            binder.take_error()?;

            chapter_list.extend(chapter_titles(&blocks).map(String::from));
            chapters_html.push_str(&render_blocks(&blocks));
            chapters_html.push('\n');
            chapters_html.push_str(PART_SEPARATOR);
            chapters_html.push('\n');
            parts_included += 1;

            debug!(part = %part, blocks = blocks.len(), "rendered part");
        }

        let mut body = String::new();
        let intro = render_intro(&self.config.intro);
        if !intro.is_empty() {
            body.push_str(&intro);
            body.push('\n');
        }
        if let Some(toc) = build_toc(&self.config.toc, &chapter_list) {
            body.push_str(&toc);
            body.push('\n');
        }
        body.push_str(&chapters_html);
        body.push_str(&render_footer(&self.config.footer));

        let fonts = load_fonts(&self.config.fonts, self.store)?;
        let html = render_page(&self.config.document, &fonts, &body);
        let stats = binder.stats();

        info!(
            parts_included,
            parts_skipped = parts_skipped.len(),
            images_embedded = stats.embedded,
            images_missing = stats.missing,
            fonts = fonts.len(),
            "report assembled"
        );

        Ok(AssembleResult {
            html,
            parts_included,
            parts_skipped,
            images_embedded: stats.embedded,
            images_missing: stats.missing,
        })
    }
}

/// Write the report in one operation (temp file, then rename).
#[instrument(skip_all, fields(path = %path.display(), size = html.len()))]
pub fn write_report(path: &Path, html: &str) -> Result<WrittenReport> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FolioError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| FolioError::validation(format!("{} is not a file path", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, html).map_err(|e| FolioError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        std::fs::remove_file(&temp).ok();
        return Err(FolioError::io(path, e));
    }

    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    info!(sha256 = %sha256, "report written");

    Ok(WrittenReport {
        path: path.to_path_buf(),
        size_bytes: html.len(),
        sha256,
    })
}

/// Assemble the report described by `loaded` from disk and write it.
///
/// `output` overrides the configured destination; it is used as given,
/// while the configured one resolves against the config directory.
pub fn build_report(
    loaded: &LoadedConfig,
    output: Option<&Path>,
) -> Result<(AssembleResult, WrittenReport)> {
    let store = FsStore::new(&loaded.base_dir);
    let result = Assembler::new(&loaded.config, &store).assemble()?;

    let destination = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| loaded.resolve(&loaded.config.output));
    let written = write_report(&destination, &result.html)?;

    Ok((result, written))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
