//! Report configuration for Folio.
//!
//! A report is described by a `folio.toml` file. Every section has defaults, so
//! an empty file (or no file at all) yields the stock four-part market report.
//! Relative paths inside the file resolve against the file's own directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

// ---------------------------------------------------------------------------
// Config structs (matching folio.toml schema)
// ---------------------------------------------------------------------------

/// Top-level report config, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Destination of the generated HTML document.
    #[serde(default = "default_output")]
    pub output: String,

    /// Chapter sources, in document order.
    #[serde(default = "default_parts")]
    pub parts: Vec<String>,

    /// Page-level metadata.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Introduction block shown above the table of contents.
    #[serde(default)]
    pub intro: IntroConfig,

    /// Table of contents.
    #[serde(default)]
    pub toc: TocConfig,

    /// Footer lines.
    #[serde(default)]
    pub footer: FooterConfig,

    /// Font faces embedded into the stylesheet.
    #[serde(default = "default_fonts")]
    pub fonts: Vec<FontFace>,

    /// Chart bindings, tested in order against section-marker lines.
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetBinding>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            parts: default_parts(),
            document: DocumentConfig::default(),
            intro: IntroConfig::default(),
            toc: TocConfig::default(),
            footer: FooterConfig::default(),
            fonts: default_fonts(),
            assets: default_assets(),
        }
    }
}

fn default_output() -> String {
    "Market_Analysis_Final.html".into()
}

fn default_parts() -> Vec<String> {
    (1..=4).map(|n| format!("Part{n}_Analysis.md")).collect()
}

fn default_fonts() -> Vec<FontFace> {
    let dir = "HarmonyOS Sans/HarmonyOS_Sans_SC";
    [("Regular", 400), ("Bold", 700), ("Light", 300)]
        .into_iter()
        .map(|(style, weight)| FontFace {
            family: "HarmonyOS Sans SC".into(),
            path: format!("{dir}/HarmonyOS_Sans_SC_{style}.ttf"),
            weight,
        })
        .collect()
}

fn default_assets() -> Vec<AssetBinding> {
    [
        ("chart_intraday_reversal.png", "1.1.1"),
        ("chart_liquidity_depth.png", "1.2.1"),
        ("chart_btc_correlation.png", "2.1.2"),
        ("chart_rate_cut_prob.png", "2.3.1"),
        ("chart_historical_returns.png", "3.1.2"),
        ("chart_cta_threshold.png", "3.2.2"),
        ("chart_fund_flow_rsi.png", "4.2.2"),
        ("chart_valuation_scatter.png", "4.2.3"),
    ]
    .into_iter()
    .map(|(path, section)| AssetBinding::new(path, section))
    .collect()
}

/// `[document]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Text of the `<title>` element.
    #[serde(default = "default_title")]
    pub title: String,

    /// Value of the `lang` attribute on `<html>`.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            lang: default_lang(),
        }
    }
}

fn default_title() -> String {
    "Market Analysis Report".into()
}
fn default_lang() -> String {
    "zh-CN".into()
}

/// `[intro]` section. Every field accepts inline emphasis markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroConfig {
    #[serde(default)]
    pub meta_tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Label above the executive summary.
    #[serde(default)]
    pub summary_label: String,
    /// Executive summary paragraph; the summary box is omitted when empty.
    #[serde(default)]
    pub summary: String,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            meta_tag: "2025 Q4 STRATEGY".into(),
            title: "流动性真空与<br>市场新秩序".into(),
            subtitle: "2025年11月21日暴跌的全景式复盘与战略展望".into(),
            summary_label: "EXECUTIVE SUMMARY".into(),
            summary: "2025年11月21日，美股经历了一场罕见的“高开低走”，标普500在利好中暴跌。\
                      本报告通过微观结构分析指出，这并非熊市的开始，而是\
                      **宏观风险消退后的获利了结 (Unwind)**。在极度枯竭的流动性下，\
                      市场完成了一次剧烈的清洗。历史量化数据显示，此类形态往往是多头行情的\
                      “空中加油”，T+1月平均上涨 **4.72%**。"
                .into(),
        }
    }
}

/// `[toc]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Heading of the TOC box.
    #[serde(default = "default_toc_title")]
    pub title: String,

    /// Explicit entries. When empty the TOC is derived from chapter headings.
    #[serde(default)]
    pub entries: Vec<String>,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: default_toc_title(),
            entries: vec![
                "**第一部分**：法医学式复盘 —— 11.21 市场崩溃的解剖".into(),
                "**第二部分**：全球资产联动与深层归因".into(),
                "**第三部分**：量化指引与历史镜像".into(),
                "**第四部分**：未来策略与战术执行".into(),
            ],
        }
    }
}

fn default_toc_title() -> String {
    "目录 (Table of Contents)".into()
}

/// `[footer]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterConfig {
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            lines: vec!["HORIZON GLOBAL STRATEGY | 2025".into()],
        }
    }
}

/// `[[fonts]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub family: String,
    /// Font file, relative to the config directory.
    pub path: String,
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_weight() -> u16 {
    400
}

/// `[[assets]]` entry: embed `path` after the first section marker containing `section`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBinding {
    /// Image file, relative to the config directory. Also the caption source.
    pub path: String,
    /// Section key, matched as a plain substring of the marker line.
    pub section: String,
}

impl AssetBinding {
    pub fn new(path: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            section: section.into(),
        }
    }
}

impl ReportConfig {
    /// Reject configurations that cannot produce a sensible report.
    ///
    /// Duplicate section keys are allowed (first binding wins) and only logged.
    pub fn validate(&self) -> Result<()> {
        if self.output.trim().is_empty() {
            return Err(FolioError::validation("output path must not be empty"));
        }

        for (idx, binding) in self.assets.iter().enumerate() {
            if binding.path.trim().is_empty() {
                return Err(FolioError::validation(format!(
                    "asset binding #{idx} has an empty path"
                )));
            }
            // An empty key is a substring of every marker line.
            if binding.section.is_empty() {
                return Err(FolioError::validation(format!(
                    "asset binding #{idx} ({}) has an empty section key",
                    binding.path
                )));
            }
        }

        let mut seen = HashSet::new();
        for binding in &self.assets {
            if !seen.insert(binding.section.as_str()) {
                tracing::warn!(
                    section = %binding.section,
                    path = %binding.path,
                    "duplicate section key, only the first binding will ever match"
                );
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// A parsed config together with the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ReportConfig,
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    /// Resolve a config-relative path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// Load and validate a report config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;

    let config: ReportConfig = toml::from_str(&content)
        .map_err(|e| FolioError::config(format!("failed to parse {}: {e}", path.display())))?;
    config.validate()?;

    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::debug!(
        ?path,
        parts = config.parts.len(),
        assets = config.assets.len(),
        "loaded report config"
    );

    Ok(LoadedConfig { config, base_dir })
}

/// Load the config at `path`, falling back to defaults rooted at `fallback_dir`
/// when the file does not exist.
pub fn load_config_or_default(path: &Path, fallback_dir: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(LoadedConfig {
            config: ReportConfig::default(),
            base_dir: fallback_dir.to_path_buf(),
        });
    }

    load_config_from(path)
}

/// Write the default config to `path`. Refuses to overwrite unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FolioError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| FolioError::io(dir, e))?;
    }

    let content = to_toml(&ReportConfig::default())?;
    std::fs::write(path, content).map_err(|e| FolioError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

/// Serialize a config as pretty TOML.
pub fn to_toml(config: &ReportConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| FolioError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_config_serializes() {
        let toml_str = to_toml(&ReportConfig::default()).expect("serialize default config");
        assert!(toml_str.contains("output"));
        assert!(toml_str.contains("chart_intraday_reversal.png"));
        assert!(toml_str.contains("[[assets]]"));
    }

    #[test]
    fn config_roundtrip() {
        let config = ReportConfig::default();
        let toml_str = to_toml(&config).expect("serialize");
        let parsed: ReportConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let parsed: ReportConfig = toml::from_str("").expect("parse");
        assert_eq!(parsed, ReportConfig::default());
        assert_eq!(parsed.parts.len(), 4);
        assert_eq!(parsed.assets.len(), 8);
    }

    #[test]
    fn asset_order_is_preserved() {
        let toml_str = r#"
output = "out.html"
parts = ["a.md"]

[[assets]]
path = "z.png"
section = "2.1"

[[assets]]
path = "a.png"
section = "1.1"
"#;
        let config: ReportConfig = toml::from_str(toml_str).expect("parse");
        let paths: Vec<_> = config.assets.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, ["z.png", "a.png"]);
    }

    #[test]
    fn validate_rejects_empty_section_key() {
        let mut config = ReportConfig::default();
        config.assets.push(AssetBinding::new("chart.png", ""));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("empty section key"));
    }

    #[test]
    fn validate_rejects_empty_output() {
        let config = ReportConfig {
            output: "  ".into(),
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_allows_duplicate_keys() {
        let mut config = ReportConfig::default();
        config.assets.push(AssetBinding::new("again.png", "1.1.1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_resolves_against_config_dir() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "output = \"report.html\"\nparts = [\"ch1.md\"]\n").unwrap();

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.base_dir, dir);
        assert_eq!(loaded.resolve("ch1.md"), dir.join("ch1.md"));
        assert_eq!(loaded.config.parts, ["ch1.md"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "parts = 3").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("config error"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = temp_dir();
        let loaded = load_config_or_default(&dir.join("absent.toml"), &dir).expect("load");
        assert_eq!(loaded.config, ReportConfig::default());
        assert_eq!(loaded.base_dir, dir);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);

        init_config(&path, false).expect("first init");
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).expect("forced init");

        let loaded = load_config_from(&path).expect("load written config");
        assert_eq!(loaded.config, ReportConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }
}
