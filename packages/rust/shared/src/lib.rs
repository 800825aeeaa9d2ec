//! Shared error model and report configuration for Folio.
//!
//! This crate is the foundation depended on by all other Folio crates.
//! It provides:
//! - [`FolioError`], the unified error type
//! - Configuration ([`ReportConfig`], [`AssetBinding`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AssetBinding, CONFIG_FILE_NAME, DocumentConfig, FontFace, FooterConfig, IntroConfig,
    LoadedConfig, ReportConfig, TocConfig, init_config, load_config_from, load_config_or_default,
    to_toml,
};
pub use error::{FolioError, Result};
