//! Report assembly for Folio.
//!
//! Ties the chapter parser to chart injection, the fixed report sections and
//! the page template, producing one self-contained HTML document.

pub mod assembler;
pub mod binder;
pub mod sections;
pub mod store;
pub mod template;
pub mod toc;

pub use assembler::{AssembleResult, Assembler, WrittenReport, build_report, write_report};
pub use binder::{AssetBinder, BinderStats};
pub use store::{ContentStore, FsStore};
