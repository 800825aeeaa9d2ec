//! Read access to chapter sources, chart images and fonts.
//!
//! Lookups return `Ok(None)` when the file does not exist so callers can skip
//! it explicitly; every other failure is a real error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_shared::{FolioError, Result};

/// Source of the files a report is built from.
pub trait ContentStore {
    /// Read a UTF-8 text file, or `None` if it does not exist.
    fn read_text(&self, path: &Path) -> Result<Option<String>>;

    /// Read a binary file, or `None` if it does not exist.
    fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>>;
}

/// Filesystem store resolving relative paths against a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl ContentStore for FsStore {
    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        let full = self.resolve(path);
        missing_as_none(&full, std::fs::read_to_string(&full))
    }

    fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let full = self.resolve(path);
        missing_as_none(&full, std::fs::read(&full))
    }
}

fn missing_as_none<T>(path: &Path, result: std::io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FolioError::io(path, e)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-store-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_relative_to_root() {
        let dir = temp_dir();
        std::fs::write(dir.join("Part1.md"), "# 第一部分\n").unwrap();
        std::fs::write(dir.join("chart.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let store = FsStore::new(&dir);
        assert_eq!(
            store.read_text(Path::new("Part1.md")).unwrap().as_deref(),
            Some("# 第一部分\n")
        );
        assert_eq!(
            store.read_bytes(Path::new("chart.png")).unwrap(),
            Some(vec![0x89, b'P', b'N', b'G'])
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_files_are_none() {
        let dir = temp_dir();
        let store = FsStore::new(&dir);
        assert!(store.read_text(Path::new("absent.md")).unwrap().is_none());
        assert!(store.read_bytes(Path::new("absent.png")).unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn other_failures_are_errors() {
        let dir = temp_dir();
        std::fs::write(dir.join("bad.md"), [0xff, 0xfe, 0xfd]).unwrap();
        // A directory cannot be read as a file.
        std::fs::create_dir_all(dir.join("folder.png")).unwrap();

        let store = FsStore::new(&dir);
        assert!(store.read_text(Path::new("bad.md")).is_err());
        assert!(store.read_bytes(Path::new("folder.png")).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
