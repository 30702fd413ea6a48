//! Directory backend.
//!
//! Each project file is a plain file under `root`. Writes go to a hidden
//! sibling temp file first and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StorageBackend;
use crate::error::{StoreError, StoreResult};
use crate::site_file::SiteFile;

#[derive(Debug, Clone)]
pub struct DirBackend {
    root: PathBuf,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file: SiteFile) -> PathBuf {
        self.root.join(file.as_str())
    }

    fn tmp_path(&self, file: SiteFile) -> PathBuf {
        self.root.join(format!(".{}.tmp", file.as_str()))
    }
}

impl StorageBackend for DirBackend {
    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }

    fn prepare(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))
    }

    fn exists(&self, file: SiteFile) -> StoreResult<bool> {
        let path = self.path(file);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn load(&self, file: SiteFile) -> StoreResult<String> {
        let path = self.path(file);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(format!("{} does not exist", file)),
            _ => StoreError::io(path, e),
        })
    }

    fn save(&self, file: SiteFile, text: &str) -> StoreResult<()> {
        let path = self.path(file);
        let tmp = self.tmp_path(file);

        if let Err(e) = fs::write(&tmp, text) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_nested_root() {
        let tmp = TempDir::new().unwrap();
        let backend = DirBackend::new(tmp.path().join("a/b/website"));
        backend.prepare().unwrap();
        assert!(backend.root().is_dir());
    }

    #[test]
    fn test_save_leaves_no_tmp() {
        let tmp = TempDir::new().unwrap();
        let backend = DirBackend::new(tmp.path());
        backend.save(SiteFile::Html, "<p>hi</p>").unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("index.html")).unwrap(), "<p>hi</p>");
        assert!(!backend.tmp_path(SiteFile::Html).exists());
        assert_eq!(backend.load(SiteFile::Html).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_exists_and_missing_load() {
        let tmp = TempDir::new().unwrap();
        let backend = DirBackend::new(tmp.path());
        assert!(!backend.exists(SiteFile::Script).unwrap());
        assert!(matches!(
            backend.load(SiteFile::Script).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_directory_named_like_file_is_not_a_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("styles.css")).unwrap();
        let backend = DirBackend::new(tmp.path());
        assert!(!backend.exists(SiteFile::Css).unwrap());
    }

    #[test]
    fn test_failed_rename_keeps_target_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let backend = DirBackend::new(tmp.path());

        // A non-empty directory in the target's place makes the rename fail,
        // whatever the caller's privileges.
        let blocker = tmp.path().join("styles.css");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "kept").unwrap();

        let err = backend.save(SiteFile::Css, "new content").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!backend.tmp_path(SiteFile::Css).exists());
        assert_eq!(fs::read_to_string(blocker.join("keep")).unwrap(), "kept");
    }

    #[test]
    fn test_failed_write_leaves_no_tmp() {
        let tmp = TempDir::new().unwrap();
        // Root never prepared and its parent is a file, so the temp write fails.
        let file = tmp.path().join("not-a-dir");
        fs::write(&file, "").unwrap();
        let backend = DirBackend::new(file.join("website"));

        let err = backend.save(SiteFile::Html, "<p>hi</p>").unwrap_err();
        assert_eq!(err.kind(), "io");
        assert!(!backend.tmp_path(SiteFile::Html).exists());
    }
}
