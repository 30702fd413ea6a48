//! In-memory backend.
//!
//! Used for `--memory` mode and tests. All data is ephemeral.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::StorageBackend;
use crate::error::{StoreError, StoreResult};
use crate::site_file::SiteFile;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: RwLock<HashMap<SiteFile, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with the given files.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (SiteFile, &'a str)>) -> Self {
        let files = files
            .into_iter()
            .map(|(file, text)| (file, text.to_string()))
            .collect();
        Self {
            files: RwLock::new(files),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn prepare(&self) -> StoreResult<()> {
        Ok(())
    }

    fn exists(&self, file: SiteFile) -> StoreResult<bool> {
        Ok(self.files.read().contains_key(&file))
    }

    fn load(&self, file: SiteFile) -> StoreResult<String> {
        self.files
            .read()
            .get(&file)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{} does not exist", file)))
    }

    fn save(&self, file: SiteFile, text: &str) -> StoreResult<()> {
        self.files.write().insert(file, text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let backend = MemoryBackend::new();
        assert!(!backend.exists(SiteFile::Css).unwrap());
        backend.save(SiteFile::Css, "body {}").unwrap();
        assert!(backend.exists(SiteFile::Css).unwrap());
        assert_eq!(backend.load(SiteFile::Css).unwrap(), "body {}");
    }

    #[test]
    fn test_load_missing() {
        let backend = MemoryBackend::new();
        let err = backend.load(SiteFile::Script).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
