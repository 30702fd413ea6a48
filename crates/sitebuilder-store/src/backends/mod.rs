//! Storage backends for project files.
//!
//! Backends only move text in and out of storage. Locking, lifecycle and
//! validation live in [`ProjectStore`](crate::ProjectStore).

mod dir;
mod memory;

pub use dir::DirBackend;
pub use memory::MemoryBackend;

use crate::error::StoreResult;
use crate::site_file::SiteFile;

/// Where project files are kept.
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Short description for logs, e.g. `memory` or `dir:/path`.
    fn describe(&self) -> String;

    /// Create the project namespace if it does not exist.
    fn prepare(&self) -> StoreResult<()>;

    fn exists(&self, file: SiteFile) -> StoreResult<bool>;

    /// Read a file. Missing files are `NotFound`.
    fn load(&self, file: SiteFile) -> StoreResult<String>;

    /// Replace a file's content. Readers see either the old or the new
    /// text, never a mix.
    fn save(&self, file: SiteFile, text: &str) -> StoreResult<()>;
}
