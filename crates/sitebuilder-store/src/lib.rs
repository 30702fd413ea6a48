//! Project store for a three-file website.
//!
//! A project is exactly `index.html`, `styles.css` and `script.js`. The
//! store owns their lifecycle (`Uninitialized` until `ensure`, then
//! `Ready`), serializes access per file, and runs line edits through
//! [`sitebuilder_patch`] so a rejected batch never touches storage.
//!
//! ## Backends
//!
//! - **Memory**: ephemeral, for tests and `--memory` mode
//! - **Dir**: one directory on disk, atomic temp-and-rename writes
//!
//! ## Module Structure
//!
//! - `store`: `ProjectStore`, lifecycle state and locking
//! - `site_file`: the canonical file set and scaffold content
//! - `backends`: `StorageBackend` and its implementations
//! - `error`: `StoreError`

pub mod backends;
pub mod error;
pub mod site_file;
pub mod store;

pub use backends::{DirBackend, MemoryBackend, StorageBackend};
pub use error::{StoreError, StoreResult};
pub use site_file::{Scaffold, SiteFile};
pub use store::{
    ProjectState, ProjectStore, SharedProjectStore, StoreConfig, UpdateOutcome,
    shared_project_store,
};

// Re-export the engine types callers need to build batches.
pub use sitebuilder_patch::{EditOp, PatchError, Span};
