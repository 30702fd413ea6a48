//! The project store: lifecycle, locking and file operations.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard};
use sitebuilder_patch::{EditOp, join_lines, line_count, line_delta, split_lines};

use crate::backends::{DirBackend, MemoryBackend, StorageBackend};
use crate::error::{StoreError, StoreResult};
use crate::site_file::{Scaffold, SiteFile};

/// Directory name used under the data dir and as the cwd fallback.
const PROJECT_DIR: &str = "website";

/// Lifecycle of a project. `ensure` is the only transition and it is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    Uninitialized,
    Ready,
}

impl ProjectState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectState::Uninitialized => "uninitialized",
            ProjectState::Ready => "ready",
        }
    }
}

/// Where and how a directory-backed store is opened.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub scaffold: Scaffold,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scaffold: Scaffold::default(),
        }
    }

    pub fn with_scaffold(mut self, scaffold: Scaffold) -> Self {
        self.scaffold = scaffold;
        self
    }

    /// `$XDG_DATA_HOME/sitebuilder/website`, or `./website` when there is
    /// no data directory.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("sitebuilder").join(PROJECT_DIR))
            .unwrap_or_else(|| PathBuf::from(PROJECT_DIR))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

/// Result of a successful `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub file: SiteFile,
    pub lines_before: usize,
    pub lines_after: usize,
    /// The full new text of the file.
    pub content: String,
}

/// Owner of one website project.
///
/// Every operation is a bounded, synchronous transaction. `ensure` holds
/// the lifecycle lock exclusively; everything else holds it shared plus
/// the mutex of each file it touches, for the whole read-compute-write.
#[derive(Debug)]
pub struct ProjectStore {
    backend: Box<dyn StorageBackend>,
    scaffold: Scaffold,
    state: RwLock<ProjectState>,
    locks: [Mutex<()>; 3],
}

/// Shared handle used by the MCP server.
pub type SharedProjectStore = Arc<ProjectStore>;

/// Create a shared in-memory store.
pub fn shared_project_store(scaffold: Scaffold) -> SharedProjectStore {
    Arc::new(ProjectStore::in_memory(scaffold))
}

impl ProjectStore {
    /// Wrap a backend. The store starts `Ready` when all three files are
    /// already present.
    pub fn new(backend: Box<dyn StorageBackend>, scaffold: Scaffold) -> StoreResult<Self> {
        let mut present = 0;
        for file in SiteFile::ALL {
            if backend.exists(file)? {
                present += 1;
            }
        }
        let state = if present == SiteFile::ALL.len() {
            ProjectState::Ready
        } else {
            ProjectState::Uninitialized
        };

        tracing::debug!(
            backend = %backend.describe(),
            state = state.as_str(),
            present,
            "Opened project store"
        );

        Ok(Self {
            backend,
            scaffold,
            state: RwLock::new(state),
            locks: std::array::from_fn(|_| Mutex::new(())),
        })
    }

    /// Ephemeral store; starts `Uninitialized`.
    pub fn in_memory(scaffold: Scaffold) -> Self {
        Self {
            backend: Box::new(MemoryBackend::new()),
            scaffold,
            state: RwLock::new(ProjectState::Uninitialized),
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Directory-backed store.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::new(Box::new(DirBackend::new(&config.root)), config.scaffold)
    }

    pub fn state(&self) -> ProjectState {
        *self.state.read()
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// The single `NotReady` guard. The returned guard keeps `ensure` out
    /// for the rest of the operation.
    fn ready(&self) -> StoreResult<RwLockReadGuard<'_, ProjectState>> {
        let state = self.state.read();
        match *state {
            ProjectState::Ready => Ok(state),
            ProjectState::Uninitialized => Err(StoreError::NotReady),
        }
    }

    fn lock(&self, file: SiteFile) -> MutexGuard<'_, ()> {
        self.locks[file.index()].lock()
    }

    /// Create the namespace and any missing file. Returns the files that
    /// were created; empty when everything already existed.
    pub fn ensure(&self) -> StoreResult<Vec<SiteFile>> {
        let mut state = self.state.write();
        self.backend.prepare()?;

        let mut created = Vec::new();
        for file in SiteFile::ALL {
            if !self.backend.exists(file)? {
                self.backend.save(file, self.scaffold.content(file))?;
                created.push(file);
            }
        }

        if *state == ProjectState::Uninitialized {
            tracing::info!(backend = %self.backend.describe(), "Project ready");
        }
        *state = ProjectState::Ready;

        if !created.is_empty() {
            tracing::info!(
                created = ?created.iter().map(SiteFile::as_str).collect::<Vec<_>>(),
                scaffold = %self.scaffold,
                "Created project files"
            );
        }
        Ok(created)
    }

    /// Current text of all three files.
    pub fn get_all(&self) -> StoreResult<BTreeMap<SiteFile, String>> {
        let _ready = self.ready()?;
        // Canonical order, same as every other multi-lock path.
        let _guards: Vec<_> = SiteFile::ALL.iter().map(|f| self.lock(*f)).collect();

        let mut website = BTreeMap::new();
        for file in SiteFile::ALL {
            website.insert(file, self.backend.load(file)?);
        }
        tracing::debug!("Read full project state");
        Ok(website)
    }

    /// Read one file by name.
    pub fn read(&self, name: &str) -> StoreResult<String> {
        self.read_file(SiteFile::parse(name)?)
    }

    pub fn read_file(&self, file: SiteFile) -> StoreResult<String> {
        let _ready = self.ready()?;
        let _guard = self.lock(file);
        let text = self.backend.load(file)?;
        tracing::debug!(file = %file, bytes = text.len(), "Read file");
        Ok(text)
    }

    /// Replace a file's entire content.
    pub fn write_whole(&self, name: &str, text: &str) -> StoreResult<SiteFile> {
        let file = SiteFile::parse(name)?;
        validate_text(file, text)?;

        let _ready = self.ready()?;
        let _guard = self.lock(file);
        self.backend.save(file, text)?;
        tracing::info!(file = %file, bytes = text.len(), "Wrote file");
        Ok(file)
    }

    /// Apply an edit batch to one file. The file is only written when the
    /// whole batch applies.
    pub fn update(&self, name: &str, ops: &[EditOp]) -> StoreResult<UpdateOutcome> {
        let file = SiteFile::parse(name)?;
        let _ready = self.ready()?;
        let _guard = self.lock(file);

        let original = split_lines(&self.backend.load(file)?);
        let updated = sitebuilder_patch::apply(&original, ops).inspect_err(|e| {
            tracing::warn!(file = %file, ops = ops.len(), error = %e, "Rejected edit batch");
        })?;

        // A lone empty line joins to "", which reads back as no lines.
        let content = join_lines(&updated);
        let lines_after = line_count(&content);
        self.backend.save(file, &content)?;

        let (removed, added) = line_delta(ops);
        tracing::info!(
            file = %file,
            ops = ops.len(),
            removed,
            added,
            lines_before = original.len(),
            lines_after,
            "Applied edit batch"
        );

        Ok(UpdateOutcome {
            file,
            lines_before: original.len(),
            lines_after,
            content,
        })
    }
}

fn validate_text(file: SiteFile, text: &str) -> StoreResult<()> {
    if let Some(offset) = text.find('\0') {
        return Err(StoreError::InvalidContent(format!(
            "{} content contains a NUL byte at offset {}",
            file, offset
        )));
    }
    Ok(())
}
