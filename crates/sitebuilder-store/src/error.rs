//! Store error taxonomy.

use std::path::PathBuf;

use sitebuilder_patch::PatchError;
use thiserror::Error;

/// Errors from project store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown file name, or a file missing from storage.
    #[error("not found: {0}")]
    NotFound(String),

    /// The project has not been created yet.
    #[error("project not initialized: call ensure_website first")]
    NotReady,

    /// Text rejected before anything was written.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// An edit batch was rejected by the patch engine.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Underlying storage failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable snake_case code reported to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::NotReady => "not_ready",
            Self::InvalidContent(_) => "invalid_content",
            Self::Patch(e) => e.kind(),
            Self::Io { .. } => "io",
        }
    }

    /// The structured engine diagnostic, when there is one.
    pub fn patch_error(&self) -> Option<&PatchError> {
        match self {
            Self::Patch(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sitebuilder_patch::Span;

    #[test]
    fn test_kinds() {
        assert_eq!(StoreError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(StoreError::NotReady.kind(), "not_ready");
        assert_eq!(StoreError::InvalidContent("x".into()).kind(), "invalid_content");
        let patch: StoreError = PatchError::out_of_range(0, Span::new(3, 9), 2).into();
        assert_eq!(patch.kind(), "out_of_range");
        assert!(patch.patch_error().is_some());
    }

    #[test]
    fn test_patch_message_passes_through() {
        let err: StoreError = PatchError::out_of_range(4, Span::new(3, 9), 2).into();
        assert!(err.to_string().starts_with("operation 4"));
    }
}
