//! Error types for the patch engine.
//!
//! Each variant carries enough position detail for a caller to correct
//! the batch and retry.

use serde::Serialize;
use thiserror::Error;

use crate::op::Span;

/// Reasons a batch is rejected. The input lines are never modified.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchError {
    /// An operation's indices fall outside the original file.
    #[error(
        "operation {op_index} targets lines {span} but the file has {len} lines (valid positions 0..={len}, start <= end)"
    )]
    OutOfRange {
        /// Position of the operation in the batch.
        op_index: usize,
        /// The range the operation asked for.
        span: Span,
        /// Line count of the original file.
        len: usize,
    },

    /// Two operations touch overlapping lines of the original file.
    #[error("operations {first} (lines {first_span}) and {second} (lines {second_span}) overlap")]
    ConflictingEdit {
        /// Batch position of the earlier-listed operation.
        first: usize,
        first_span: Span,
        /// Batch position of the later-listed operation.
        second: usize,
        second_span: Span,
    },

    /// Supplied text for a single line contains a line terminator.
    #[error("operation {op_index}: supplied line {line} contains a line terminator")]
    InvalidContent {
        op_index: usize,
        /// Index into the operation's own `lines`.
        line: usize,
    },
}

impl PatchError {
    pub fn out_of_range(op_index: usize, span: Span, len: usize) -> Self {
        Self::OutOfRange { op_index, span, len }
    }

    /// Build a conflict error, ordering the pair by batch position.
    pub fn conflict(a: usize, a_span: Span, b: usize, b_span: Span) -> Self {
        let ((first, first_span), (second, second_span)) = if a <= b {
            ((a, a_span), (b, b_span))
        } else {
            ((b, b_span), (a, a_span))
        };
        Self::ConflictingEdit {
            first,
            first_span,
            second,
            second_span,
        }
    }

    /// Stable snake_case code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::ConflictingEdit { .. } => "conflicting_edit",
            Self::InvalidContent { .. } => "invalid_content",
        }
    }
}

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;
