//! Line-based patch engine.
//!
//! Applies a batch of positional edits to a file's lines as one atomic unit.
//! Every index in a batch refers to the file as it was *before* the batch,
//! so callers never have to account for lines shifted by earlier edits.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  original lines + Vec<EditOp> │
//! └──────────────┬───────────────┘
//!                │ validate against original length
//!                ▼
//! ┌──────────────────────────────┐
//! │  conflict sweep (by start)    │
//! └──────────────┬───────────────┘
//!                │ splice highest position first
//!                ▼
//! ┌──────────────────────────────┐
//! │  new lines  |  PatchError     │
//! └──────────────────────────────┘
//! ```
//!
//! The engine knows nothing about file names or storage.

pub mod apply;
pub mod error;
pub mod lines;
pub mod op;

pub use apply::{apply, line_delta};
pub use error::{PatchError, Result};
pub use lines::{join_lines, line_count, numbered, split_lines};
pub use op::{EditOp, Span};
