//! MCP request types.
//!
//! These types define the API for the sitebuilder MCP tools.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Read a single project file.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadFileRequest {
    /// File to read
    #[schemars(description = "File to read: index.html, styles.css, or script.js")]
    pub file: String,
    /// Include a 0-indexed numbered rendering
    #[schemars(description = "Also return the content with 0-indexed line numbers, as used by update_file (default: false)")]
    #[serde(default)]
    pub line_numbers: bool,
}

/// Replace a file's entire content.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WriteFileRequest {
    /// File to write
    #[schemars(description = "File to write: index.html, styles.css, or script.js")]
    pub file: String,
    /// New full content
    #[schemars(description = "Complete new file content (replaces everything)")]
    pub content: String,
}

/// Edit operation within a file.
///
/// All line numbers refer to the file as it was before the batch.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Insert lines before a line
    Insert {
        #[schemars(description = "Line to insert before (0-indexed; equal to the line count appends)")]
        at: usize,
        #[schemars(description = "Lines to insert, without newline characters")]
        #[serde(default)]
        lines: Vec<String>,
    },
    /// Replace lines [start, end)
    Replace {
        #[schemars(description = "Start line (0-indexed)")]
        start: usize,
        #[schemars(description = "End line (exclusive)")]
        end: usize,
        #[schemars(description = "Replacement lines, without newline characters (empty deletes)")]
        #[serde(default)]
        lines: Vec<String>,
    },
    /// Delete lines [start, end)
    Delete {
        #[schemars(description = "Start line (0-indexed)")]
        start: usize,
        #[schemars(description = "End line (exclusive)")]
        end: usize,
    },
}

impl From<EditOp> for sitebuilder_store::EditOp {
    fn from(op: EditOp) -> Self {
        match op {
            EditOp::Insert { at, lines } => Self::Insert { at, lines },
            EditOp::Replace { start, end, lines } => Self::Replace { start, end, lines },
            EditOp::Delete { start, end } => Self::Delete { start, end },
        }
    }
}

/// Edit a file with line-based operations.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFileRequest {
    /// File to edit
    #[schemars(description = "File to edit: index.html, styles.css, or script.js")]
    pub file: String,
    /// Edit operations to apply atomically
    #[schemars(description = "Edit operations applied atomically; line numbers refer to the file before any of them")]
    pub operations: Vec<EditOp>,
    /// Return the new file content
    #[schemars(description = "Include the updated file content in the response (default: false)")]
    #[serde(default)]
    pub return_content: bool,
}
