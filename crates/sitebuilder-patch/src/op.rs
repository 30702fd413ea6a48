//! Edit operations and the line spans they cover.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open line range `[start, end)` in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `at`.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A single line-level change. Indices are 0-based and refer to the
/// file before any operation of the batch is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Insert lines before `at`. `at == len` appends.
    Insert {
        at: usize,
        #[serde(default)]
        lines: Vec<String>,
    },
    /// Replace lines `[start, end)`. Empty `lines` behaves like `Delete`.
    Replace {
        start: usize,
        end: usize,
        #[serde(default)]
        lines: Vec<String>,
    },
    /// Remove lines `[start, end)`.
    Delete { start: usize, end: usize },
}

/// How much of the original file an operation occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Footprint {
    /// Consumes a non-empty range of original lines.
    Range(Span),
    /// Adds lines at a position without consuming any.
    Point(usize),
}

impl Footprint {
    pub(crate) fn start(&self) -> usize {
        match self {
            Footprint::Range(span) => span.start,
            Footprint::Point(at) => *at,
        }
    }

    pub(crate) fn span(&self) -> Span {
        match self {
            Footprint::Range(span) => *span,
            Footprint::Point(at) => Span::point(*at),
        }
    }
}

impl EditOp {
    pub fn insert<S: Into<String>>(at: usize, lines: impl IntoIterator<Item = S>) -> Self {
        Self::Insert {
            at,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn replace<S: Into<String>>(
        start: usize,
        end: usize,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::Replace {
            start,
            end,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::Delete { start, end }
    }

    /// Range of original lines this operation addresses.
    pub fn span(&self) -> Span {
        match self {
            EditOp::Insert { at, .. } => Span::point(*at),
            EditOp::Replace { start, end, .. } | EditOp::Delete { start, end } => {
                Span::new(*start, *end)
            }
        }
    }

    /// Lines written by this operation.
    pub fn lines(&self) -> &[String] {
        match self {
            EditOp::Insert { lines, .. } | EditOp::Replace { lines, .. } => lines,
            EditOp::Delete { .. } => &[],
        }
    }

    /// `None` when the operation has no effect (a zero-width range with no text).
    pub(crate) fn footprint(&self) -> Option<Footprint> {
        let span = self.span();
        if !span.is_empty() {
            Some(Footprint::Range(span))
        } else if !self.lines().is_empty() {
            Some(Footprint::Point(span.start))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let op: EditOp =
            serde_json::from_str(r#"{"op": "replace", "start": 1, "end": 2, "lines": ["x"]}"#)
                .unwrap();
        assert_eq!(op, EditOp::replace(1, 2, ["x"]));

        let op: EditOp = serde_json::from_str(r#"{"op": "insert", "at": 0}"#).unwrap();
        assert_eq!(op, EditOp::Insert { at: 0, lines: vec![] });

        let op: EditOp = serde_json::from_str(r#"{"op": "delete", "start": 0, "end": 3}"#).unwrap();
        assert_eq!(op.span(), Span::new(0, 3));
    }

    #[test]
    fn test_negative_index_rejected() {
        let res: Result<EditOp, _> = serde_json::from_str(r#"{"op": "insert", "at": -1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_footprint() {
        assert_eq!(
            EditOp::delete(2, 4).footprint(),
            Some(Footprint::Range(Span::new(2, 4)))
        );
        assert_eq!(EditOp::insert(3, ["a"]).footprint(), Some(Footprint::Point(3)));
        assert_eq!(EditOp::replace(3, 3, ["a"]).footprint(), Some(Footprint::Point(3)));
        assert_eq!(EditOp::delete(3, 3).footprint(), None);
        assert_eq!(EditOp::insert(1, Vec::<String>::new()).footprint(), None);
    }
}
