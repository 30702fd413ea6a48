//! Batch application.

use std::cmp::Ordering;

use crate::error::{PatchError, Result};
use crate::op::{EditOp, Footprint, Span};

/// Apply `ops` to `original` and return the new lines.
///
/// All indices are checked against `original.len()` and all pairs are
/// checked for overlap before anything is spliced, so an error always
/// means nothing was applied. `original` itself is never modified.
pub fn apply(original: &[String], ops: &[EditOp]) -> Result<Vec<String>> {
    let len = original.len();
    for (op_index, op) in ops.iter().enumerate() {
        validate(op_index, op, len)?;
    }

    let mut effective: Vec<(usize, Footprint)> = ops
        .iter()
        .enumerate()
        .filter_map(|(idx, op)| op.footprint().map(|fp| (idx, fp)))
        .collect();

    effective.sort_by_key(|(idx, fp)| (fp.start(), *idx));
    check_conflicts(&effective)?;

    // Highest position first: splicing at a position never moves lines
    // below it, so the original indices of later splices stay valid.
    effective.sort_by(|a, b| application_order(*a, *b));

    let mut lines = original.to_vec();
    for (idx, fp) in effective {
        let span = fp.span();
        lines.splice(span.start..span.end, ops[idx].lines().iter().cloned());
    }
    Ok(lines)
}

fn validate(op_index: usize, op: &EditOp, len: usize) -> Result<()> {
    let span = op.span();
    if span.start > span.end || span.end > len {
        return Err(PatchError::out_of_range(op_index, span, len));
    }
    if let Some(line) = op.lines().iter().position(|l| l.contains('\n')) {
        return Err(PatchError::InvalidContent { op_index, line });
    }
    Ok(())
}

/// Sweep footprints sorted by start. Only ranges reach forward, so each
/// range is compared with the footprints that begin before it ends.
fn check_conflicts(sorted: &[(usize, Footprint)]) -> Result<()> {
    for (pos, &(outer_idx, outer)) in sorted.iter().enumerate() {
        let Footprint::Range(range) = outer else {
            continue;
        };
        for &(inner_idx, inner) in &sorted[pos + 1..] {
            if inner.start() >= range.end {
                break;
            }
            let overlaps = match inner {
                Footprint::Range(_) => true,
                // Inserting exactly at a range's start lands before it.
                Footprint::Point(at) => at > range.start,
            };
            if overlaps {
                return Err(PatchError::conflict(
                    outer_idx,
                    range,
                    inner_idx,
                    inner.span(),
                ));
            }
        }
    }
    Ok(())
}

/// Descending start. At a shared start the range goes first so points land
/// before its replacement; points go in reverse batch order so they end up
/// in batch order.
fn application_order(a: (usize, Footprint), b: (usize, Footprint)) -> Ordering {
    let rank = |fp: &Footprint| match fp {
        Footprint::Range(_) => 0,
        Footprint::Point(_) => 1,
    };
    b.1.start()
        .cmp(&a.1.start())
        .then_with(|| rank(&a.1).cmp(&rank(&b.1)))
        .then_with(|| b.0.cmp(&a.0))
}

/// Total lines removed and added by a validated batch.
pub fn line_delta(ops: &[EditOp]) -> (usize, usize) {
    ops.iter().fold((0, 0), |(removed, added), op| {
        (removed + op.span().len(), added + op.lines().len())
    })
}
