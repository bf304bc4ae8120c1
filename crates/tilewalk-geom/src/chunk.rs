//! Broad-phase chunk assembly.
//!
//! Static obstacles arrive as chunks: rectangles covering one or more whole
//! tiles. Resolving a moving body against every chunk it touches is wasteful
//! and produces spurious side contacts at the seams between chunks, so the
//! assembler breaks the chunks into unit cells, keeps the cells the body
//! actually overlaps, and merges contiguous cells that share a row or a column
//! back into larger composite rectangles.
//!
//! # Merge policies
//!
//! Two merge behaviors exist, selected with [`MergePolicy`]:
//!
//! - [`MergePolicy::Coalesce`] (default): each cell is absorbed by the first
//!   composite that shares its row or column and touches it; otherwise it is
//!   appended once.
//! - [`MergePolicy::Legacy`]: the historical behavior, kept bit-for-bit. A row
//!   or column match extends the composite without checking adjacency, and a
//!   cell is appended once for *every* composite it fails to match, including
//!   composites appended earlier in the same scan. This can emit duplicate or
//!   overlapping composites once more than one composite exists.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::primitives::overlaps;
use crate::rect::{Bounded, Rect};

/// How overlapping cells are merged into composite rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Merge into the first touching composite, else append once
    #[default]
    Coalesce,
    /// Reproduce the historical append-per-mismatch behavior
    Legacy,
}

/// Break chunks into 1×1 cells.
///
/// Each chunk yields `ceil(w)` columns by `ceil(h)` rows of cells anchored at
/// its top-left corner, column by column. Chunks with non-positive size yield
/// nothing.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn decompose(chunk: &[Rect]) -> impl Iterator<Item = Rect> + '_ {
    chunk.iter().flat_map(|rect| {
        let columns = rect.w.ceil().max(0.0) as u32;
        let rows = rect.h.ceil().max(0.0) as u32;
        (0..columns).flat_map(move |col| {
            (0..rows).map(move |row| Rect::new(rect.x + col as f32, rect.y + row as f32, 1.0, 1.0))
        })
    })
}

/// Reduce `chunk` to the merged rectangles that `obj` actually overlaps,
/// using [`MergePolicy::Coalesce`].
///
/// A single-chunk input is returned unchanged, whether or not `obj` overlaps
/// it. An input none of whose cells overlap `obj` yields an empty list.
///
/// # Example
///
/// ```
/// use tilewalk_geom::{assemble_chunk, Rect};
///
/// // Two stacked single-tile chunks, body overlapping both
/// let chunks = [Rect::new(4.0, 0.0, 1.0, 1.0), Rect::new(4.0, 1.0, 1.0, 1.0)];
/// let body = Rect::new(3.5, 0.5, 1.0, 1.0);
/// assert_eq!(assemble_chunk(&chunks, &body), vec![Rect::new(4.0, 0.0, 1.0, 2.0)]);
/// ```
#[must_use]
pub fn assemble_chunk(chunk: &[Rect], obj: &impl Bounded) -> Vec<Rect> {
    assemble_chunk_with(chunk, obj, MergePolicy::Coalesce)
}

/// Reduce `chunk` to merged rectangles under an explicit merge policy.
///
/// `obj`'s override hitbox, when present, decides which cells it overlaps.
#[must_use]
pub fn assemble_chunk_with(chunk: &[Rect], obj: &impl Bounded, policy: MergePolicy) -> Vec<Rect> {
    if chunk.len() == 1 {
        return chunk.to_vec();
    }

    let cells: Vec<Rect> = decompose(chunk)
        .filter(|cell| overlaps(obj, cell, true))
        .collect();

    let Some(first) = cells.first().copied() else {
        return Vec::new();
    };

    let merged = match policy {
        MergePolicy::Coalesce => coalesce(first, &cells[1..]),
        MergePolicy::Legacy => legacy_merge(first, &cells),
    };

    trace!(
        chunks = chunk.len(),
        cells = cells.len(),
        composites = merged.len(),
        ?policy,
        "assembled chunk"
    );
    merged
}

#[allow(clippy::float_cmp)]
fn same_row(a: &Rect, b: &Rect) -> bool {
    a.y == b.y && a.h == b.h
}

#[allow(clippy::float_cmp)]
fn same_column(a: &Rect, b: &Rect) -> bool {
    a.x == b.x && a.w == b.w
}

/// Stretch `target` horizontally to also cover `cell`.
fn extend_horizontally(target: &mut Rect, cell: &Rect) {
    let left = target.x.min(cell.x);
    let right = target.right().max(cell.right());
    target.x = left;
    target.w = right - left;
}

/// Stretch `target` vertically to also cover `cell`.
fn extend_vertically(target: &mut Rect, cell: &Rect) {
    let top = target.y.min(cell.y);
    let bottom = target.bottom().max(cell.bottom());
    target.y = top;
    target.h = bottom - top;
}

fn coalesce(first: Rect, rest: &[Rect]) -> Vec<Rect> {
    let mut out = vec![first];

    for cell in rest {
        let absorbed = out.iter_mut().any(|entry| {
            if same_row(cell, entry) && cell.x <= entry.right() && cell.right() >= entry.x {
                extend_horizontally(entry, cell);
                true
            } else if same_column(cell, entry)
                && cell.y <= entry.bottom()
                && cell.bottom() >= entry.y
            {
                extend_vertically(entry, cell);
                true
            } else {
                false
            }
        });

        if !absorbed {
            out.push(*cell);
        }
    }

    out
}

fn legacy_merge(first: Rect, cells: &[Rect]) -> Vec<Rect> {
    let mut out = vec![first];

    for cell in cells {
        // The scan sees entries pushed during this same scan.
        let mut j = 0;
        while j < out.len() {
            let entry = out[j];
            if same_row(cell, &entry) {
                extend_horizontally(&mut out[j], cell);
            } else if same_column(cell, &entry) {
                extend_vertically(&mut out[j], cell);
            } else {
                out.push(*cell);
            }
            j += 1;
        }
    }

    out
}
