//! Randomized invariants.

use glam::Vec2;
use proptest::prelude::*;

use crate::chunk::{assemble_chunk, assemble_chunk_with, decompose, MergePolicy};
use crate::primitives::{contains, overlaps};
use crate::rect::Rect;
use crate::segment::{segments_intersect, Segment};

// =============================================================================
// Strategies
// =============================================================================

fn any_rect() -> impl Strategy<Value = Rect> {
    (-50.0f32..50.0, -50.0f32..50.0, 0.0f32..20.0, 0.0f32..20.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// Chunks on the tile grid, as a tilemap would produce them.
fn tile_chunk() -> impl Strategy<Value = Rect> {
    (-6i32..6, -6i32..6, 1i32..4, 1i32..4)
        .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
}

fn any_point() -> impl Strategy<Value = Vec2> {
    (-50.0f32..50.0, -50.0f32..50.0).prop_map(|(x, y)| Vec2::new(x, y))
}

// =============================================================================
// Primitives
// =============================================================================

proptest! {
    #[test]
    fn overlap_is_symmetric(a in any_rect(), b in any_rect()) {
        prop_assert_eq!(overlaps(&a, &b, true), overlaps(&b, &a, true));
    }

    #[test]
    fn horizontally_adjacent_rects_never_overlap(
        a in any_rect(),
        dy in -10.0f32..10.0,
        w in 0.0f32..10.0,
        h in 0.0f32..10.0,
    ) {
        let b = Rect::new(a.right(), a.y + dy, w, h);
        prop_assert!(!overlaps(&a, &b, true));
        prop_assert!(!overlaps(&b, &a, true));
    }

    #[test]
    fn vertically_adjacent_rects_never_overlap(
        a in any_rect(),
        dx in -10.0f32..10.0,
        w in 0.0f32..10.0,
        h in 0.0f32..10.0,
    ) {
        let b = Rect::new(a.x + dx, a.bottom(), w, h);
        prop_assert!(!overlaps(&a, &b, true));
    }

    #[test]
    fn rect_contains_its_corners(r in any_rect()) {
        prop_assert!(contains(r.min(), &r, true));
        prop_assert!(contains(r.max(), &r, true));
        prop_assert!(contains(r.center(), &r, true));
    }

    #[test]
    fn degenerate_segment_never_intersects(p in any_point(), a in any_point(), b in any_point()) {
        let dot = Segment::from_points(p, p);
        let other = Segment::from_points(a, b);
        prop_assert_eq!(segments_intersect(&dot, &other), None);
        prop_assert_eq!(segments_intersect(&other, &dot), None);
    }

    #[test]
    fn segment_never_intersects_itself(a in any_point(), b in any_point()) {
        let s = Segment::from_points(a, b);
        prop_assert_eq!(segments_intersect(&s, &s), None);
    }

    #[test]
    fn horizontal_segments_never_intersect(
        x1 in -50.0f32..50.0,
        x2 in -50.0f32..50.0,
        y1 in -50.0f32..50.0,
        y2 in -50.0f32..50.0,
    ) {
        let a = Segment::new(x1, y1, x2, y1);
        let b = Segment::new(x1, y2, x2, y2);
        prop_assert_eq!(segments_intersect(&a, &b), None);
    }
}

// =============================================================================
// Chunk assembly
// =============================================================================

proptest! {
    #[test]
    fn single_chunk_is_returned_unchanged(chunk in any_rect(), obj in any_rect()) {
        prop_assert_eq!(assemble_chunk(&[chunk], &obj), vec![chunk]);
    }

    #[test]
    fn coalesced_composites_all_touch_the_body(
        chunks in prop::collection::vec(tile_chunk(), 2..6),
        obj in any_rect(),
    ) {
        for composite in assemble_chunk(&chunks, &obj) {
            prop_assert!(overlaps(&composite, &obj, true));
        }
    }

    #[test]
    fn every_overlapped_cell_is_covered(
        chunks in prop::collection::vec(tile_chunk(), 2..6),
        obj in any_rect(),
        legacy in any::<bool>(),
    ) {
        let policy = if legacy { MergePolicy::Legacy } else { MergePolicy::Coalesce };
        let merged = assemble_chunk_with(&chunks, &obj, policy);
        for cell in decompose(&chunks).filter(|cell| overlaps(&obj, cell, true)) {
            prop_assert!(
                merged.iter().any(|m| contains(cell.center(), m, true)),
                "cell {:?} not covered by {:?}",
                cell,
                merged
            );
        }
    }
}
