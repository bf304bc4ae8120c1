//! Directed segments: intersection, rectangle sides, and angles.
//!
//! Segments serve two purposes: "logical" probes such as a gaze or aim
//! direction, and the four sides of a rectangle when testing a probe against
//! a box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rect::{Bounded, Rect};

/// A directed 2D segment from `start` to `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint
    pub start: Vec2,
    /// Second endpoint
    pub end: Vec2,
}

impl Segment {
    /// Create a segment from raw endpoint coordinates.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    /// Create a segment from two points.
    #[must_use]
    pub const fn from_points(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    /// True when both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Intersection point of two segments, if they cross.
///
/// Uses the parametric form `p = s1.start + ua * (s1.end - s1.start)`.
/// Returns `None` when:
/// - either segment has zero length,
/// - the segments are parallel or coincident (zero denominator), even when
///   they overlap geometrically,
/// - either parameter falls outside `[0, 1]`.
#[must_use]
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> Option<Vec2> {
    if s1.is_degenerate() || s2.is_degenerate() {
        return None;
    }

    let d1 = s1.delta();
    let d2 = s2.delta();
    let denominator = d2.y * d1.x - d2.x * d1.y;
    if denominator == 0.0 {
        return None;
    }

    let offset = s1.start - s2.start;
    let ua = (d2.x * offset.y - d2.y * offset.x) / denominator;
    let ub = (d1.x * offset.y - d1.y * offset.x) / denominator;

    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }

    Some(s1.start + d1 * ua)
}

/// The four sides of a rectangle's effective bounds, in the order top,
/// right, bottom, left. Sides run clockwise, so each one starts where the
/// previous one ended.
#[must_use]
pub fn rect_sides(rect: &impl Bounded) -> [Segment; 4] {
    let Rect { x, y, w, h } = rect.bounds(true);
    [
        Segment::new(x, y, x + w, y),
        Segment::new(x + w, y, x + w, y + h),
        Segment::new(x + w, y + h, x, y + h),
        Segment::new(x, y + h, x, y),
    ]
}

/// True if `segment` crosses any side of the rectangle.
///
/// A segment lying entirely inside the rectangle touches no side and
/// therefore does not count.
#[must_use]
pub fn segment_intersects_rect(segment: &Segment, rect: &impl Bounded) -> bool {
    rect_sides(rect)
        .iter()
        .any(|side| segments_intersect(side, segment).is_some())
}

/// Direction of a segment in radians, `atan2(dy, dx)`.
#[must_use]
pub fn angle(segment: &Segment) -> f32 {
    let d = segment.delta();
    d.y.atan2(d.x)
}

/// Cosine and sine of the segment's direction.
#[must_use]
pub fn cos_sin(segment: &Segment) -> (f32, f32) {
    let (sin, cos) = angle(segment).sin_cos();
    (cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Collider;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn crossing_diagonals_meet_in_middle() {
        let a = Segment::new(0.0, 0.0, 2.0, 2.0);
        let b = Segment::new(0.0, 2.0, 2.0, 0.0);
        assert_eq!(segments_intersect(&a, &b), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn degenerate_segment_never_intersects() {
        let point = Segment::new(1.0, 1.0, 1.0, 1.0);
        let through = Segment::new(0.0, 0.0, 2.0, 2.0);
        assert_eq!(segments_intersect(&point, &through), None);
        assert_eq!(segments_intersect(&through, &point), None);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = Segment::new(0.0, 0.0, 4.0, 0.0);
        let b = Segment::new(0.0, 1.0, 4.0, 1.0);
        assert_eq!(segments_intersect(&a, &b), None);
    }

    #[test]
    fn coincident_segments_do_not_intersect() {
        let a = Segment::new(0.0, 0.0, 4.0, 0.0);
        let b = Segment::new(1.0, 0.0, 3.0, 0.0);
        assert_eq!(segments_intersect(&a, &a), None);
        assert_eq!(segments_intersect(&a, &b), None);
    }

    #[test]
    fn segments_that_would_cross_if_extended() {
        let a = Segment::new(0.0, 0.0, 1.0, 0.0);
        let b = Segment::new(2.0, -1.0, 2.0, 1.0);
        assert_eq!(segments_intersect(&a, &b), None);
    }

    #[test]
    fn touching_at_endpoint_counts() {
        let a = Segment::new(0.0, 0.0, 1.0, 0.0);
        let b = Segment::new(1.0, 0.0, 1.0, 1.0);
        assert_eq!(segments_intersect(&a, &b), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn sides_are_clockwise_from_top() {
        let sides = rect_sides(&Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(sides[0], Segment::new(1.0, 2.0, 4.0, 2.0));
        assert_eq!(sides[1], Segment::new(4.0, 2.0, 4.0, 6.0));
        assert_eq!(sides[2], Segment::new(4.0, 6.0, 1.0, 6.0));
        assert_eq!(sides[3], Segment::new(1.0, 6.0, 1.0, 2.0));
        for i in 0..4 {
            assert_eq!(sides[i].end, sides[(i + 1) % 4].start);
        }
    }

    #[test]
    fn sides_use_hitbox() {
        let collider = Collider::with_hitbox(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(2.0, 2.0, 1.0, 1.0),
        );
        assert_eq!(rect_sides(&collider)[0], Segment::new(2.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn probe_through_rect() {
        let rect = Rect::new(2.0, 2.0, 2.0, 2.0);
        assert!(segment_intersects_rect(&Segment::new(0.0, 3.0, 5.0, 3.0), &rect));
        assert!(segment_intersects_rect(&Segment::new(3.0, 3.0, 3.0, 10.0), &rect));
        assert!(!segment_intersects_rect(&Segment::new(0.0, 0.0, 5.0, 0.0), &rect));
        // Entirely inside: no side crossed
        assert!(!segment_intersects_rect(&Segment::new(2.5, 2.5, 3.5, 3.5), &rect));
    }

    #[test]
    fn angles() {
        assert_eq!(angle(&Segment::new(0.0, 0.0, 1.0, 0.0)), 0.0);
        assert!((angle(&Segment::new(0.0, 0.0, 0.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle(&Segment::new(0.0, 0.0, 1.0, 1.0)) - FRAC_PI_4).abs() < 1e-6);
        assert!((angle(&Segment::new(0.0, 0.0, -1.0, 0.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn cos_sin_matches_direction() {
        let (cos, sin) = cos_sin(&Segment::new(1.0, 1.0, 1.0, -3.0));
        assert!(cos.abs() < 1e-6);
        assert!((sin + 1.0).abs() < 1e-6);
    }
}
