//! Rectangle predicates and center-based measurements.
//!
//! `contains` and `overlaps` honor override hitboxes when asked to. The
//! center helpers measure the raw boxes, since they describe where a sprite
//! is rather than what it collides with.

use crate::rect::Bounded;
use crate::segment::{angle, Segment};

/// Inclusive point-in-rectangle test.
///
/// A point lying exactly on an edge is contained.
#[must_use]
pub fn contains(point: glam::Vec2, rect: &impl Bounded, use_override: bool) -> bool {
    let r = rect.bounds(use_override);
    point.x >= r.x && point.x <= r.right() && point.y >= r.y && point.y <= r.bottom()
}

/// Strict AABB overlap test.
///
/// Rectangles that only share an edge or a corner do NOT overlap. The
/// resolver depends on this: an entity resting flush against a wall must not
/// keep registering a collision while it is not moving into it.
#[must_use]
pub fn overlaps(a: &impl Bounded, b: &impl Bounded, use_override: bool) -> bool {
    let a = a.bounds(use_override);
    let b = b.bounds(use_override);
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Angle in radians from the center of `a` to the center of `b`.
#[must_use]
pub fn angle_between_centers(a: &impl Bounded, b: &impl Bounded) -> f32 {
    let from = a.bounds(false).center();
    let to = b.bounds(false).center();
    angle(&Segment::from_points(from, to))
}

/// Euclidean distance between the centers of `a` and `b`.
///
/// A bare point (`Vec2`) is its own center.
#[must_use]
pub fn distance_between_centers(a: &impl Bounded, b: &impl Bounded) -> f32 {
    a.bounds(false).center().distance(b.bounds(false).center())
}
