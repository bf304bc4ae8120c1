//! Directional contact flags and the sensing half of a tick.
//!
//! A [`CollisionState`] counts, per side, how many obstacles a body ran into
//! this tick. It is filled during the broad phase (by [`detect_contacts`] or
//! by the caller through [`CollisionState::hit`]) and consumed exactly once by
//! the resolver, which takes it by value. Taking it out of the body with
//! `std::mem::take` is what resets it for the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use tilewalk_geom::{assemble_chunk_with, overlaps, Bounded, MergePolicy, Rect};

/// One side of a body's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Negative x
    Left,
    /// Positive x
    Right,
    /// Negative y
    Top,
    /// Positive y
    Bottom,
}

impl Side {
    /// All four sides.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// True if `velocity` drives the body into an obstacle on this side.
    #[must_use]
    pub fn is_driven_into(self, velocity: Vec2) -> bool {
        match self {
            Side::Left => velocity.x < 0.0,
            Side::Right => velocity.x > 0.0,
            Side::Top => velocity.y < 0.0,
            Side::Bottom => velocity.y > 0.0,
        }
    }

    /// The side a displacement of `delta` along x runs into, if any.
    #[must_use]
    pub fn facing_x(delta: f32) -> Option<Side> {
        if delta < 0.0 {
            Some(Side::Left)
        } else if delta > 0.0 {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The side a displacement of `delta` along y runs into, if any.
    #[must_use]
    pub fn facing_y(delta: f32) -> Option<Side> {
        if delta < 0.0 {
            Some(Side::Top)
        } else if delta > 0.0 {
            Some(Side::Bottom)
        } else {
            None
        }
    }
}

/// Per-side contact counters for one body and one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionState {
    /// Contacts on the left side
    pub left: u32,
    /// Contacts on the right side
    pub right: u32,
    /// Contacts on the top side
    pub top: u32,
    /// Contacts on the bottom side
    pub bottom: u32,
}

impl CollisionState {
    /// Record one more contact on `side`.
    pub fn hit(&mut self, side: Side) {
        let counter = self.counter_mut(side);
        *counter = counter.saturating_add(1);
    }

    /// Number of contacts on `side`.
    #[must_use]
    pub fn count(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    /// True if at least one obstacle touches `side`.
    #[must_use]
    pub fn is_touching(&self, side: Side) -> bool {
        self.count(side) > 0
    }

    /// True if no side has a contact.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        Side::ALL.iter().all(|side| !self.is_touching(*side))
    }

    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: CollisionState) {
        for side in Side::ALL {
            let counter = self.counter_mut(side);
            *counter = counter.saturating_add(other.count(side));
        }
    }

    fn counter_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }
}

/// The region a body sweeps this tick: its bounds unioned with where they
/// would be after moving by `velocity * dt`.
#[must_use]
pub fn swept_bounds(bounds: Rect, velocity: Vec2, dt: f32) -> Rect {
    bounds.union(&bounds.translate(velocity * dt))
}

/// Broad phase against static, tile-aligned chunks.
///
/// Keeps the chunks the swept region touches, then lets the chunk assembler
/// reduce them to the composites the swept region actually overlaps.
#[must_use]
pub fn broad_phase(
    bounds: Rect,
    velocity: Vec2,
    dt: f32,
    chunks: &[Rect],
    policy: MergePolicy,
) -> Vec<Rect> {
    let swept = swept_bounds(bounds, velocity, dt);
    let candidates: Vec<Rect> = chunks
        .iter()
        .filter(|chunk| overlaps(&swept, *chunk, true))
        .copied()
        .collect();
    if candidates.is_empty() {
        return candidates;
    }
    assemble_chunk_with(&candidates, &swept, policy)
}

/// Overlap depths below this are treated as unchanged.
const DEPTH_TOLERANCE: f32 = 1e-5;

/// Count the obstacles a body would run into this tick.
///
/// Each axis with non-zero motion is probed separately: the body's effective
/// bounds are shifted along that axis by `velocity * dt`, and every obstacle
/// the move runs into is a contact on the side the motion points to. When
/// neither axis finds anything but the body moves diagonally, the combined
/// move is probed too; an obstacle it reaches is flagged on the axis it
/// penetrates least (both axes on a tie).
///
/// A body resting flush against a wall without moving into it registers
/// nothing. A body already overlapping an obstacle is blocked only by moves
/// that deepen the overlap, so it is free to move out.
#[must_use]
pub fn detect_contacts(
    body: &impl Bounded,
    velocity: Vec2,
    dt: f32,
    obstacles: &[Rect],
) -> CollisionState {
    let bounds = body.bounds(true);
    let step = velocity * dt;
    let facing_x = Side::facing_x(step.x);
    let facing_y = Side::facing_y(step.y);
    let mut contacts = CollisionState::default();

    let probes = [
        (facing_x, Vec2::new(step.x, 0.0)),
        (facing_y, Vec2::new(0.0, step.y)),
    ];
    for (side, shift) in probes {
        let Some(side) = side else { continue };
        let probe = bounds.translate(shift);
        for obstacle in obstacles {
            if runs_into(&bounds, &probe, obstacle) {
                contacts.hit(side);
            }
        }
    }

    if let (Some(side_x), Some(side_y)) = (facing_x, facing_y) {
        if contacts.is_clear() {
            let probe = bounds.translate(step);
            for obstacle in obstacles.iter().filter(|o| runs_into(&bounds, &probe, o)) {
                let depth = penetration(&probe, obstacle);
                if depth.x <= depth.y {
                    contacts.hit(side_x);
                }
                if depth.y <= depth.x {
                    contacts.hit(side_y);
                }
            }
        }
    }

    if !contacts.is_clear() {
        trace!(?contacts, obstacles = obstacles.len(), "contacts detected");
    }
    contacts
}

/// True when moving from `from` to `to` runs into `obstacle`: `to` overlaps
/// it, and either `from` did not or the overlap got deeper on some axis.
fn runs_into(from: &Rect, to: &Rect, obstacle: &Rect) -> bool {
    if !overlaps(to, obstacle, true) {
        return false;
    }
    if !overlaps(from, obstacle, true) {
        return true;
    }
    let before = penetration(from, obstacle);
    let after = penetration(to, obstacle);
    after.x > before.x + DEPTH_TOLERANCE || after.y > before.y + DEPTH_TOLERANCE
}

/// Per-axis overlap extent of two rectangles (negative when apart).
fn penetration(a: &Rect, b: &Rect) -> Vec2 {
    Vec2::new(
        a.right().min(b.right()) - a.x.max(b.x),
        a.bottom().min(b.bottom()) - a.y.max(b.y),
    )
}
