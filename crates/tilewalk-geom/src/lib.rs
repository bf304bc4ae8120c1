//! # Tilewalk Geom
//!
//! Axis-aligned geometry for tile worlds: rectangles with optional hitbox
//! overrides, segment intersection, and the broad-phase chunk assembler that
//! coalesces colliding tile cells into a handful of composite obstacles.
//!
//! All coordinates are in tile units, not pixels. Every function in this crate
//! is pure: identical inputs give identical outputs regardless of call order,
//! so the API is safe to call from many threads at once.
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec2;
//! use tilewalk_geom::{assemble_chunk, overlaps, segments_intersect, Rect, Segment};
//!
//! // Edge-touching boxes do not overlap
//! let a = Rect::new(0.0, 0.0, 1.0, 1.0);
//! let b = Rect::new(1.0, 0.0, 1.0, 1.0);
//! assert!(!overlaps(&a, &b, true));
//!
//! // Crossing diagonals meet in the middle
//! let hit = segments_intersect(
//!     &Segment::new(0.0, 0.0, 2.0, 2.0),
//!     &Segment::new(0.0, 2.0, 2.0, 0.0),
//! );
//! assert_eq!(hit, Some(Vec2::new(1.0, 1.0)));
//!
//! // Two rows of wall, touched by a body straddling both rows
//! let wall = [Rect::new(0.0, 0.0, 3.0, 1.0), Rect::new(0.0, 1.0, 3.0, 1.0)];
//! let body = Rect::new(1.2, 0.8, 0.5, 0.4);
//! let merged = assemble_chunk(&wall, &body);
//! assert_eq!(merged, vec![Rect::new(1.0, 0.0, 1.0, 2.0)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chunk;
pub mod primitives;
pub mod rect;
pub mod segment;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use chunk::{assemble_chunk, assemble_chunk_with, decompose, MergePolicy};
pub use primitives::{
    angle_between_centers, contains, distance_between_centers, overlaps,
};
pub use rect::{Bounded, Collider, Rect};
pub use segment::{
    angle, cos_sin, rect_sides, segment_intersects_rect, segments_intersect, Segment,
};
