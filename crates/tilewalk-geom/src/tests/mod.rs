//! Property tests for the geometry primitives and the chunk assembler.
//!
//! - `properties.rs`: invariants that must hold for arbitrary rectangles and
//!   segments (symmetry, edge exclusivity, degenerate inputs, chunk coverage)

mod properties;
