//! Cross-module tests for the tick pipeline and the camera.
//!
//! - `determinism.rs`: identical inputs give identical worlds, and the
//!   parallel world step agrees with stepping a lone body
//! - `integration.rs`: end-to-end scenarios in a walled room
//! - `properties.rs`: property tests over motion and contacts
//! - `helpers.rs`: room fixtures and spawn helpers

mod determinism;
mod helpers;

pub use helpers::*;
