//! # Tilewalk Core
//!
//! Collision resolution, motion integration and viewport bounds for
//! tile-based worlds.
//!
//! Built on [`tilewalk_geom`] for the geometry and the chunk assembler, this
//! crate owns everything that changes from tick to tick.
//!
//! ## Architecture
//!
//! Each tick runs in two phases:
//!
//! - **Sense** (read-only, parallel): the broad phase assembles nearby
//!   obstacle chunks and [`detect_contacts`] fills a [`CollisionState`]
//! - **Apply** (sequential): [`Body::apply`] resolves the contacts, decays
//!   knockback, integrates position and re-syncs the hitbox
//!
//! The [`Camera`] then follows a focus body inside the world rectangle.
//!
//! ## Usage
//!
//! ```
//! use glam::Vec2;
//! use tilewalk_core::{Body, Camera, ViewportConfig, World};
//! use tilewalk_geom::Rect;
//!
//! let mut world = World::new();
//! world.add_chunk(Rect::new(0.0, 3.0, 10.0, 1.0));
//!
//! let mut player = Body::new(Rect::new(1.0, 1.0, 1.0, 1.0));
//! player.motion.velocity = Vec2::new(0.0, 0.5);
//! let id = world.spawn(player);
//!
//! let mut camera = Camera::new(ViewportConfig::default(), 0).unwrap();
//! for _ in 0..8 {
//!     world.step(1.0);
//!     let focus = world.get(id).unwrap().bounds();
//!     camera.update(&focus, Rect::new(0.0, 0.0, 10.0, 4.0), 1.0);
//! }
//!
//! // Landed on the floor
//! assert_eq!(world.get(id).unwrap().bounds().bottom(), 3.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the geometry crate
pub use tilewalk_geom as geom;

pub mod body;
pub mod collision;
pub mod config;
pub mod error;
pub mod motion;
pub mod timestep;
pub mod viewport;
pub mod world;

#[cfg(test)]
mod tests;

pub use body::{Body, BodyId};
pub use collision::{broad_phase, detect_contacts, swept_bounds, CollisionState, Side};
pub use config::{MotionConfig, StepConfig, ViewportConfig};
pub use error::{ConfigError, Result};
pub use motion::MotionState;
pub use timestep::{FrameClock, TimeStep};
pub use viewport::{Camera, CameraFlags};
pub use world::World;
