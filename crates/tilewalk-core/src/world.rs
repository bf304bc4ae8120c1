//! World: the per-tick pipeline over many bodies.
//!
//! The `World` owns a set of bodies and the static chunk geometry they move
//! through, and advances them together in two phases:
//!
//! 1. **SENSE**: every body runs its broad and narrow phase against a frozen
//!    snapshot of the world. This phase is read-only, so it runs in parallel.
//! 2. **APPLY**: contacts are applied to each body in [`BodyId`] order:
//!    resolve, decay, integrate, re-sync hitbox.
//!
//! # Determinism
//!
//! Bodies live in a `BTreeMap`, and each body's sensing reads only the
//! snapshot, so the result of a step does not depend on thread scheduling.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use tilewalk_core::body::Body;
//! use tilewalk_core::world::World;
//! use tilewalk_geom::Rect;
//!
//! let mut world = World::new();
//! world.add_chunk(Rect::new(5.0, 0.0, 1.0, 4.0));
//!
//! let mut body = Body::new(Rect::new(0.0, 1.0, 1.0, 1.0));
//! body.motion.velocity = Vec2::new(1.0, 0.0);
//! let id = world.spawn(body);
//!
//! for _ in 0..10 {
//!     world.step(1.0);
//! }
//!
//! assert_eq!(world.tick(), 10);
//! assert_eq!(world.get(id).unwrap().position(), Vec2::new(4.0, 1.0));
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::trace;

use tilewalk_geom::{overlaps, Rect};

use crate::body::{Body, BodyId};
use crate::collision::{swept_bounds, CollisionState};
use crate::config::StepConfig;
use crate::error::Result;

/// Bodies plus the static geometry they collide with.
#[derive(Debug, Clone, Default)]
pub struct World {
    config: StepConfig,
    bodies: BTreeMap<BodyId, Body>,
    /// Static, tile-aligned obstacle chunks
    chunks: Vec<Rect>,
    next_id: u64,
    tick: u64,
}

impl World {
    /// An empty world with the default step config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty world with a validated step config.
    pub fn with_config(config: StepConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The step config.
    #[must_use]
    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Number of completed steps.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Add a body and return its id. Ids are never reused.
    pub fn spawn(&mut self, body: Body) -> BodyId {
        let id = BodyId::new(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Remove a body.
    pub fn despawn(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    /// Look up a body.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Look up a body for mutation (e.g. to steer it before a step).
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// All bodies in id order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when there are no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Static obstacle chunks.
    #[must_use]
    pub fn chunks(&self) -> &[Rect] {
        &self.chunks
    }

    /// Add one static obstacle chunk.
    pub fn add_chunk(&mut self, chunk: Rect) {
        self.chunks.push(chunk);
    }

    /// Replace all static obstacle chunks (e.g. on room change).
    pub fn set_chunks(&mut self, chunks: Vec<Rect>) {
        self.chunks = chunks;
    }

    /// Advance every body by one tick of `dt`, clamped to the configured
    /// maximum.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.min(self.config.max_delta_time);

        // SENSE: read-only over a snapshot
        let snapshot: Vec<(BodyId, &Body)> = self.bodies().collect();
        let sensed: Vec<(BodyId, CollisionState)> = snapshot
            .par_iter()
            .map(|(id, body)| (*id, self.sense(*id, body, dt)))
            .collect();

        // APPLY: sequential, id order
        for (id, contacts) in sensed {
            if let Some(body) = self.bodies.get_mut(&id) {
                body.apply(contacts, dt, self.config.velocity_epsilon);
            }
        }

        self.tick += 1;
        trace!(tick = self.tick, bodies = self.bodies.len(), dt, "world step");
    }

    /// Contacts for one body: static chunks through the chunk assembler,
    /// other solid bodies directly.
    ///
    /// Another body is an obstacle over the whole region it sweeps this tick,
    /// since it moves during the same APPLY phase. Two bodies closing on each
    /// other therefore stop before their paths cross, possibly with a gap.
    fn sense(&self, id: BodyId, body: &Body, dt: f32) -> CollisionState {
        let swept = swept_bounds(body.bounds(), body.motion.combined(), dt);
        let solids: Vec<Rect> = self
            .bodies
            .iter()
            .filter(|(other_id, other)| **other_id != id && other.solid)
            .map(|(_, other)| swept_bounds(other.bounds(), other.motion.combined(), dt))
            .filter(|region| overlaps(region, &swept, true))
            .collect();
        body.sense(dt, &self.chunks, &solids, self.config.merge_policy)
    }
}
