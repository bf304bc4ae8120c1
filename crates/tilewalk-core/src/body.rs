//! Bodies: the per-entity physics state the tick pipeline mutates.
//!
//! A [`Body`] owns its collider, its motion, and its contact counters. Nothing
//! else holds references into it; the resolver reads and writes its fields
//! only for the duration of a call.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use tilewalk_geom::{Collider, MergePolicy, Rect};

use crate::collision::{broad_phase, detect_contacts, CollisionState, Side};
use crate::config::{MotionConfig, VELOCITY_EPSILON};
use crate::error::Result;
use crate::motion::MotionState;

/// Unique identifier for a body within a [`World`](crate::world::World).
///
/// Ordered by numeric value; the world iterates bodies in this order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(u64);

impl BodyId {
    /// Creates a new `BodyId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.0)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One moving entity's physics state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    collider: Collider,
    /// Added field-by-field to the raw box to produce the hitbox
    hitbox_offset: Option<Rect>,
    /// Velocities and their tunables
    pub motion: MotionState,
    contacts: CollisionState,
    /// Whether other bodies collide with this one
    pub solid: bool,
}

impl Body {
    /// A solid body at rest occupying `raw`, with no hitbox override.
    #[must_use]
    pub fn new(raw: Rect) -> Self {
        Self {
            collider: Collider::Raw(raw),
            hitbox_offset: None,
            motion: MotionState::default(),
            contacts: CollisionState::default(),
            solid: true,
        }
    }

    /// A body whose motion tunables come from a validated config.
    pub fn from_config(raw: Rect, config: &MotionConfig) -> Result<Self> {
        config.validate()?;
        let mut body = Self::new(raw);
        body.motion = MotionState::from_config(config);
        Ok(body)
    }

    /// Give the body a hitbox derived from its raw box plus `offset`.
    #[must_use]
    pub fn with_hitbox_offset(mut self, offset: Rect) -> Self {
        self.hitbox_offset = Some(offset);
        self.update_hitbox();
        self
    }

    /// Set the body's motion state.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionState) -> Self {
        self.motion = motion;
        self
    }

    /// Mark whether other bodies collide with this one.
    #[must_use]
    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    /// The body's collider.
    #[must_use]
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Bounds used for collisions (the hitbox when there is one).
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.collider.effective()
    }

    /// Top-left corner of the raw box.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.collider.raw().min()
    }

    /// Move the raw box to `position` and re-sync the hitbox.
    pub fn set_position(&mut self, position: Vec2) {
        let raw = self.collider.raw_mut();
        raw.x = position.x;
        raw.y = position.y;
        self.update_hitbox();
    }

    /// Change the hitbox offset (animations may resize the hitbox).
    pub fn set_hitbox_offset(&mut self, offset: Option<Rect>) {
        self.hitbox_offset = offset;
        self.update_hitbox();
    }

    /// Recompute the hitbox from the raw box and the offset.
    pub fn update_hitbox(&mut self) {
        let hitbox = self
            .hitbox_offset
            .map(|offset| self.collider.raw().offset_by(&offset));
        self.collider.set_hitbox(hitbox);
    }

    /// Contacts recorded so far this tick.
    #[must_use]
    pub fn contacts(&self) -> &CollisionState {
        &self.contacts
    }

    /// Record a contact on `side` during the broad phase.
    pub fn hit(&mut self, side: Side) {
        self.contacts.hit(side);
    }

    /// Record a batch of contacts during the broad phase.
    pub fn record(&mut self, contacts: CollisionState) {
        self.contacts.merge(contacts);
    }

    /// Consume this tick's contacts, zeroing blocked velocity. The counters
    /// are left at zero.
    pub fn resolve_collisions(&mut self) {
        let contacts = std::mem::take(&mut self.contacts);
        self.motion.resolve(contacts);
    }

    /// Decay external velocity.
    pub fn update_velocities(&mut self, dt: f32) {
        self.motion.update_velocities(dt);
    }

    /// Resolve pending contacts, then move the raw box by the combined
    /// velocity. The hitbox is not re-synced; call
    /// [`Body::update_hitbox`] afterwards.
    pub fn update_position(&mut self, dt: f32) {
        self.resolve_collisions();
        let displacement = self.motion.displacement(dt);
        let raw = self.collider.raw_mut();
        *raw = raw.translate(displacement);
    }

    /// Read-only broad and narrow phase against static chunks and any extra
    /// solid obstacles (already assembled, e.g. other bodies).
    #[must_use]
    pub fn sense(
        &self,
        dt: f32,
        chunks: &[Rect],
        solids: &[Rect],
        policy: MergePolicy,
    ) -> CollisionState {
        let bounds = self.bounds();
        let velocity = self.motion.combined();
        let mut obstacles = broad_phase(bounds, velocity, dt, chunks, policy);
        obstacles.extend_from_slice(solids);
        detect_contacts(&bounds, velocity, dt, &obstacles)
    }

    /// Write half of a tick: record contacts, resolve, decay, integrate, and
    /// re-sync the hitbox.
    pub fn apply(&mut self, contacts: CollisionState, dt: f32, epsilon: f32) {
        self.record(contacts);
        self.resolve_collisions();
        self.motion.decay_external(dt, epsilon);
        self.update_position(dt);
        self.update_hitbox();
    }

    /// A full tick for a lone body against static chunks.
    pub fn step(&mut self, dt: f32, chunks: &[Rect]) {
        let contacts = self.sense(dt, chunks, &[], MergePolicy::default());
        self.apply(contacts, dt, VELOCITY_EPSILON);
    }
}
