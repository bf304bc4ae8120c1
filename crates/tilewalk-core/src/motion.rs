//! Velocity bookkeeping and collision resolution for one body.
//!
//! A body moves by the sum of two velocities:
//! - `velocity`: intentional, set by whatever controls the body
//! - `external`: imparted from outside (knockback), decays with friction
//!
//! # Tick order
//!
//! 1. [`MotionState::resolve`] zeroes the axes that would push the body further
//!    into an obstacle it touches
//! 2. [`MotionState::update_velocities`] decays external velocity
//! 3. [`MotionState::displacement`] is added to the body's position
//!
//! `dt` is a frame-rate multiplier (1.0 at the design frame rate), always
//! passed explicitly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionState, Side};
use crate::config::{MotionConfig, VELOCITY_EPSILON};

/// Motion state owned by a single body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Controller-driven velocity (tiles per frame)
    pub velocity: Vec2,
    /// Impulse-driven velocity (tiles per frame)
    pub external: Vec2,
    /// Decay base of external velocity per unit of `dt`
    pub friction: f32,
    /// Magnitude used when steering
    pub speed: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::from_config(&MotionConfig::default())
    }
}

impl MotionState {
    /// A body at rest.
    #[must_use]
    pub fn new(speed: f32, friction: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            external: Vec2::ZERO,
            friction,
            speed,
        }
    }

    /// A body at rest with tunables read from config.
    #[must_use]
    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.speed, config.friction)
    }

    /// Total velocity actually moving the body.
    #[must_use]
    pub fn combined(&self) -> Vec2 {
        self.velocity + self.external
    }

    /// Zero every axis whose combined velocity drives the body into a side
    /// that has a contact. Both the intentional and the external component of
    /// that axis are cleared; the other axis is untouched.
    ///
    /// Takes the contacts by value: once resolved they are spent.
    pub fn resolve(&mut self, contacts: CollisionState) {
        let combined = self.combined();
        let blocked = |side: Side| contacts.is_touching(side) && side.is_driven_into(combined);

        if blocked(Side::Left) || blocked(Side::Right) {
            self.velocity.x = 0.0;
            self.external.x = 0.0;
        }
        if blocked(Side::Top) || blocked(Side::Bottom) {
            self.velocity.y = 0.0;
            self.external.y = 0.0;
        }
    }

    /// Decay external velocity by `friction^dt`, snapping components below
    /// [`VELOCITY_EPSILON`] to exactly zero.
    pub fn update_velocities(&mut self, dt: f32) {
        self.decay_external(dt, VELOCITY_EPSILON);
    }

    /// Same as [`MotionState::update_velocities`] with an explicit threshold.
    pub fn decay_external(&mut self, dt: f32, epsilon: f32) {
        let factor = self.friction.powf(dt);
        decay_component(&mut self.external.x, factor, epsilon);
        decay_component(&mut self.external.y, factor, epsilon);
    }

    /// How far the body moves this tick.
    #[must_use]
    pub fn displacement(&self, dt: f32) -> Vec2 {
        self.combined() * dt
    }

    /// Knock the body back: external velocity becomes `impulse`.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.external = impulse;
    }

    /// Set intentional velocity from an input direction. Diagonal input is
    /// normalized so it is not faster than straight input.
    pub fn steer(&mut self, direction: Vec2) {
        self.velocity = direction.normalize_or_zero() * self.speed;
    }

    /// Drop all velocity.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.external = Vec2::ZERO;
    }
}

fn decay_component(component: &mut f32, factor: f32, epsilon: f32) {
    if *component != 0.0 {
        *component *= factor;
        if component.abs() < epsilon {
            *component = 0.0;
        }
    }
}
