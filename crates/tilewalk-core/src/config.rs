//! Tunables for the tick pipeline, bodies, and the viewport.
//!
//! Every config has sensible defaults and can be loaded from a (possibly
//! partial) JSON document. Loading validates; constructing by hand does not,
//! so call `validate` when building configs in code from untrusted values.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_geom::MergePolicy;

use crate::error::{require_non_negative, require_positive, ConfigError, Result};

/// Design frame rate: a time step of 1.0 is one frame at this rate.
pub const DESIGN_FPS: f32 = 60.0;

/// Upper bound on the time-step multiplier during frame hitches.
pub const MAX_DELTA_TIME: f32 = 2.0;

/// External velocity below this magnitude snaps to zero.
pub const VELOCITY_EPSILON: f32 = 1e-3;

/// Configuration for the per-tick pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Frame rate at which the time step is exactly 1.0
    pub target_fps: f32,
    /// Largest time step a single tick may integrate
    pub max_delta_time: f32,
    /// External velocity snap-to-zero threshold
    pub velocity_epsilon: f32,
    /// How the broad phase merges obstacle cells
    pub merge_policy: MergePolicy,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            target_fps: DESIGN_FPS,
            max_delta_time: MAX_DELTA_TIME,
            velocity_epsilon: VELOCITY_EPSILON,
            merge_policy: MergePolicy::default(),
        }
    }
}

impl StepConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        require_positive("target_fps", self.target_fps)?;
        require_positive("max_delta_time", self.max_delta_time)?;
        require_positive("velocity_epsilon", self.velocity_epsilon)?;
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Per-body motion tunables, as a spawner would read them from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Magnitude of controller-driven velocity
    pub speed: f32,
    /// Decay base of external velocity per unit time, in `[0, 1]`
    pub friction: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            friction: 0.0,
        }
    }
}

impl MotionConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        require_non_negative("speed", self.speed)
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the viewport bound solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Pixels per tile at ratio 1
    pub tile_size: f32,
    /// Zoom ratio the camera rests at
    pub base_ratio: f32,
    /// Divisor of the per-tick zoom easing step
    pub zoom_easing: f32,
    /// Divisor of the per-tick follow easing step
    pub follow_easing: f32,
    /// Extra tiles the world rect must exceed the visible extent by
    pub edge_margin: f32,
    /// Maximum per-axis jitter while shaking
    pub shake_amplitude: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            tile_size: 16.0,
            base_ratio: 2.0,
            zoom_easing: 22.0,
            follow_easing: 15.0,
            edge_margin: 0.0,
            shake_amplitude: 0.25,
        }
    }
}

impl ViewportConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        require_positive("screen_width", self.screen_width)?;
        require_positive("screen_height", self.screen_height)?;
        require_positive("tile_size", self.tile_size)?;
        require_positive("base_ratio", self.base_ratio)?;
        require_positive("zoom_easing", self.zoom_easing)?;
        require_positive("follow_easing", self.follow_easing)?;
        require_non_negative("edge_margin", self.edge_margin)?;
        require_non_negative("shake_amplitude", self.shake_amplitude)
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of tiles visible on each axis at a given zoom ratio.
    #[must_use]
    pub fn visible_extent(&self, ratio: f32) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height) / self.tile_size / ratio
    }
}
