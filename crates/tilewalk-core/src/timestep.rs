//! Frame-time normalization.
//!
//! The pipeline never reads a clock. The caller measures how long the last
//! frame took and converts it here into the `dt` multiplier every per-tick
//! operation takes: 1.0 for a frame at the design rate, 2.0 for a frame twice
//! as long, clamped so a hitch cannot integrate an unbounded step.

use std::time::Duration;

use tracing::warn;

use crate::config::{StepConfig, DESIGN_FPS, MAX_DELTA_TIME};
use crate::error::Result;

/// Converts frame durations into clamped time-step multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    /// Duration of one frame at the design rate
    frame_time: Duration,
    /// Largest multiplier ever returned
    max_delta_time: f32,
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::with_rate(DESIGN_FPS, MAX_DELTA_TIME)
    }
}

impl TimeStep {
    /// Build from a validated step config.
    pub fn from_config(config: &StepConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_rate(config.target_fps, config.max_delta_time))
    }

    /// `target_fps` must be positive and finite.
    fn with_rate(target_fps: f32, max_delta_time: f32) -> Self {
        Self {
            frame_time: Duration::from_secs_f32(1.0 / target_fps),
            max_delta_time,
        }
    }

    /// Duration of one frame at the design rate.
    #[must_use]
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// The multiplier for a frame that took `elapsed`.
    #[must_use]
    pub fn delta_for(&self, elapsed: Duration) -> f32 {
        let raw = elapsed.as_secs_f32() / self.frame_time.as_secs_f32();
        if raw > self.max_delta_time {
            warn!(
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                delta = raw,
                clamped = self.max_delta_time,
                "frame hitch, clamping time step"
            );
            self.max_delta_time
        } else {
            raw
        }
    }
}

/// Tracks the timestamp of the previous frame.
///
/// Timestamps are whatever monotonic reading the caller has, expressed as a
/// duration since any fixed origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    step: TimeStep,
    last: Option<Duration>,
}

impl FrameClock {
    /// A clock that has not seen a frame yet.
    #[must_use]
    pub fn new(step: TimeStep) -> Self {
        Self { step, last: None }
    }

    /// Record a frame at `now` and return its multiplier. The first frame,
    /// having no predecessor, counts as exactly one design frame. A timestamp
    /// earlier than the previous one yields zero.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let dt = match self.last {
            Some(last) => self.step.delta_for(now.saturating_sub(last)),
            None => 1.0,
        };
        self.last = Some(now);
        dt
    }
}
