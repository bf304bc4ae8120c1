//! Viewport bound solver.
//!
//! A [`Camera`] eases toward a focus rectangle each tick while keeping its
//! visible window inside a world rectangle.
//!
//! # Coordinates
//!
//! The camera's `offset` is the translation applied to world coordinates when
//! drawing, so the visible window's top-left corner in world space is
//! `-offset`. The window's size in tiles (its extent) follows from the screen
//! size, the tile size, and the current zoom ratio.
//!
//! # Per-tick order
//!
//! 1. Grow a too-small world rectangle to the visible extent
//! 2. Ease the zoom ratio toward its target (if [`CameraFlags::ZOOM`])
//! 3. Ease the offset toward centering the focus
//! 4. Clamp the window into the world (if [`CameraFlags::BOUNDARY_LOCK`])
//! 5. Apply shake jitter and decay the shake timer

use bitflags::bitflags;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tilewalk_geom::{overlaps, Bounded, Rect};

use crate::config::ViewportConfig;
use crate::error::Result;

bitflags! {
    /// Camera behavior toggles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CameraFlags: u8 {
        /// Keep the visible window inside the world rectangle
        const BOUNDARY_LOCK = 1 << 0;
        /// Ease the zoom ratio toward its target
        const ZOOM = 1 << 1;
    }
}

impl Default for CameraFlags {
    fn default() -> Self {
        Self::BOUNDARY_LOCK | Self::ZOOM
    }
}

/// A camera tracking a focus rectangle inside a world rectangle.
#[derive(Debug, Clone)]
pub struct Camera {
    config: ViewportConfig,
    offset: Vec2,
    ratio: f32,
    target_ratio: f32,
    shake: f32,
    flags: CameraFlags,
    /// Deterministic RNG for shake jitter
    rng: ChaCha8Rng,
}

impl Camera {
    /// Create a camera at the origin, resting at the base ratio.
    ///
    /// `seed` drives shake jitter, so two cameras with the same seed and the
    /// same inputs stay identical.
    pub fn new(config: ViewportConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ratio: config.base_ratio,
            target_ratio: config.base_ratio,
            config,
            offset: Vec2::ZERO,
            shake: 0.0,
            flags: CameraFlags::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current zoom ratio.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Ratio the zoom eases toward.
    #[must_use]
    pub fn target_ratio(&self) -> f32 {
        self.target_ratio
    }

    /// Remaining shake time.
    #[must_use]
    pub fn shake(&self) -> f32 {
        self.shake
    }

    /// Active toggles.
    #[must_use]
    pub fn flags(&self) -> CameraFlags {
        self.flags
    }

    /// Replace the toggles.
    pub fn set_flags(&mut self, flags: CameraFlags) {
        self.flags = flags;
    }

    /// Change the ratio the zoom eases toward.
    pub fn set_target_ratio(&mut self, ratio: f32) {
        self.target_ratio = ratio;
    }

    /// Shake for at least `duration` more time units.
    pub fn start_shake(&mut self, duration: f32) {
        if duration > self.shake {
            debug!(duration, "camera shake");
            self.shake = duration;
        }
    }

    /// Tiles visible on each axis at the current ratio.
    #[must_use]
    pub fn visible_extent(&self) -> Vec2 {
        self.config.visible_extent(self.ratio)
    }

    /// The visible window in world coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_min_size(-self.offset, self.visible_extent())
    }

    /// True if any part of `rect` is inside the visible window.
    #[must_use]
    pub fn is_visible(&self, rect: &impl Bounded) -> bool {
        overlaps(&self.visible_rect(), rect, false)
    }

    /// Offset that centers `focus` in the window.
    #[must_use]
    pub fn centering_offset(&self, focus: &impl Bounded) -> Vec2 {
        -(focus.bounds(false).center() - self.visible_extent() / 2.0)
    }

    /// Jump straight to centering `focus`, skipping the easing.
    pub fn snap_to(&mut self, focus: &impl Bounded) {
        self.offset = self.centering_offset(focus);
    }

    /// Advance the camera one tick. Returns the world rectangle actually
    /// used for clamping, grown to the visible extent when the map is
    /// smaller than the screen.
    pub fn update(&mut self, focus: &impl Bounded, world: Rect, dt: f32) -> Rect {
        let min_extent = self.visible_extent() + Vec2::splat(self.config.edge_margin);
        let world_bounds = world.expand_to(min_extent);
        if world_bounds != world {
            debug!(?world, ?world_bounds, "world smaller than viewport, expanded");
        }

        if self.flags.contains(CameraFlags::ZOOM) {
            self.ratio += (self.target_ratio - self.ratio) / self.config.zoom_easing * dt;
        }

        let desired = self.centering_offset(focus);
        self.offset += (desired - self.offset) / self.config.follow_easing * dt;

        if self.flags.contains(CameraFlags::BOUNDARY_LOCK) {
            self.offset = self.clamped_offset(&world_bounds);
        }

        if self.shake > 0.0 {
            let amplitude = self.config.shake_amplitude;
            self.offset.x += self.rng.gen_range(-amplitude..=amplitude);
            self.offset.y += self.rng.gen_range(-amplitude..=amplitude);
            self.shake = (self.shake - dt).max(0.0);
        }

        world_bounds
    }

    /// The current offset corrected so the window stays inside `world`.
    /// Sides are checked left, top, right, bottom; a later correction on the
    /// same axis wins.
    fn clamped_offset(&self, world: &Rect) -> Vec2 {
        let extent = self.visible_extent();
        let window = -self.offset;
        let mut corrected = self.offset;

        if window.x < world.x {
            corrected.x = -world.x;
        }
        if window.y < world.y {
            corrected.y = -world.y;
        }
        if window.x > world.right() - extent.x {
            corrected.x = -(world.right() - extent.x);
        }
        if window.y > world.bottom() - extent.y {
            corrected.y = -(world.bottom() - extent.y);
        }

        corrected
    }
}
