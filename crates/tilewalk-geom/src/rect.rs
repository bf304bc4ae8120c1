//! Rectangles and hitbox overrides.
//!
//! A [`Rect`] is a plain axis-aligned box. A [`Collider`] is what sprites and
//! entities carry: either just their raw box, or the raw box plus an override
//! hitbox that collision math should use instead. The [`Bounded`] trait lets
//! the primitives accept any of these (and bare points) uniformly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in tile units.
///
/// `(x, y)` is the top-left corner; `y` grows downward. Width and height are
/// expected to be non-negative; nothing here checks it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a zero-size rectangle at a point.
    #[must_use]
    pub const fn point(p: Vec2) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    /// Create a rectangle from a corner and a size vector.
    #[must_use]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Top-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Width and height as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Right edge (`x + w`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// The same rectangle moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Self {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Self::from_min_size(min, max - min)
    }

    /// Grow the rectangle symmetrically about its center so that it is at
    /// least `min_size` on each axis. Axes already large enough are untouched.
    #[must_use]
    pub fn expand_to(&self, min_size: Vec2) -> Self {
        let mut out = *self;
        if out.w < min_size.x {
            out.x -= (min_size.x - out.w) / 2.0;
            out.w = min_size.x;
        }
        if out.h < min_size.y {
            out.y -= (min_size.y - out.h) / 2.0;
            out.h = min_size.y;
        }
        out
    }

    /// Apply a hitbox offset: each field of `offset` is added to the
    /// matching field of `self`.
    #[must_use]
    pub fn offset_by(&self, offset: &Rect) -> Self {
        Self::new(
            self.x + offset.x,
            self.y + offset.y,
            self.w + offset.w,
            self.h + offset.h,
        )
    }
}

/// Bounds of a sprite or entity, with an optional override hitbox.
///
/// When the override is present, collision math uses it instead of the raw
/// box unless the caller explicitly asks for the raw box. Whoever owns the
/// collider is responsible for keeping the override in sync with the raw box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Only the raw box
    Raw(Rect),
    /// Raw box plus a hitbox that overrides it for collisions
    Override {
        /// Sprite-sized box
        raw: Rect,
        /// Box used for collisions
        hitbox: Rect,
    },
}

impl Collider {
    /// Collider with an override hitbox.
    #[must_use]
    pub const fn with_hitbox(raw: Rect, hitbox: Rect) -> Self {
        Self::Override { raw, hitbox }
    }

    /// The raw (sprite-sized) box.
    #[must_use]
    pub fn raw(&self) -> Rect {
        match self {
            Self::Raw(raw) | Self::Override { raw, .. } => *raw,
        }
    }

    /// Mutable access to the raw box.
    pub fn raw_mut(&mut self) -> &mut Rect {
        match self {
            Self::Raw(raw) | Self::Override { raw, .. } => raw,
        }
    }

    /// The override hitbox, if any.
    #[must_use]
    pub fn hitbox(&self) -> Option<Rect> {
        match self {
            Self::Raw(_) => None,
            Self::Override { hitbox, .. } => Some(*hitbox),
        }
    }

    /// Replace (or remove) the override hitbox.
    pub fn set_hitbox(&mut self, hitbox: Option<Rect>) {
        let raw = self.raw();
        *self = match hitbox {
            Some(hitbox) => Self::Override { raw, hitbox },
            None => Self::Raw(raw),
        };
    }

    /// The box collision math should use: the hitbox when present, else raw.
    #[must_use]
    pub fn effective(&self) -> Rect {
        self.bounds(true)
    }
}

impl From<Rect> for Collider {
    fn from(rect: Rect) -> Self {
        Self::Raw(rect)
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::Raw(Rect::default())
    }
}

/// Anything with axis-aligned bounds.
///
/// `use_override` selects the override hitbox when one exists; passing
/// `false` forces the raw box. Types without an override ignore the flag.
pub trait Bounded {
    /// Resolve to a concrete rectangle.
    fn bounds(&self, use_override: bool) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self, _use_override: bool) -> Rect {
        *self
    }
}

impl Bounded for Collider {
    fn bounds(&self, use_override: bool) -> Rect {
        match self {
            Self::Override { hitbox, .. } if use_override => *hitbox,
            _ => self.raw(),
        }
    }
}

/// A bare point behaves as a zero-size rectangle.
impl Bounded for Vec2 {
    fn bounds(&self, _use_override: bool) -> Rect {
        Rect::point(*self)
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounds(&self, use_override: bool) -> Rect {
        (**self).bounds(use_override)
    }
}
