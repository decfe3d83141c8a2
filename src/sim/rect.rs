//! Axis-aligned rectangle geometry
//!
//! World space is y-down: `y` is the top edge, `y + height` the bottom.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (platforms, springs, the actor hitbox, the goal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved to a new top-left corner
    #[inline]
    pub fn at(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Strict overlap test: rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Saturate `v` into `[lo, hi]`. Callers guarantee `lo <= hi`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}
