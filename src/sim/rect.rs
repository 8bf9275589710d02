//! Axis-aligned rectangles for bounding boxes
//!
//! Every sprite sits inside a transparent tile larger than the visible
//! character. A `Rect` is either an offset box local to that tile (stored on
//! the entity) or, once translated by the tile origin, a box in canvas space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (`w`, `h` never negative)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    /// Negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Box left by trimming `left/top/right/bottom` pixels off a `w`×`h` tile
    pub fn inset(w: f32, h: f32, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, w - left - right, h - top - bottom)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Same extents, shifted by `origin`
    #[inline]
    pub fn translate(&self, origin: Vec2) -> Self {
        Self {
            x: self.x + origin.x,
            y: self.y + origin.y,
            ..*self
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Strict overlap test: boxes that only share an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
