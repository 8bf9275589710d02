//! Shared data for every on-screen actor
//!
//! Enemies, prizes and the player all embed an [`Entity`]: a draw origin in
//! canvas space, a sprite, and a bounding box offset from that origin. The
//! variant-specific behaviour lives on the embedding types; [`Actor`] is the
//! common view the renderer and collision code work against.

use glam::Vec2;

use super::rect::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Debug label (`enemy0`, `prize1`, `player`)
    pub name: String,
    /// Top-left draw origin of the sprite tile
    pub pos: Vec2,
    /// Collision box relative to `pos`
    pub bounds: Rect,
    /// Image URL, resolved through the resource cache at draw time
    pub sprite: &'static str,
}

impl Entity {
    pub fn new(name: impl Into<String>, pos: Vec2, sprite: &'static str) -> Self {
        Self {
            name: name.into(),
            pos,
            bounds: Rect::ZERO,
            sprite,
        }
    }

    /// Builder-style bounds assignment
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Overwrite the draw origin. No clamping.
    pub fn set_location(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn set_bounds(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.bounds = Rect::new(x, y, w, h);
    }

    pub fn set_sprite(&mut self, sprite: &'static str) {
        log::debug!("{} setting sprite to {}", self.name, sprite);
        self.sprite = sprite;
    }

    /// Bounding box in canvas space
    #[inline]
    pub fn world_bounds(&self) -> Rect {
        self.bounds.translate(self.pos)
    }

    pub fn has_collided_with(&self, other: &Entity) -> bool {
        self.world_bounds().overlaps(&other.world_bounds())
    }
}

/// Common view over every entity variant
pub trait Actor {
    fn entity(&self) -> &Entity;

    /// Whether the renderer should draw this actor this frame
    fn is_drawn(&self) -> bool {
        true
    }

    fn has_collided_with(&self, other: &dyn Actor) -> bool {
        self.entity().has_collided_with(other.entity())
    }
}
