//! Enemies: bugs crawling left to right along the stone rows

use rand::Rng;

use super::entity::{Actor, Entity};
use super::rect::Rect;
use crate::consts::*;
use crate::tile_origin;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Board row the enemy crawls along
    pub row: i32,
}

impl Enemy {
    /// Collision box within the enemy sprite tile
    pub fn bounds() -> Rect {
        Rect::inset(
            TILE_WIDTH,
            SPRITE_HEIGHT,
            ENEMY_BOUND_LEFT,
            ENEMY_BOUND_TOP,
            ENEMY_BOUND_RIGHT,
            ENEMY_BOUND_BOTTOM,
        )
    }

    /// Draw-origin y for an enemy on `row`
    #[inline]
    pub fn row_y(row: i32) -> f32 {
        tile_origin(0, row, ENEMY_DRAW_Y_OFFSET).y
    }

    pub fn new(name: impl Into<String>, col: i32, row: i32, speed: f32) -> Self {
        let entity = Entity::new(name, tile_origin(col, row, ENEMY_DRAW_Y_OFFSET), ENEMY_SPRITE)
            .with_bounds(Self::bounds());
        Self { entity, speed, row }
    }

    /// Random column, row and speed
    pub fn spawn<R: Rng>(index: usize, rng: &mut R, speed_range: (f32, f32)) -> Self {
        let col = rng.random_range(0..BOARD_COLS);
        let row = rng.random_range(ENEMY_ROW_MIN..=ENEMY_ROW_MAX);
        let speed = random_speed(rng, speed_range);
        Self::new(format!("enemy{index}"), col, row, speed)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.entity.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.entity.pos.y
    }

    /// Past the last column, or behind the first
    pub fn is_offscreen_x(x: f32) -> bool {
        x < 0.0 || x > TILE_WIDTH * (BOARD_COLS - 1) as f32
    }

    /// True when touching `other` from behind. Only the trailing enemy halts,
    /// so two touching enemies never both stop.
    pub fn is_bumping_behind(&self, other: &Enemy) -> bool {
        self.entity.has_collided_with(&other.entity)
            && self.entity.world_bounds().left() < other.entity.world_bounds().left()
    }

    /// One frame of motion. A bumping enemy holds position this frame; an
    /// enemy leaving the board restarts at the left edge on a fresh row and speed.
    pub fn advance<R: Rng>(&mut self, dt: f32, bumping: bool, rng: &mut R, speed_range: (f32, f32)) {
        if !bumping {
            let pos = self.entity.pos;
            self.entity.set_location(pos.x + self.speed * dt, pos.y);
        }

        if Self::is_offscreen_x(self.x()) {
            self.row = rng.random_range(ENEMY_ROW_MIN..=ENEMY_ROW_MAX);
            self.entity.set_location(0.0, Self::row_y(self.row));
            self.speed = random_speed(rng, speed_range);
            log::trace!("{} wrapped to row {} at {:.0} px/s", self.entity.name, self.row, self.speed);
        }
    }
}

impl Actor for Enemy {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

fn random_speed<R: Rng>(rng: &mut R, (low, high): (f32, f32)) -> f32 {
    if high > low {
        rng.random_range(low..=high)
    } else {
        low
    }
}

/// Whether enemy `index` is touching any other enemy from behind
pub fn is_bumping_any_other(enemies: &[Enemy], index: usize) -> bool {
    let me = &enemies[index];
    enemies
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && me.is_bumping_behind(other))
}

/// Advance every enemy in order. Later enemies see earlier ones' new positions.
pub fn update_enemies<R: Rng>(enemies: &mut [Enemy], dt: f32, rng: &mut R, speed_range: (f32, f32)) {
    for i in 0..enemies.len() {
        let bumping = is_bumping_any_other(enemies, i);
        enemies[i].advance(dt, bumping, rng, speed_range);
    }
}
