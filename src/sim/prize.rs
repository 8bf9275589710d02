//! Gems scattered over the stone rows

use super::entity::{Actor, Entity};
use super::rect::Rect;
use crate::consts::*;
use crate::tile_origin;

#[derive(Debug, Clone, PartialEq)]
pub struct Prize {
    pub entity: Entity,
    /// Points awarded on pickup
    pub value: u32,
    /// Cleared once collected; never set again within a level
    pub is_visible: bool,
}

impl Prize {
    pub fn bounds() -> Rect {
        Rect::new(0.0, PRIZE_BOUND_TOP, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Prize number `index` of the level. Later prizes are worth more.
    pub fn new(index: usize, row: i32, col: i32) -> Self {
        let entity = Entity::new(
            format!("prize{index}"),
            tile_origin(col, row, PRIZE_DRAW_Y_OFFSET),
            PRIZE_SPRITES[index % PRIZE_SPRITES.len()],
        )
        .with_bounds(Self::bounds());

        Self {
            entity,
            value: (index as u32 + 1) * 100,
            is_visible: true,
        }
    }

    /// Hide the prize and hand back its value. Zero if already collected.
    pub fn collect(&mut self) -> u32 {
        if !self.is_visible {
            return 0;
        }
        self.is_visible = false;
        self.value
    }
}

impl Actor for Prize {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn is_drawn(&self) -> bool {
        self.is_visible
    }
}

/// True when nothing is left to pick up (including levels with no prizes)
pub fn all_collected(prizes: &[Prize]) -> bool {
    prizes.iter().all(|p| !p.is_visible)
}

pub fn visible_count(prizes: &[Prize]) -> usize {
    prizes.iter().filter(|p| p.is_visible).count()
}
