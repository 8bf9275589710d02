//! The player avatar: hops one tile per key press

use super::entity::{Actor, Entity};
use super::prize::{self, Prize};
use super::rect::Rect;
use crate::consts::*;
use crate::tile_origin;

/// Discrete key symbols delivered once per key-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
    /// Toggle background music
    A,
    /// Toggle the bounding-box overlay (also halts enemies)
    B,
    /// Cycle the player character
    C,
    /// Anything else, carrying the raw code for logging
    Other(u32),
}

impl Key {
    pub fn is_movement(&self) -> bool {
        matches!(self, Key::Left | Key::Up | Key::Right | Key::Down)
    }
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Player stepped one tile
    Moved,
    /// Movement key at the board edge
    Blocked,
    /// Movement key while the session is frozen
    Frozen,
    ToggleAudio,
    ToggleDebug,
    SwitchCharacter,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub entity: Entity,
}

impl Player {
    pub fn bounds() -> Rect {
        Rect::inset(
            TILE_WIDTH,
            SPRITE_HEIGHT,
            PLAYER_BOUND_LEFT,
            PLAYER_BOUND_TOP,
            PLAYER_BOUND_RIGHT,
            PLAYER_BOUND_BOTTOM,
        )
    }

    /// Largest x the player can stand on
    pub const MAX_X: f32 = TILE_WIDTH * (BOARD_COLS - 1) as f32;
    /// Largest y the player can stand on (the bottom grass row)
    pub const MAX_Y: f32 = TILE_HEIGHT * (BOARD_ROWS - 1) as f32 - PLAYER_DRAW_Y_OFFSET;

    /// New player on the start tile wearing `character`
    pub fn new(character: usize) -> Self {
        let entity = Entity::new(
            "player",
            tile_origin(PLAYER_START_COL, PLAYER_START_ROW, PLAYER_DRAW_Y_OFFSET),
            character_sprite(character),
        )
        .with_bounds(Self::bounds());
        Self { entity }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.entity.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.entity.pos.y
    }

    /// Standing on the water row
    pub fn at_goal(&self) -> bool {
        self.y() <= 0.0
    }

    /// Per-frame check: on the water row with every prize collected.
    /// The session turns this into a level-complete freeze.
    pub fn update(&self, prizes: &[Prize], frozen: bool) -> bool {
        !frozen && self.at_goal() && prize::all_collected(prizes)
    }

    /// Apply a key press. Movement is grid-stepped and clamped to the board;
    /// everything else is handed back to the session.
    pub fn handle_input(&mut self, key: Key, frozen: bool) -> InputAction {
        if frozen && key.is_movement() {
            log::debug!("key {key:?} while frozen");
            return InputAction::Frozen;
        }

        let (x, y) = (self.x(), self.y());
        let target = match key {
            Key::Left if x > 0.0 => Some((x - TILE_WIDTH, y)),
            Key::Up if y > 0.0 => Some((x, y - TILE_HEIGHT)),
            Key::Right if x < Self::MAX_X => Some((x + TILE_WIDTH, y)),
            Key::Down if y < Self::MAX_Y => Some((x, y + TILE_HEIGHT)),
            Key::Left | Key::Up | Key::Right | Key::Down => None,
            Key::A => return InputAction::ToggleAudio,
            Key::B => return InputAction::ToggleDebug,
            Key::C => return InputAction::SwitchCharacter,
            Key::Other(code) => {
                log::warn!("Key pressed: {code}");
                return InputAction::Ignored;
            }
        };

        match target {
            Some((nx, ny)) => {
                self.entity.set_location(nx, ny);
                InputAction::Moved
            }
            None => InputAction::Blocked,
        }
    }

    pub fn set_character(&mut self, character: usize) {
        self.entity.set_sprite(character_sprite(character));
    }
}

impl Actor for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Sprite for a character index (wraps)
pub fn character_sprite(character: usize) -> &'static str {
    CHARACTER_SPRITES[character % CHARACTER_SPRITES.len()]
}

/// Next character index, back to 0 after the last
pub fn next_character(character: usize) -> usize {
    (character + 1) % CHARACTER_SPRITES.len()
}
