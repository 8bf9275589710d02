//! Gem Hopper - A tile-based arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state)
//! - `renderer`: Per-frame draw pass against a host canvas
//! - `platform`: Key-code mapping and frame timing
//! - `resources`: Load-once asset cache with a readiness future
//! - `audio`: Sound cues driven by simulation events
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board cell width in pixels
    pub const TILE_WIDTH: f32 = 101.0;
    /// Board row height in pixels (sprites overlap, so this is less than the image height)
    pub const TILE_HEIGHT: f32 = 83.0;
    /// Full sprite image height
    pub const SPRITE_HEIGHT: f32 = 171.0;

    pub const BOARD_COLS: i32 = 5;
    pub const BOARD_ROWS: i32 = 6;

    /// Rows enemies (and prizes) may occupy
    pub const ENEMY_ROW_MIN: i32 = 1;
    pub const ENEMY_ROW_MAX: i32 = 3;

    /// Vertical draw offsets so sprites sit visually inside their row
    pub const ENEMY_DRAW_Y_OFFSET: f32 = 18.0;
    pub const PRIZE_DRAW_Y_OFFSET: f32 = 10.0;
    pub const PLAYER_DRAW_Y_OFFSET: f32 = 10.0;

    /// Enemy bounding box inside its sprite tile
    pub const ENEMY_BOUND_LEFT: f32 = 1.0;
    pub const ENEMY_BOUND_RIGHT: f32 = 1.0;
    pub const ENEMY_BOUND_TOP: f32 = 77.0;
    pub const ENEMY_BOUND_BOTTOM: f32 = 29.0;

    /// Player bounding box inside its sprite tile
    pub const PLAYER_BOUND_LEFT: f32 = 17.0;
    pub const PLAYER_BOUND_RIGHT: f32 = 16.0;
    pub const PLAYER_BOUND_TOP: f32 = 65.0;
    pub const PLAYER_BOUND_BOTTOM: f32 = 31.0;

    /// Prize bounding box is a whole cell pushed down into the row
    pub const PRIZE_BOUND_TOP: f32 = 60.0;

    /// Player start tile
    pub const PLAYER_START_COL: i32 = 2;
    pub const PLAYER_START_ROW: i32 = 5;

    /// Default enemy speed range (pixels/s)
    pub const ENEMY_SPEED_LOW: f32 = 150.0;
    pub const ENEMY_SPEED_HIGH: f32 = 200.0;

    pub const STARTING_LIVES: u32 = 5;
    /// Reaching this level wins the game
    pub const FINAL_LEVEL: u32 = 4;
    /// Coarse timer period (seconds)
    pub const TIMER_INTERVAL: f32 = 1.0;
    /// Timer ticks between reaching the water and the next level
    pub const LEVEL_COUNTDOWN: u32 = 5;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    pub const CHARACTER_SPRITES: [&str; 4] = [
        "images/char-boy.png",
        "images/char-cat-girl.png",
        "images/char-horn-girl.png",
        "images/char-pink-girl.png",
    ];

    pub const PRIZE_SPRITES: [&str; 3] = [
        "images/Gem-Blue.png",
        "images/Gem-Green.png",
        "images/Gem-Orange.png",
    ];

    pub const ENEMY_SPRITE: &str = "images/enemy-bug.png";

    pub const WATER_TILE: &str = "images/water-block.png";
    pub const STONE_TILE: &str = "images/stone-block.png";
    pub const GRASS_TILE: &str = "images/grass-block.png";
}

/// Canvas position of a tile's draw origin, lifted by `y_offset`
#[inline]
pub fn tile_origin(col: i32, row: i32, y_offset: f32) -> Vec2 {
    Vec2::new(
        col as f32 * consts::TILE_WIDTH,
        row as f32 * consts::TILE_HEIGHT - y_offset,
    )
}

/// Every image the game draws
pub fn image_manifest() -> Vec<&'static str> {
    use consts::*;
    let mut urls = vec![ENEMY_SPRITE, WATER_TILE, STONE_TILE, GRASS_TILE];
    urls.extend(CHARACTER_SPRITES);
    urls.extend(PRIZE_SPRITES);
    urls
}
