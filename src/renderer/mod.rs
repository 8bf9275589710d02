//! Per-frame draw pass
//!
//! Drawing primitives belong to the host; the game only decides what goes
//! where. Order: board tiles, enemies, player, visible prizes, HUD.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Actor, GameState, GameStatus, Rect};
use crate::tile_origin;

/// Host drawing surface
pub trait Canvas {
    /// Draw the image at `url` with its top-left at `pos`
    fn draw_sprite(&mut self, url: &str, pos: Vec2);
    /// Outline a rectangle (debug overlay)
    fn stroke_rect(&mut self, rect: Rect);
    fn draw_text(&mut self, text: &str, pos: Vec2);
}

/// Render hook available on every actor
pub trait Render {
    fn render(&self, canvas: &mut dyn Canvas, show_bounds: bool);
}

impl<T: Actor + ?Sized> Render for T {
    fn render(&self, canvas: &mut dyn Canvas, show_bounds: bool) {
        if !self.is_drawn() {
            return;
        }
        let entity = self.entity();
        canvas.draw_sprite(entity.sprite, entity.pos);
        if show_bounds {
            canvas.stroke_rect(entity.world_bounds());
        }
    }
}

/// Tile image for a board row
pub fn row_tile(row: i32) -> &'static str {
    match row {
        0 => WATER_TILE,
        r if (ENEMY_ROW_MIN..=ENEMY_ROW_MAX).contains(&r) => STONE_TILE,
        _ => GRASS_TILE,
    }
}

pub fn draw_board(canvas: &mut dyn Canvas) {
    for row in 0..BOARD_ROWS {
        let tile = row_tile(row);
        for col in 0..BOARD_COLS {
            canvas.draw_sprite(tile, tile_origin(col, row, 0.0));
        }
    }
}

/// Board-space position of the HUD text line
const HUD_POS: Vec2 = Vec2::new(0.0, 40.0);
/// Where the end-of-game banner goes
const BANNER_POS: Vec2 = Vec2::new(TILE_WIDTH, TILE_HEIGHT * 3.0);

pub fn hud_line(state: &GameState) -> String {
    let mut line = format!(
        "Score: {}  Lives: {}  Level: {}",
        state.score, state.lives, state.level
    );
    if state.countdown > 0 {
        line.push_str(&format!("  Next level in {}", state.countdown));
    }
    line
}

pub fn draw_hud(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.draw_text(&hud_line(state), HUD_POS);
    match state.status {
        GameStatus::Playing => {}
        GameStatus::Won => canvas.draw_text("You won!", BANNER_POS),
        GameStatus::Lost => canvas.draw_text("Game over", BANNER_POS),
    }
}

/// Draw one complete frame
pub fn render_frame(state: &GameState, canvas: &mut dyn Canvas) {
    draw_board(canvas);

    let show_bounds = state.debug_overlay;
    for enemy in &state.enemies {
        enemy.render(canvas, show_bounds);
    }
    state.player.render(canvas, show_bounds);
    for prize in &state.prizes {
        prize.render(canvas, show_bounds);
    }

    draw_hud(state, canvas);
}
