//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (collection index)
//! - No rendering, audio or platform dependencies

pub mod enemy;
pub mod entity;
pub mod player;
pub mod prize;
pub mod rect;
pub mod state;
pub mod tick;

pub use enemy::Enemy;
pub use entity::{Actor, Entity};
pub use player::{InputAction, Key, Player};
pub use prize::Prize;
pub use rect::{Rect, overlaps};
pub use state::{GameEvent, GameState, GameStatus, Rules, level_population};
pub use tick::{TickInput, handle_input, tick};
