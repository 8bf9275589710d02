//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (raw key codes)
//! - Time/ticks (frame deltas)

pub mod input;
pub mod time;

pub use input::key_from_code;
pub use time::FrameClock;
