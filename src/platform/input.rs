//! Raw key codes to game keys

use crate::sim::Key;

/// Map a DOM-style `keyCode` from a key-up event
pub fn key_from_code(code: u32) -> Key {
    match code {
        37 => Key::Left,
        38 => Key::Up,
        39 => Key::Right,
        40 => Key::Down,
        65 => Key::A,
        66 => Key::B,
        67 => Key::C,
        other => Key::Other(other),
    }
}
