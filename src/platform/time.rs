//! Frame timing from host timestamps

use crate::consts::MAX_FRAME_DT;

/// Turns animation-callback timestamps (ms) into simulation deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame. The first frame yields zero, and a
    /// long stall (tab in background) is clamped so enemies do not teleport.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(MAX_FRAME_DT)
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
