//! Fixed-rate frame pacing.
//!
//! The window toolkit repaints on demand; the app asks for the next repaint
//! after [`FrameClock::until_next`] and feeds the measured elapsed time to
//! key repeat.

use std::time::Duration;

use crate::types::{frame_ms, DEFAULT_FRAME_RATE};

#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_ms: u64,
    last_tick_ms: Option<u64>,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_ms: frame_ms(frame_rate) as u64,
            last_tick_ms: None,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Record a frame at `now_ms` and return the time since the previous one.
    ///
    /// The first frame reports 0. Time going backwards also reports 0.
    pub fn tick(&mut self, now_ms: u64) -> u32 {
        let elapsed = match self.last_tick_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_tick_ms = Some(now_ms);
        elapsed.min(u32::MAX as u64) as u32
    }

    /// How long to wait from `now_ms` until the next frame is due.
    pub fn until_next(&self, now_ms: u64) -> Duration {
        let Some(last) = self.last_tick_ms else {
            return Duration::ZERO;
        };
        let due = last.saturating_add(self.frame_ms);
        Duration::from_millis(due.saturating_sub(now_ms))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}
