//! Key repeat for held keys.
//!
//! Platform auto-repeat is ignored; instead the most recently pressed key is
//! tracked here and re-delivered as a press after `delay_ms`, then every
//! `interval_ms`, for as long as it stays down. Mouse buttons never repeat.
//! At most one repeat is delivered per update; after a stall the backlog is
//! dropped instead of being replayed in a burst.

use crate::types::{Key, Modifiers, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS};

/// A key currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldKey {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Tracks the held key and emits repeats.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    held: Option<HeldKey>,
    held_ms: u32,
    interval_accumulator: u32,
    delay_ms: u32,
    interval_ms: u32,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS)
    }

    /// `interval_ms` of 0 is treated as 1ms.
    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            held: None,
            held_ms: 0,
            interval_accumulator: 0,
            delay_ms,
            interval_ms: interval_ms.max(1),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn held(&self) -> Option<HeldKey> {
        self.held
    }

    /// Register a key press.
    ///
    /// Returns false if the key was already held (a platform repeat), in which
    /// case the caller should not act on it.
    pub fn press(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if self.held.map(|h| h.key) == Some(key) {
            return false;
        }
        self.held = Some(HeldKey { key, modifiers });
        self.held_ms = 0;
        self.interval_accumulator = 0;
        true
    }

    pub fn release(&mut self, key: Key) {
        if self.held.map(|h| h.key) == Some(key) {
            self.reset();
        }
    }

    /// Advance time and return the repeat that fell due, if any.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<HeldKey> {
        let held = self.held?;

        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);

        if self.held_ms < self.delay_ms {
            return None;
        }

        if prev < self.delay_ms {
            // First repeat lands exactly at the delay.
            self.interval_accumulator = (self.held_ms - self.delay_ms) % self.interval_ms;
            return Some(held);
        }

        self.interval_accumulator = self.interval_accumulator.saturating_add(elapsed_ms);
        if self.interval_accumulator < self.interval_ms {
            return None;
        }
        self.interval_accumulator %= self.interval_ms;
        Some(held)
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.held_ms = 0;
        self.interval_accumulator = 0;
    }
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UP: Key = Key::ArrowUp;

    #[test]
    fn test_no_repeat_before_delay() {
        let mut kr = KeyRepeat::with_config(100, 25);
        assert!(kr.press(UP, Modifiers::NONE));

        assert!(kr.update(99).is_none());
    }

    #[test]
    fn test_first_repeat_at_delay_then_every_interval() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);

        assert!(kr.update(99).is_none());
        assert!(kr.update(1).is_some());

        assert!(kr.update(24).is_none());
        assert!(kr.update(1).is_some());
    }

    #[test]
    fn test_long_frame_delivers_one_repeat_and_drops_backlog() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);
        assert!(kr.update(100).is_some());

        // Four intervals elapsed in one frame: still only one repeat.
        assert!(kr.update(110).is_some());
        // The remainder (10ms) carries; the skipped repeats do not.
        assert!(kr.update(14).is_none());
        assert!(kr.update(1).is_some());
    }

    #[test]
    fn test_overshooting_delay_delivers_a_single_repeat() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);

        assert!(kr.update(150).is_some());
        assert!(kr.update(24).is_none());
        assert!(kr.update(1).is_some());
    }

    #[test]
    fn test_platform_repeat_of_held_key_is_ignored() {
        let mut kr = KeyRepeat::with_config(100, 25);
        assert!(kr.press(UP, Modifiers::NONE));
        kr.update(50);
        assert!(!kr.press(UP, Modifiers::NONE));

        // Timer was not restarted by the platform repeat.
        assert!(kr.update(50).is_some());
    }

    #[test]
    fn test_new_key_takes_over_and_restarts_delay() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);
        kr.update(90);
        assert!(kr.press(Key::ArrowDown, Modifiers::NONE));

        assert!(kr.update(90).is_none());
        assert_eq!(kr.update(10).map(|h| h.key), Some(Key::ArrowDown));
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);
        assert!(kr.update(200).is_some());

        kr.release(UP);
        assert!(kr.held().is_none());
        assert!(kr.update(200).is_none());
    }

    #[test]
    fn test_release_of_other_key_keeps_repeating() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);
        kr.release(Key::ArrowLeft);
        assert!(kr.update(100).is_some());
    }

    #[test]
    fn test_repeats_carry_modifiers_of_the_press() {
        let mut kr = KeyRepeat::with_config(10, 50);
        kr.press(Key::F(4), Modifiers::ALT);
        assert_eq!(
            kr.update(10),
            Some(HeldKey {
                key: Key::F(4),
                modifiers: Modifiers::ALT
            })
        );
    }

    #[test]
    fn test_zero_interval_does_not_spin() {
        let kr = KeyRepeat::with_config(10, 0);
        assert_eq!(kr.interval_ms(), 1);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut kr = KeyRepeat::with_config(100, 25);
        kr.press(UP, Modifiers::NONE);
        assert!(kr.update(200).is_some(), "expected a repeat before reset");

        kr.reset();
        assert!(kr.update(200).is_none(), "reset should stop repeats");
    }
}
