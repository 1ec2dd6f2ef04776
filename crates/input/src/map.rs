//! Mapping physical input events to logical actions.

use crate::bindings::BindingTable;
use crate::repeat::KeyRepeat;
use crate::types::{Action, Key, Modifiers, PhysicalInput};

/// A press after binding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The press fires a bound action
    Action(Action),
    /// The press is not bound to anything (still counts as "any key")
    Unbound,
    /// A platform auto-repeat of a key that is already held; drop it
    Ignored,
}

/// Combines the binding table with key repeat.
///
/// Repeat time is counted from the tick that follows the press: the time
/// that elapsed before the key went down within that tick is not counted.
#[derive(Debug, Clone)]
pub struct InputMapper {
    bindings: BindingTable,
    repeat: KeyRepeat,
    fresh_press: bool,
}

impl InputMapper {
    pub fn new(bindings: BindingTable, repeat: KeyRepeat) -> Self {
        Self {
            bindings,
            repeat,
            fresh_press: false,
        }
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Handle a press of a key, mouse button or wheel step.
    pub fn press(&mut self, input: PhysicalInput, modifiers: Modifiers) -> Resolved {
        if let PhysicalInput::Key(key) = input {
            if !self.repeat.press(key, modifiers) {
                return Resolved::Ignored;
            }
            self.fresh_press = true;
        }
        self.resolve(input, modifiers)
    }

    pub fn release(&mut self, key: Key) {
        self.repeat.release(key);
    }

    /// Advance the repeat clock and resolve the repeated press, if one is due.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Resolved> {
        let elapsed_ms = if std::mem::take(&mut self.fresh_press) {
            0
        } else {
            elapsed_ms
        };
        self.repeat
            .update(elapsed_ms)
            .map(|held| self.resolve(PhysicalInput::Key(held.key), held.modifiers))
    }

    /// Forget held keys (e.g. when the window loses focus).
    pub fn reset(&mut self) {
        self.repeat.reset();
        self.fresh_press = false;
    }

    fn resolve(&self, input: PhysicalInput, modifiers: Modifiers) -> Resolved {
        match self.bindings.resolve(input, modifiers) {
            Some(action) => Resolved::Action(action),
            None => Resolved::Unbound,
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(BindingTable::default(), KeyRepeat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MouseButton, WheelDirection};

    fn mapper() -> InputMapper {
        InputMapper::new(BindingTable::default(), KeyRepeat::with_config(100, 50))
    }

    #[test]
    fn test_bound_and_unbound_presses() {
        let mut m = mapper();
        assert_eq!(
            m.press(PhysicalInput::Key(Key::ArrowDown), Modifiers::NONE),
            Resolved::Action(Action::Down)
        );
        assert_eq!(
            m.press(PhysicalInput::Key(Key::Letter('Q')), Modifiers::NONE),
            Resolved::Unbound
        );
        assert_eq!(
            m.press(PhysicalInput::Mouse(MouseButton::Extra1), Modifiers::NONE),
            Resolved::Unbound
        );
    }

    #[test]
    fn test_platform_repeat_is_ignored() {
        let mut m = mapper();
        let up = PhysicalInput::Key(Key::ArrowUp);
        assert_eq!(m.press(up, Modifiers::NONE), Resolved::Action(Action::Up));
        assert_eq!(m.press(up, Modifiers::NONE), Resolved::Ignored);
        m.release(Key::ArrowUp);
        assert_eq!(m.press(up, Modifiers::NONE), Resolved::Action(Action::Up));
    }

    #[test]
    fn test_mouse_and_wheel_presses_never_count_as_repeats() {
        let mut m = mapper();
        let wheel = PhysicalInput::Wheel(WheelDirection::Up);
        assert_eq!(m.press(wheel, Modifiers::NONE), Resolved::Action(Action::Next));
        assert_eq!(m.press(wheel, Modifiers::NONE), Resolved::Action(Action::Next));
        assert!(m.tick(1_000).is_none());
    }

    #[test]
    fn test_held_key_repeats_through_bindings() {
        let mut m = mapper();
        m.press(PhysicalInput::Key(Key::ArrowLeft), Modifiers::NONE);
        // The tick that sees the press starts the clock.
        assert!(m.tick(40).is_none());
        assert!(m.tick(99).is_none());
        assert_eq!(m.tick(1), Some(Resolved::Action(Action::Left)));
        // A stalled frame yields one repeat, not a burst.
        assert_eq!(m.tick(100), Some(Resolved::Action(Action::Left)));
        assert!(m.tick(49).is_none());
    }

    #[test]
    fn test_reset_stops_repeats() {
        let mut m = mapper();
        m.press(PhysicalInput::Key(Key::ArrowLeft), Modifiers::NONE);
        m.reset();
        assert!(m.tick(500).is_none());
    }
}
