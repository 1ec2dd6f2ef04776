//! Binding table: physical triggers to logical actions.
//!
//! Triggers are written as strings in the config file:
//!
//! | Form | Example |
//! |------|---------|
//! | Key name | `Z`, `F1`, `Escape`, `Up` |
//! | Modified key | `Alt+F4`, `Ctrl+Shift+S` |
//! | Mouse button | `Mouse:Left`, `Mouse:Middle` |
//! | Wheel step | `Wheel:Up`, `Wheel:Down` |

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::types::{Action, Key, Modifiers, MouseButton, PhysicalInput, WheelDirection};

/// Errors from parsing binding overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingParseError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("invalid trigger `{0}`")]
    InvalidTrigger(String),
}

/// A physical input plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trigger {
    pub input: PhysicalInput,
    pub modifiers: Modifiers,
}

impl Trigger {
    pub const fn new(input: PhysicalInput) -> Self {
        Self {
            input,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn key(key: Key) -> Self {
        Self::new(PhysicalInput::Key(key))
    }

    pub const fn mouse(button: MouseButton) -> Self {
        Self::new(PhysicalInput::Mouse(button))
    }

    pub const fn wheel(dir: WheelDirection) -> Self {
        Self::new(PhysicalInput::Wheel(dir))
    }

    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Parse a trigger string such as `Alt+F4` or `Mouse:Middle`.
    pub fn parse(s: &str) -> Result<Self, BindingParseError> {
        let invalid = || BindingParseError::InvalidTrigger(s.to_string());

        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let last = parts.pop().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_lowercase().as_str() {
                "alt" => modifiers.alt = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                _ => return Err(invalid()),
            }
        }

        let input = match last.split_once(':') {
            Some((kind, name)) => match kind.trim().to_lowercase().as_str() {
                "mouse" => PhysicalInput::Mouse(MouseButton::from_str(name).ok_or_else(invalid)?),
                "wheel" => {
                    PhysicalInput::Wheel(WheelDirection::from_str(name).ok_or_else(invalid)?)
                }
                _ => return Err(invalid()),
            },
            None => PhysicalInput::Key(Key::from_str(last).ok_or_else(invalid)?),
        };

        Ok(Self { input, modifiers })
    }

    /// True when `input` pressed with `held` modifiers fires this trigger.
    pub fn matches(&self, input: PhysicalInput, held: Modifiers) -> bool {
        self.input == input && self.modifiers.satisfied_by(held)
    }

    fn specificity(&self) -> u8 {
        self.modifiers.alt as u8 + self.modifiers.ctrl as u8 + self.modifiers.shift as u8
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        self.input.fmt(f)
    }
}

/// Maps logical actions to one or more triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    bindings: BTreeMap<Action, Vec<Trigger>>,
}

impl BindingTable {
    /// A table with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Replace the triggers of `action`.
    pub fn bind(&mut self, action: Action, triggers: Vec<Trigger>) {
        self.bindings.insert(action, triggers);
    }

    pub fn triggers(&self, action: Action) -> &[Trigger] {
        self.bindings
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Apply overrides keyed by action name; each listed action has its
    /// triggers replaced, other actions keep their current bindings.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, BindingParseError> {
        for (name, triggers) in overrides {
            let action = Action::from_str(name)
                .ok_or_else(|| BindingParseError::UnknownAction(name.clone()))?;
            let parsed = triggers
                .iter()
                .map(|t| Trigger::parse(t))
                .collect::<Result<Vec<_>, _>>()?;
            self.bind(action, parsed);
        }
        Ok(self)
    }

    /// Find the action fired by `input` with `held` modifiers.
    ///
    /// When several triggers match, the one requiring the most modifiers wins,
    /// so `Alt+F4` can coexist with a plain `F4` binding.
    pub fn resolve(&self, input: PhysicalInput, held: Modifiers) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(action, triggers)| triggers.iter().map(move |t| (*action, t)))
            .filter(|(_, t)| t.matches(input, held))
            .max_by_key(|(_, t)| t.specificity())
            .map(|(action, _)| action)
    }
}

impl Default for BindingTable {
    /// Stock layout: wheel or arrows to
    /// browse, left click or `Z` to pick, left drag or arrows to place, right
    /// click or `X` to go back, `F1` or middle click to export.
    fn default() -> Self {
        let mut table = Self::empty();
        table.bind(Action::Up, vec![Trigger::key(Key::ArrowUp)]);
        table.bind(Action::Down, vec![Trigger::key(Key::ArrowDown)]);
        table.bind(Action::Left, vec![Trigger::key(Key::ArrowLeft)]);
        table.bind(Action::Right, vec![Trigger::key(Key::ArrowRight)]);
        table.bind(Action::Previous, vec![Trigger::wheel(WheelDirection::Down)]);
        table.bind(Action::Next, vec![Trigger::wheel(WheelDirection::Up)]);
        table.bind(
            Action::Confirm,
            vec![Trigger::key(Key::Letter('Z')), Trigger::mouse(MouseButton::Left)],
        );
        table.bind(
            Action::Back,
            vec![Trigger::key(Key::Letter('X')), Trigger::mouse(MouseButton::Right)],
        );
        table.bind(
            Action::Export,
            vec![Trigger::key(Key::F(1)), Trigger::mouse(MouseButton::Middle)],
        );
        table.bind(
            Action::Quit,
            vec![
                Trigger::key(Key::Escape),
                Trigger::key(Key::F(4)).with_modifiers(Modifiers::ALT),
            ],
        );
        table
    }
}
