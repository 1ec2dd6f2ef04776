//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, canvas rendering, input binding).
//!
//! # Screen
//!
//! The canvas is a fixed 640x480 pixel surface. Sprite positions are the
//! top-left anchor of the sprite in canvas pixels.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAME_RATE` | 20 | Frames per second of the interaction loop |
//! | `DEFAULT_REPEAT_DELAY_MS` | 500 | Time a key must be held before it repeats |
//! | `DEFAULT_REPEAT_INTERVAL_MS` | 100 | Interval between repeated presses |
//!
//! # Input vocabulary
//!
//! Platform events are translated into [`PhysicalInput`] values (a key, a mouse
//! button, or a wheel step). The binding table maps them to logical
//! [`Action`]s, which the session interprets according to its mode.
//!
//! # Examples
//!
//! ```
//! use image_placer_types::{Action, Key, MouseButton, Position};
//!
//! let key = Key::from_str("f1").unwrap();
//! assert_eq!(key, Key::F(1));
//! assert_eq!(key.to_string(), "F1");
//!
//! assert_eq!(MouseButton::from_str("middle"), Some(MouseButton::Middle));
//! assert_eq!(Action::from_str("export"), Some(Action::Export));
//!
//! let pos = Position::new(12, 34);
//! assert_eq!(pos.to_string(), "[12, 34]");
//! ```

use std::fmt;

/// Canvas width in pixels
pub const SCREEN_WIDTH: u32 = 640;

/// Canvas height in pixels
pub const SCREEN_HEIGHT: u32 = 480;

/// Interaction loop rate (frames per second)
pub const DEFAULT_FRAME_RATE: u32 = 20;

/// Delay before a held key starts repeating
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 500;

/// Interval between repeated presses of a held key
pub const DEFAULT_REPEAT_INTERVAL_MS: u32 = 100;

/// Distance between the status panel and the top/right canvas edges
pub const PANEL_MARGIN: u32 = 5;

/// Extra width/height added around the panel text block
pub const PANEL_PADDING: u32 = 10;

/// Pixels moved by one nudge in place mode
pub const NUDGE_STEP: i32 = 1;

/// Frame budget in milliseconds for a given frame rate.
pub const fn frame_ms(frame_rate: u32) -> u32 {
    if frame_rate == 0 {
        1000
    } else {
        1000 / frame_rate
    }
}

/// Integer canvas coordinate (top-left anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy).
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Bracketed pair, the format used by the status panel and the export listing.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// The two base interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseMode {
    /// Browse the gallery and pick a sprite
    Select,
    /// Move the picked sprite around the canvas
    Place,
}

impl BaseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseMode::Select => "select",
            BaseMode::Place => "place",
        }
    }
}

/// Keyboard keys the bindings can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,
    /// Latin letter, stored uppercase
    Letter(char),
    /// Digit 0-9
    Digit(u8),
    /// Function key F1-F12
    F(u8),
}

impl Key {
    /// Parse a key name (case-insensitive).
    ///
    /// Accepts `Up`/`ArrowUp` style arrow names, single letters and digits,
    /// and `F1`..`F12`.
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "up" | "arrowup" => return Some(Key::ArrowUp),
            "down" | "arrowdown" => return Some(Key::ArrowDown),
            "left" | "arrowleft" => return Some(Key::ArrowLeft),
            "right" | "arrowright" => return Some(Key::ArrowRight),
            "escape" | "esc" => return Some(Key::Escape),
            "enter" | "return" => return Some(Key::Enter),
            "space" => return Some(Key::Space),
            "tab" => return Some(Key::Tab),
            "backspace" => return Some(Key::Backspace),
            "delete" | "del" => return Some(Key::Delete),
            _ => {}
        }

        let mut chars = lower.chars();
        match (chars.next(), chars.as_str()) {
            (Some(c), "") if c.is_ascii_lowercase() => Some(Key::Letter(c.to_ascii_uppercase())),
            (Some(c), "") if c.is_ascii_digit() => Some(Key::Digit(c as u8 - b'0')),
            (Some('f'), rest) => match rest.parse::<u8>() {
                Ok(n) if (1..=12).contains(&n) => Some(Key::F(n)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowUp => f.write_str("Up"),
            Key::ArrowDown => f.write_str("Down"),
            Key::ArrowLeft => f.write_str("Left"),
            Key::ArrowRight => f.write_str("Right"),
            Key::Escape => f.write_str("Escape"),
            Key::Enter => f.write_str("Enter"),
            Key::Space => f.write_str("Space"),
            Key::Tab => f.write_str("Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Extra1,
    Extra2,
}

impl MouseButton {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "primary" => Some(MouseButton::Left),
            "middle" => Some(MouseButton::Middle),
            "right" | "secondary" => Some(MouseButton::Right),
            "extra1" | "back" => Some(MouseButton::Extra1),
            "extra2" | "forward" => Some(MouseButton::Extra2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "Left",
            MouseButton::Middle => "Middle",
            MouseButton::Right => "Right",
            MouseButton::Extra1 => "Extra1",
            MouseButton::Extra2 => "Extra2",
        }
    }
}

/// One notch of the mouse wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Some(WheelDirection::Up),
            "down" => Some(WheelDirection::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WheelDirection::Up => "Up",
            WheelDirection::Down => "Down",
        }
    }
}

/// A single physical input that can be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalInput {
    Key(Key),
    Mouse(MouseButton),
    Wheel(WheelDirection),
}

impl PhysicalInput {
    pub fn is_key(&self) -> bool {
        matches!(self, PhysicalInput::Key(_))
    }
}

impl fmt::Display for PhysicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalInput::Key(key) => key.fmt(f),
            PhysicalInput::Mouse(button) => write!(f, "Mouse:{}", button.as_str()),
            PhysicalInput::Wheel(dir) => write!(f, "Wheel:{}", dir.as_str()),
        }
    }
}

/// Modifier keys held during a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ctrl: false,
        shift: false,
    };

    /// True when every modifier required by `self` is held in `held`.
    pub fn satisfied_by(&self, held: Modifiers) -> bool {
        (!self.alt || held.alt) && (!self.ctrl || held.ctrl) && (!self.shift || held.shift)
    }
}

/// Logical actions. Their meaning depends on the session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// Previous sprite (select) / nudge up (place)
    Up,
    /// Next sprite (select) / nudge down (place)
    Down,
    /// Nudge left (place)
    Left,
    /// Nudge right (place)
    Right,
    /// Previous sprite (select only)
    Previous,
    /// Next sprite (select only)
    Next,
    /// Bring the selected sprite to front and start placing it
    Confirm,
    /// Leave place mode
    Back,
    /// Write the placement listing
    Export,
    /// Terminate the program
    Quit,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Previous,
        Action::Next,
        Action::Confirm,
        Action::Back,
        Action::Export,
        Action::Quit,
    ];

    /// Parse action from its config name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Some(Action::Up),
            "down" => Some(Action::Down),
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "previous" | "prev" => Some(Action::Previous),
            "next" => Some(Action::Next),
            "confirm" => Some(Action::Confirm),
            "back" => Some(Action::Back),
            "export" => Some(Action::Export),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }

    /// Config name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Previous => "previous",
            Action::Next => "next",
            Action::Confirm => "confirm",
            Action::Back => "back",
            Action::Export => "export",
            Action::Quit => "quit",
        }
    }
}
