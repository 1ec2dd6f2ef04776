//! Input module (session-facing).
//!
//! This module is intentionally independent of any UI framework. The window
//! layer translates its events into [`crate::types::PhysicalInput`] values; this
//! crate maps them onto [`crate::types::Action`]s through a configurable
//! [`BindingTable`] and re-delivers held keys at a fixed cadence via
//! [`KeyRepeat`].

pub mod bindings;
pub mod map;
pub mod repeat;

pub use image_placer_types as types;

pub use bindings::{BindingParseError, BindingTable, Trigger};
pub use map::{InputMapper, Resolved};
pub use repeat::{HeldKey, KeyRepeat};
