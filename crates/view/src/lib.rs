//! Frame composition for the placement window.
//!
//! Everything here is pure: sprites and the status panel are composed into
//! a software [`Canvas`] plus a list of [`TextRun`]s, and the application
//! uploads the pixels as a texture and lays out the text with its own font.
//! Text measurement goes through [`TextMetrics`] so the layout can be tested
//! without a font.

pub mod canvas;
pub mod frame_clock;
pub mod panel;
pub mod renderer;

pub use image_placer_core as core;
pub use image_placer_types as types;

pub use canvas::{Canvas, Drawable, Rect, Rgba};
pub use frame_clock::FrameClock;
pub use panel::{compute_layout, MonoMetrics, TextMetrics, TextRun};
pub use renderer::{CanvasRenderer, Frame};
