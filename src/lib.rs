//! Image placer (workspace facade crate).
//!
//! Browse the images of a directory, pick one, drag or nudge it around a
//! 640x480 canvas and export every image's position as a text listing.
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `image_placer::{core,input,types,view}` and adds the
//! application shell (configuration, assets, the frame controller and the
//! eframe window).

pub use image_placer_core as core;
pub use image_placer_input as input;
pub use image_placer_types as types;
pub use image_placer_view as view;

pub mod app;
pub mod assets;
pub mod config;
pub mod window;
