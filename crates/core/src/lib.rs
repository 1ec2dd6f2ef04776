//! Core placement logic - sprites, the gallery, the interaction session and export
//!
//! This crate holds everything that decides *what* is on the canvas. It has no
//! dependency on the window, the event pump or text rendering, making it:
//!
//! - **Deterministic**: the same inputs produce the same gallery order and positions
//! - **Testable**: the session can be driven headless, one input at a time
//!
//! # Module Structure
//!
//! - [`surface`]: immutable RGBA pixel data
//! - [`sprite`]: a named, positioned image decoded from a file
//! - [`gallery`]: the ordered sprite list (paint order) and directory discovery
//! - [`session`]: select/place modes, export notice, input handling
//! - [`export`]: the `name [x, y]` listing writer
//! - [`error`]: load, discovery and export errors
//!
//! # Example
//!
//! ```
//! use image_placer_core::{Exporter, Gallery, Input, Session, Sprite, Surface};
//! use image_placer_types::{Action, BaseMode, Position};
//!
//! let gallery = Gallery::from_sprites(vec![
//!     Sprite::new("sky.png", Surface::solid(4, 4, [0, 0, 255, 255])),
//!     Sprite::new("bird.png", Surface::solid(2, 2, [255, 0, 0, 255])),
//! ])
//! .unwrap();
//!
//! let mut session = Session::new(gallery, Exporter::default());
//! session.handle(Input::Action(Action::Down));
//! session.handle(Input::Action(Action::Confirm));
//! assert_eq!(session.mode().base, BaseMode::Place);
//!
//! session.follow_pointer(Position::new(100, 40));
//! assert_eq!(session.selected_sprite().position, Position::new(100, 40));
//! ```

pub mod error;
pub mod export;
pub mod gallery;
pub mod session;
pub mod sprite;
pub mod surface;

pub use image_placer_types as types;

// Re-export commonly used types for convenience
pub use error::{ExportError, GalleryError, LoadError};
pub use export::{encode_listing, format_listing, Exporter, DEFAULT_EXPORT_PATH};
pub use gallery::{sniff_format, Gallery};
pub use session::{Input, Mode, Notice, NudgeBounds, Session, Step};
pub use sprite::Sprite;
pub use surface::Surface;
