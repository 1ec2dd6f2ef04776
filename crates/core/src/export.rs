//! Exporter - writes the name/position listing of the gallery.
//!
//! Each sprite becomes one line, in paint order:
//!
//! ```text
//! background.png [0, 0]
//! hero.png [120, 88]
//! ```
//!
//! The file is encoded as Shift_JIS and overwritten on every export.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::SHIFT_JIS;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::gallery::Gallery;

/// Default listing file name, relative to the working directory.
pub const DEFAULT_EXPORT_PATH: &str = "placements.txt";

/// Render the listing text for `gallery`.
pub fn format_listing(gallery: &Gallery) -> String {
    let mut text = String::new();
    for sprite in gallery {
        // Writing into a String cannot fail.
        let _ = writeln!(text, "{} {}", sprite.name(), sprite.position);
    }
    text
}

/// Encode listing text in the legacy single-byte/double-byte encoding.
///
/// Characters Shift_JIS cannot represent are written as numeric character
/// references.
pub fn encode_listing(text: &str) -> Vec<u8> {
    let (bytes, _, had_unmappable) = SHIFT_JIS.encode(text);
    if had_unmappable {
        warn!("listing contains characters not representable in Shift_JIS");
    }
    bytes.into_owned()
}

/// Writes the listing to a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exporter {
    path: PathBuf,
}

impl Exporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the output file with the current listing.
    ///
    /// Returns the number of bytes written.
    pub fn export(&self, gallery: &Gallery) -> Result<usize, ExportError> {
        let bytes = encode_listing(&format_listing(gallery));
        fs::write(&self.path, &bytes).map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            path = %self.path.display(),
            sprites = gallery.len(),
            bytes = bytes.len(),
            "exported placement listing"
        );
        Ok(bytes.len())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_PATH)
    }
}
