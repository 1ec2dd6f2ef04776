//! Error types for sprite loading, gallery discovery and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors while turning an image file into a sprite.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a decodable image
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The colour-key sample point lies outside the image
    #[error(
        "colour key point ({x}, {y}) is outside the {width}x{height} image {}",
        path.display()
    )]
    ColorKeyOutOfBounds {
        path: PathBuf,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Errors while building the gallery from a directory.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to list image directory {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no JPEG, PNG, BMP or GIF images found in {}", dir.display())]
    Empty { dir: PathBuf },
}

/// Errors while writing the placement listing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
