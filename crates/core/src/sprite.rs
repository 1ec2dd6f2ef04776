//! Sprite - a named, positioned image.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::surface::Surface;
use crate::types::Position;

/// One image from the gallery.
///
/// The name and pixels are fixed at creation; only the position changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    name: String,
    surface: Surface,
    /// Top-left draw anchor on the canvas
    pub position: Position,
}

impl Sprite {
    /// Build a sprite from an already decoded surface, placed at the origin.
    pub fn new(name: impl Into<String>, surface: Surface) -> Self {
        Self {
            name: name.into(),
            surface,
            position: Position::ORIGIN,
        }
    }

    /// Set the initial position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Decode the image at `path`, keeping its alpha channel.
    ///
    /// The sprite is named after the final path segment.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, &bytes)
    }

    /// Like [`Sprite::create`], then make every pixel with the colour found at
    /// `key_point` transparent.
    pub fn create_with_colorkey(
        path: impl AsRef<Path>,
        key_point: (u32, u32),
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut sprite = Self::create(path)?;
        let (x, y) = key_point;
        let Some(key) = sprite.surface.get_pixel(x, y) else {
            return Err(LoadError::ColorKeyOutOfBounds {
                path: path.to_path_buf(),
                x,
                y,
                width: sprite.surface.width(),
                height: sprite.surface.height(),
            });
        };
        sprite.surface.apply_color_key([key[0], key[1], key[2]]);
        Ok(sprite)
    }

    /// Decode file contents that were already read from `path`.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, LoadError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let surface = Surface::from(decoded.to_rgba8());
        Ok(Self::new(display_name(path), surface))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> std::path::PathBuf {
        let path = dir.join(name);
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn create_names_sprite_after_file_and_starts_at_origin() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(4, 3, Rgba([9, 8, 7, 128]));
        let path = write_png(dir.path(), "tree.png", &img);

        let sprite = Sprite::create(&path).unwrap();
        assert_eq!(sprite.name(), "tree.png");
        assert_eq!(sprite.position, Position::ORIGIN);
        assert_eq!((sprite.width(), sprite.height()), (4, 3));
        // Alpha survives decoding.
        assert_eq!(sprite.surface().get_pixel(3, 2), Some([9, 8, 7, 128]));
    }

    #[test]
    fn create_fails_with_decode_error_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();

        let err = Sprite::create(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }), "{err}");
    }

    #[test]
    fn create_fails_with_io_error_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Sprite::create(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[test]
    fn colorkey_uses_sampled_pixel_colour() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]));
        img.put_pixel(1, 1, Rgba([200, 0, 0, 255]));
        let path = write_png(dir.path(), "icon.png", &img);

        let sprite = Sprite::create_with_colorkey(&path, (0, 0)).unwrap();
        assert_eq!(sprite.surface().get_pixel(0, 0).unwrap()[3], 0);
        assert_eq!(sprite.surface().get_pixel(1, 0).unwrap()[3], 0);
        assert_eq!(sprite.surface().get_pixel(1, 1), Some([200, 0, 0, 255]));
    }

    #[test]
    fn colorkey_point_outside_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let path = write_png(dir.path(), "icon.png", &img);

        let err = Sprite::create_with_colorkey(&path, (2, 0)).unwrap_err();
        assert!(matches!(err, LoadError::ColorKeyOutOfBounds { x: 2, y: 0, .. }));
    }
}
