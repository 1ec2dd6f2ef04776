//! Gallery - the ordered sprite list.
//!
//! List order is paint order: the first sprite is painted first (backmost),
//! the last one ends up on top. The only reordering operation is
//! [`Gallery::bring_to_front`].

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{debug, info, warn};

use crate::error::GalleryError;
use crate::sprite::Sprite;

/// Raster formats picked up from the image directory.
pub const ACCEPTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Gif,
];

/// Identify an accepted image format from the leading bytes of a file.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| ACCEPTED_FORMATS.contains(format))
}

/// Non-empty ordered list of sprites.
#[derive(Debug, Clone)]
pub struct Gallery {
    sprites: Vec<Sprite>,
}

impl Gallery {
    /// Build a gallery from sprites in discovery order.
    ///
    /// Returns `None` for an empty list.
    pub fn from_sprites(sprites: Vec<Sprite>) -> Option<Self> {
        if sprites.is_empty() {
            return None;
        }
        Some(Self { sprites })
    }

    /// Load every accepted image in `dir`, ordered by file name.
    ///
    /// Entries that are not files or do not sniff as an accepted format are
    /// skipped. A file that sniffs as an image but fails to decode is skipped
    /// with a warning.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, GalleryError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| GalleryError::ReadDir {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut sprites = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let Some(format) = sniff_format(&bytes) else {
                debug!(path = %path.display(), "skipping non-image entry");
                continue;
            };
            match Sprite::from_bytes(&path, &bytes) {
                Ok(sprite) => {
                    debug!(
                        name = sprite.name(),
                        ?format,
                        width = sprite.width(),
                        height = sprite.height(),
                        "loaded sprite"
                    );
                    sprites.push(sprite);
                }
                Err(err) => warn!(error = %err, "skipping undecodable image"),
            }
        }

        let gallery = Self::from_sprites(sprites).ok_or_else(|| GalleryError::Empty {
            dir: dir.to_path_buf(),
        })?;
        info!(dir = %dir.display(), count = gallery.len(), "gallery loaded");
        Ok(gallery)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    /// Sprites in paint order (back to front).
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|s| s.name())
    }

    /// Move the sprite at `index` to the end of the paint order.
    ///
    /// Returns the sprite's new index. Out-of-range indices leave the order
    /// untouched and return `None`.
    pub fn bring_to_front(&mut self, index: usize) -> Option<usize> {
        if index >= self.sprites.len() {
            return None;
        }
        let sprite = self.sprites.remove(index);
        self.sprites.push(sprite);
        Some(self.sprites.len() - 1)
    }

    /// Index before `index`, wrapping from the first sprite to the last.
    pub fn previous_index(&self, index: usize) -> usize {
        if index == 0 || index >= self.sprites.len() {
            self.sprites.len() - 1
        } else {
            index - 1
        }
    }

    /// Index after `index`, wrapping from the last sprite to the first.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 >= self.sprites.len() {
            0
        } else {
            index + 1
        }
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a Sprite;
    type IntoIter = std::slice::Iter<'a, Sprite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sprites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use image::{Rgba, RgbaImage};

    fn gallery(names: &[&str]) -> Gallery {
        let sprites = names
            .iter()
            .map(|n| Sprite::new(*n, Surface::solid(1, 1, [0, 0, 0, 255])))
            .collect();
        Gallery::from_sprites(sprites).unwrap()
    }

    #[test]
    fn empty_sprite_list_is_rejected() {
        assert!(Gallery::from_sprites(Vec::new()).is_none());
    }

    #[test]
    fn bring_to_front_moves_sprite_to_end() {
        let mut g = gallery(&["a", "b", "c"]);
        assert_eq!(g.bring_to_front(0), Some(2));
        assert_eq!(g.names().collect::<Vec<_>>(), ["b", "c", "a"]);
    }

    #[test]
    fn bring_to_front_on_frontmost_keeps_order() {
        let mut g = gallery(&["a", "b", "c"]);
        assert_eq!(g.bring_to_front(2), Some(2));
        assert_eq!(g.bring_to_front(2), Some(2));
        assert_eq!(g.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn bring_to_front_out_of_range_is_noop() {
        let mut g = gallery(&["a", "b"]);
        assert_eq!(g.bring_to_front(5), None);
        assert_eq!(g.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let g = gallery(&["a", "b", "c"]);
        assert_eq!(g.previous_index(0), 2);
        assert_eq!(g.next_index(2), 0);
        assert_eq!(g.next_index(0), 1);
        assert_eq!(g.previous_index(2), 1);

        let single = gallery(&["only"]);
        assert_eq!(single.next_index(0), 0);
        assert_eq!(single.previous_index(0), 0);
    }

    #[test]
    fn load_dir_sniffs_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        img.save_with_format(dir.path().join("b.png"), ImageFormat::Png)
            .unwrap();
        // PNG data behind a misleading extension is still an image.
        img.save_with_format(dir.path().join("a.dat"), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.path().join("notes.png"), "plain text").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let g = Gallery::load_dir(dir.path()).unwrap();
        assert_eq!(g.names().collect::<Vec<_>>(), ["a.dat", "b.png"]);
    }

    #[test]
    fn load_dir_skips_undecodable_images() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        img.save_with_format(dir.path().join("good.png"), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.path().join("broken.png"), b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let g = Gallery::load_dir(dir.path()).unwrap();
        assert_eq!(g.names().collect::<Vec<_>>(), ["good.png"]);
    }

    #[test]
    fn load_dir_without_images_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();

        let err = Gallery::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, GalleryError::Empty { .. }));
    }

    #[test]
    fn load_dir_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Gallery::load_dir(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, GalleryError::ReadDir { .. }));
    }
}
