//! Decoded pixel data owned by a sprite.

/// Immutable RGBA8 pixel buffer (straight alpha, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Wrap raw RGBA8 pixels. Returns `None` if the buffer length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A surface filled with one colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(len * 4);
        for _ in 0..len {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.idx(x, y).map(|i| {
            [
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ]
        })
    }

    /// Make every pixel whose colour equals `key` fully transparent.
    pub(crate) fn apply_color_key(&mut self, key: [u8; 3]) {
        for px in self.pixels.chunks_exact_mut(4) {
            if px[..3] == key {
                px[3] = 0;
            }
        }
    }
}

impl From<image::RgbaImage> for Surface {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_rejects_wrong_length() {
        assert!(Surface::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn get_pixel_is_bounds_checked() {
        let s = Surface::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(s.get_pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(s.get_pixel(3, 0), None);
        assert_eq!(s.get_pixel(0, 2), None);
    }

    #[test]
    fn color_key_clears_alpha_of_matching_pixels_only() {
        let mut s = Surface::from_rgba(
            2,
            1,
            vec![
                10, 20, 30, 255, //
                10, 20, 31, 255,
            ],
        )
        .unwrap();
        s.apply_color_key([10, 20, 30]);
        assert_eq!(s.get_pixel(0, 0), Some([10, 20, 30, 0]));
        assert_eq!(s.get_pixel(1, 0), Some([10, 20, 31, 255]));
    }
}
