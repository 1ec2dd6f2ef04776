//! Software canvas the frame is composed on.

use crate::core::{Sprite, Surface};
use crate::types::{Position, SCREEN_HEIGHT, SCREEN_WIDTH};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned pixel rectangle. Zero width or height means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fixed-size RGBA8 pixel buffer (row-major, opaque after `clear`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// A canvas the size of the window.
    pub fn screen() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
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

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.idx(x, y).map(|i| {
            let p = &self.pixels[i..i + 4];
            Rgba::new(p[0], p[1], p[2], p[3])
        })
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Rect {
        let clipped = self.clip(rect.x as i64, rect.y as i64, rect.width, rect.height);
        let rgba = color.to_array();
        for y in clipped.y..clipped.y + clipped.height {
            for x in clipped.x..clipped.x + clipped.width {
                if let Some(i) = self.idx(x, y) {
                    self.pixels[i..i + 4].copy_from_slice(&rgba);
                }
            }
        }
        clipped
    }

    /// Alpha-blend `surface` with its top-left corner at `pos`.
    ///
    /// Source-over with straight alpha; the canvas stays opaque. Returns the
    /// clipped rectangle that was touched.
    pub fn blit(&mut self, surface: &Surface, pos: Position) -> Rect {
        let area = self.clip(pos.x as i64, pos.y as i64, surface.width(), surface.height());
        if area.is_empty() {
            return area;
        }

        let src_x0 = (area.x as i64 - pos.x as i64) as usize;
        let src_y0 = (area.y as i64 - pos.y as i64) as usize;
        let src_w = surface.width() as usize;
        let src = surface.pixels();

        for row in 0..area.height as usize {
            let src_row = (src_y0 + row) * src_w;
            for col in 0..area.width as usize {
                let s = (src_row + src_x0 + col) * 4;
                let Some(d) = self.idx(area.x + col as u32, area.y + row as u32) else {
                    continue;
                };
                blend_over(&mut self.pixels[d..d + 4], &src[s..s + 4]);
            }
        }

        area
    }

    fn clip(&self, x: i64, y: i64, width: u32, height: u32) -> Rect {
        let x0 = x.clamp(0, self.width as i64);
        let y0 = y.clamp(0, self.height as i64);
        let x1 = (x + width as i64).clamp(0, self.width as i64);
        let y1 = (y + height as i64).clamp(0, self.height as i64);
        if x1 <= x0 || y1 <= y0 {
            return Rect::EMPTY;
        }
        Rect::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

#[inline(always)]
fn blend_over(dst: &mut [u8], src: &[u8]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(src),
        a => {
            let a = a as u32;
            let inv = 255 - a;
            for c in 0..3 {
                dst[c] = ((src[c] as u32 * a + dst[c] as u32 * inv + 127) / 255) as u8;
            }
            dst[3] = (a + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
        }
    }
}

/// Something that paints itself onto a canvas.
pub trait Drawable {
    /// Paint and return the affected rectangle (possibly empty).
    fn draw(&self, canvas: &mut Canvas) -> Rect;
}

impl Drawable for Sprite {
    fn draw(&self, canvas: &mut Canvas) -> Rect {
        canvas.blit(self.surface(), self.position)
    }
}
