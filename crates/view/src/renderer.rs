//! Frame composition: sprites in paint order, then the status panel.

use crate::canvas::{Canvas, Drawable, Rgba};
use crate::core::Gallery;
use crate::panel::{self, TextMetrics, TextRun};

/// A composed frame ready to be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub canvas: Canvas,
    pub text_runs: Vec<TextRun>,
}

/// Owns the canvas between frames so it is not reallocated every time.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    canvas: Canvas,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self {
            canvas: Canvas::screen(),
        }
    }

    /// Compose one frame.
    ///
    /// The canvas is cleared to black, every sprite is drawn in gallery order
    /// (last = frontmost), then the panel goes on top.
    pub fn render_frame<S: AsRef<str>>(
        &mut self,
        gallery: &Gallery,
        overlay_lines: &[S],
        metrics: &dyn TextMetrics,
    ) -> Frame {
        self.canvas.clear(Rgba::BLACK);
        for sprite in gallery {
            sprite.draw(&mut self.canvas);
        }
        let text_runs = panel::draw(&mut self.canvas, overlay_lines, metrics);
        Frame {
            canvas: self.canvas.clone(),
            text_runs,
        }
    }

    /// The canvas of the last rendered frame.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}
