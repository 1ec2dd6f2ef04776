//! Status panel: a white box in the top-right corner with black text lines.
//!
//! Layout, with `w`/`h` from [`compute_layout`]:
//!
//! | Item | x | y |
//! |------|---|---|
//! | Box | `SCREEN_WIDTH - w - 5` | `5` |
//! | Line `i` | `SCREEN_WIDTH - w` | `10 + line_height * i` |

use crate::canvas::{Canvas, Rect, Rgba};
use crate::types::{PANEL_MARGIN, PANEL_PADDING, SCREEN_WIDTH};

/// Text measurement for the font the panel is drawn with.
pub trait TextMetrics {
    /// Width in pixels of `text` rendered on one line.
    fn text_width(&self, text: &str) -> u32;

    /// Vertical advance between lines.
    fn line_height(&self) -> u32;
}

/// Fixed-advance metrics (every char is `advance` wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonoMetrics {
    pub advance: u32,
    pub line_height: u32,
}

impl MonoMetrics {
    pub const fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMetrics for MonoMetrics {
    fn text_width(&self, text: &str) -> u32 {
        self.advance.saturating_mul(text.chars().count() as u32)
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}

/// A line of text placed on the canvas, to be drawn by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Rgba,
}

/// Panel size for `lines`: `(10 + widest line, 10 + line_height * count)`.
pub fn compute_layout<S: AsRef<str>>(lines: &[S], metrics: &dyn TextMetrics) -> (u32, u32) {
    let widest = lines
        .iter()
        .map(|l| metrics.text_width(l.as_ref()))
        .max()
        .unwrap_or(0);
    let height = metrics.line_height().saturating_mul(lines.len() as u32);
    (
        PANEL_PADDING.saturating_add(widest),
        PANEL_PADDING.saturating_add(height),
    )
}

/// Paint the panel box and return the text runs that go on top of it.
pub fn draw<S: AsRef<str>>(
    canvas: &mut Canvas,
    lines: &[S],
    metrics: &dyn TextMetrics,
) -> Vec<TextRun> {
    let (width, height) = compute_layout(lines, metrics);
    let box_x = SCREEN_WIDTH as i64 - width as i64 - PANEL_MARGIN as i64;
    let text_x = SCREEN_WIDTH as i64 - width as i64;

    // A panel wider than the screen starts off-canvas; only the visible part is filled.
    let fill_x = box_x.max(0) as u32;
    let fill_w = (width as i64 + box_x.min(0)).max(0) as u32;
    canvas.fill_rect(Rect::new(fill_x, PANEL_MARGIN, fill_w, height), Rgba::WHITE);

    let line_height = metrics.line_height() as i64;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| TextRun {
            x: text_x as i32,
            y: (PANEL_PADDING as i64 + line_height * i as i64) as i32,
            text: line.as_ref().to_string(),
            color: Rgba::BLACK,
        })
        .collect()
}
