//! eframe front end: event translation, presentation and frame pacing.

use std::sync::Arc;
use std::time::Instant;

use eframe::egui;
use tracing::{debug, info};

use crate::app::{Controller, WindowEvent};
use crate::assets::{FontAsset, Icon};
use crate::core::Step;
use crate::types::{Key, Modifiers, MouseButton, PhysicalInput, Position, WheelDirection};
use crate::types::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::view::{Frame, Rgba, TextMetrics};

/// Window caption.
pub const WINDOW_TITLE: &str = "Image placement test - press ESC to quit";

const FONT_NAME: &str = "gallery";

/// Open the window and run until quit or close.
pub fn run(controller: Controller, icon: Icon, font: FontAsset) -> eframe::Result<()> {
    let icon = egui::IconData {
        rgba: icon.rgba,
        width: icon.width,
        height: icon.height,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32])
            .with_resizable(false)
            .with_icon(Arc::new(icon)),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            install_font(&cc.egui_ctx, font.bytes);
            Ok(Box::new(PlacerApp::new(controller, font.size)))
        }),
    )
}

fn install_font(ctx: &egui::Context, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    // Built-in fonts stay as fallback for glyphs the gallery font lacks.
    let mut chain = vec![FONT_NAME.to_owned()];
    if let Some(defaults) = fonts.families.get(&egui::FontFamily::Proportional) {
        chain.extend(defaults.iter().cloned());
    }
    fonts
        .families
        .insert(egui::FontFamily::Name(FONT_NAME.into()), chain);
    ctx.set_fonts(fonts);
}

struct PlacerApp {
    controller: Controller,
    font: egui::FontId,
    texture: Option<egui::TextureHandle>,
    started: Instant,
    closing: bool,
}

impl PlacerApp {
    fn new(controller: Controller, font_size: f32) -> Self {
        Self {
            controller,
            font: egui::FontId::new(font_size, egui::FontFamily::Name(FONT_NAME.into())),
            texture: None,
            started: Instant::now(),
            closing: false,
        }
    }

    fn present(&mut self, ctx: &egui::Context, painter: &egui::Painter, frame: Frame) {
        let canvas = frame.canvas;
        let size = [canvas.width() as usize, canvas.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, canvas.pixels());
        let texture = match self.texture.take() {
            Some(mut handle) => {
                handle.set(image, egui::TextureOptions::NEAREST);
                handle
            }
            None => ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST),
        };

        let rect = egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(size[0] as f32, size[1] as f32),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        self.texture = Some(texture);

        for run in frame.text_runs {
            let color = color32(run.color);
            let galley = painter.layout_no_wrap(run.text, self.font.clone(), color);
            painter.galley(egui::pos2(run.x as f32, run.y as f32), galley, color);
        }
    }
}

impl eframe::App for PlacerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (mut events, drag, close_requested) = ctx.input(|i| {
            let events: Vec<WindowEvent> = i.events.iter().filter_map(translate_event).collect();
            let drag = if i.pointer.primary_down() {
                i.pointer.latest_pos().map(to_position)
            } else {
                None
            };
            (events, drag, i.viewport().close_requested())
        });
        if close_requested {
            events.push(WindowEvent::Close);
        }

        let now_ms = self.started.elapsed().as_millis() as u64;
        let painter = ctx.layer_painter(egui::LayerId::background());
        let metrics = EguiMetrics {
            painter: &painter,
            font: &self.font,
        };
        let output = self.controller.frame(now_ms, events, drag, &metrics);
        self.present(ctx, &painter, output.frame);

        if output.step == Step::Quit {
            if !self.closing && !close_requested {
                info!("closing window");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            self.closing = true;
            return;
        }

        ctx.request_repaint_after(self.controller.clock().until_next(now_ms));
    }
}

/// Text measurement through egui's layout with the panel font.
struct EguiMetrics<'a> {
    painter: &'a egui::Painter,
    font: &'a egui::FontId,
}

impl TextMetrics for EguiMetrics<'_> {
    fn text_width(&self, text: &str) -> u32 {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), self.font.clone(), egui::Color32::BLACK);
        galley.size().x.ceil() as u32
    }

    fn line_height(&self) -> u32 {
        let galley = self
            .painter
            .layout_no_wrap("Mg".to_owned(), self.font.clone(), egui::Color32::BLACK);
        galley.size().y.ceil() as u32
    }
}

fn translate_event(event: &egui::Event) -> Option<WindowEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed,
            repeat,
            modifiers,
            ..
        } => {
            let translated = translate_key(*key);
            match (*pressed, translated) {
                // Key repeat is generated by the input layer instead.
                (true, _) if *repeat => None,
                (true, Some(key)) => Some(WindowEvent::Press {
                    input: PhysicalInput::Key(key),
                    modifiers: translate_modifiers(modifiers),
                }),
                (true, None) => {
                    debug!(key = key.name(), "unmapped key");
                    Some(WindowEvent::UnknownPress)
                }
                (false, Some(key)) => Some(WindowEvent::Release(key)),
                (false, None) => None,
            }
        }
        egui::Event::PointerButton {
            button,
            pressed: true,
            modifiers,
            ..
        } => Some(WindowEvent::Press {
            input: PhysicalInput::Mouse(translate_button(*button)),
            modifiers: translate_modifiers(modifiers),
        }),
        egui::Event::MouseWheel {
            delta, modifiers, ..
        } => {
            let dir = if delta.y > 0.0 {
                WheelDirection::Up
            } else if delta.y < 0.0 {
                WheelDirection::Down
            } else {
                return None;
            };
            Some(WindowEvent::Press {
                input: PhysicalInput::Wheel(dir),
                modifiers: translate_modifiers(modifiers),
            })
        }
        egui::Event::WindowFocused(false) => Some(WindowEvent::FocusLost),
        _ => None,
    }
}

/// egui key names ("Down", "A", "0", "F1", "Escape") parse as our key names.
fn translate_key(key: egui::Key) -> Option<Key> {
    Key::from_str(key.name())
}

fn translate_button(button: egui::PointerButton) -> MouseButton {
    match button {
        egui::PointerButton::Primary => MouseButton::Left,
        egui::PointerButton::Secondary => MouseButton::Right,
        egui::PointerButton::Middle => MouseButton::Middle,
        egui::PointerButton::Extra1 => MouseButton::Extra1,
        egui::PointerButton::Extra2 => MouseButton::Extra2,
    }
}

fn translate_modifiers(m: &egui::Modifiers) -> Modifiers {
    Modifiers {
        alt: m.alt,
        ctrl: m.ctrl,
        shift: m.shift,
    }
}

fn to_position(pos: egui::Pos2) -> Position {
    Position::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}
