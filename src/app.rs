//! Per-frame application flow, independent of the window toolkit.
//!
//! Each frame: feed the drained window events through the input mapper into
//! the session, apply drag-follow, deliver key repeats, then compose the
//! frame. [`crate::window`] drives this from eframe; tests drive it directly.

use tracing::info;

use crate::core::{Input, Session, Step};
use crate::input::{InputMapper, Resolved};
use crate::types::{BaseMode, Key, Modifiers, MouseButton, PhysicalInput, Position};
use crate::view::{CanvasRenderer, Frame, FrameClock, TextMetrics};

/// A window event after translation out of the toolkit's types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// A key, mouse button or wheel step was pressed
    Press {
        input: PhysicalInput,
        modifiers: Modifiers,
    },
    /// A key with no name in our vocabulary; still dismisses a notice
    UnknownPress,
    /// A key was released
    Release(Key),
    /// The window lost focus; held keys are forgotten
    FocusLost,
    /// The window is being closed
    Close,
}

/// What the window should do after a frame.
#[derive(Debug)]
pub struct FrameOutput {
    pub step: Step,
    pub frame: Frame,
}

pub struct Controller {
    session: Session,
    mapper: InputMapper,
    clock: FrameClock,
    renderer: CanvasRenderer,
}

impl Controller {
    pub fn new(session: Session, mapper: InputMapper, clock: FrameClock) -> Self {
        Self {
            session,
            mapper,
            clock,
            renderer: CanvasRenderer::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Feed one event to the session.
    pub fn handle_event(&mut self, event: WindowEvent) -> Step {
        let input = match event {
            WindowEvent::Press { input, modifiers } => match self.mapper.press(input, modifiers) {
                Resolved::Action(action) => Input::Action(action),
                Resolved::Unbound => Input::Press,
                Resolved::Ignored => return Step::Continue,
            },
            WindowEvent::UnknownPress => Input::Press,
            WindowEvent::Release(key) => {
                self.mapper.release(key);
                return Step::Continue;
            }
            WindowEvent::FocusLost => {
                self.mapper.reset();
                return Step::Continue;
            }
            WindowEvent::Close => Input::Close,
        };
        self.apply(input)
    }

    /// Run one frame at `now_ms`.
    ///
    /// `drag` is the pointer position while the primary button is held. It is
    /// applied only when the session was placing before this frame's events
    /// and the button was not pressed in this frame. Once a quit is seen, the
    /// remaining events and repeats are dropped.
    pub fn frame(
        &mut self,
        now_ms: u64,
        events: impl IntoIterator<Item = WindowEvent>,
        drag: Option<Position>,
        metrics: &dyn TextMetrics,
    ) -> FrameOutput {
        let elapsed = self.clock.tick(now_ms);
        let step = self.run_inputs(elapsed, events, drag);
        let lines = self.session.status_lines();
        let frame = self
            .renderer
            .render_frame(self.session.gallery(), &lines, metrics);
        FrameOutput { step, frame }
    }

    fn run_inputs(
        &mut self,
        elapsed_ms: u32,
        events: impl IntoIterator<Item = WindowEvent>,
        drag: Option<Position>,
    ) -> Step {
        let was_placing = self.placing();
        let mut primary_pressed = false;
        for event in events {
            primary_pressed |= is_primary_press(&event);
            if self.handle_event(event) == Step::Quit {
                return Step::Quit;
            }
        }

        // Drag-follow only continues a hold that began in an earlier frame
        // while already placing; the press itself never moves the sprite.
        if let Some(pointer) = drag {
            if was_placing && !primary_pressed {
                self.session.follow_pointer(pointer);
            }
        }

        let Some(repeat) = self.mapper.tick(elapsed_ms) else {
            return Step::Continue;
        };
        let input = match repeat {
            Resolved::Action(action) => Input::Action(action),
            Resolved::Unbound | Resolved::Ignored => Input::Press,
        };
        self.apply(input)
    }

    fn placing(&self) -> bool {
        let mode = self.session.mode();
        mode.base == BaseMode::Place && !mode.notice_active()
    }

    fn apply(&mut self, input: Input) -> Step {
        let step = self.session.handle(input);
        if step == Step::Quit {
            info!(?input, "quit requested");
        }
        step
    }
}

fn is_primary_press(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::Press {
            input: PhysicalInput::Mouse(MouseButton::Left),
            ..
        }
    )
}
