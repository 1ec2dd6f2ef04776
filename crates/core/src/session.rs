//! Session - the select/place/export interaction state machine.
//!
//! The session owns the gallery, the selection index and the current mode.
//! It is fed one [`Input`] at a time (in the order the events arrived during
//! the frame) plus a per-frame drag update, and produces the status panel text
//! for the frame.
//!
//! # Modes
//!
//! | Mode | Up/Down | Left/Right | Previous/Next | Confirm | Back | Export |
//! |------|---------|------------|---------------|---------|------|--------|
//! | Select | move selection | - | move selection | bring to front, place | - | export |
//! | Place | nudge y | nudge x | - | - | back to select | export |
//!
//! After an export a notice is layered on top of the base mode. While it is
//! shown, every press only dismisses it and the base mode resumes unchanged.
//! A window close request always quits.

use tracing::{debug, error};

use crate::export::Exporter;
use crate::gallery::Gallery;
use crate::sprite::Sprite;
use crate::types::{Action, BaseMode, Position, NUDGE_STEP, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Transient message shown after an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The listing was written
    Exported,
    /// Writing the listing failed with the given message
    ExportFailed(String),
}

/// Current mode: a base mode with an optional notice layered on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub base: BaseMode,
    pub notice: Option<Notice>,
}

impl Mode {
    pub fn notice_active(&self) -> bool {
        self.notice.is_some()
    }
}

/// One input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A press bound to a logical action
    Action(Action),
    /// A key or mouse-button press without a binding
    Press,
    /// The window was asked to close
    Close,
}

/// What the main loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Inclusive bounds for keyboard nudging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NudgeBounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl NudgeBounds {
    /// Keep the anchor on the canvas: x in `[0, SCREEN_WIDTH]`, y in `[0, SCREEN_HEIGHT]`.
    pub const SCREEN: NudgeBounds = NudgeBounds {
        max_x: SCREEN_WIDTH as i32,
        max_y: SCREEN_HEIGHT as i32,
    };

    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(pos.x.clamp(0, self.max_x), pos.y.clamp(0, self.max_y))
    }
}

/// Complete interaction state.
#[derive(Debug, Clone)]
pub struct Session {
    gallery: Gallery,
    mode: Mode,
    selected: usize,
    exporter: Exporter,
    bounds: NudgeBounds,
}

impl Session {
    /// Start in select mode with the first sprite selected.
    pub fn new(gallery: Gallery, exporter: Exporter) -> Self {
        Self {
            gallery,
            mode: Mode {
                base: BaseMode::Select,
                notice: None,
            },
            selected: 0,
            exporter,
            bounds: NudgeBounds::SCREEN,
        }
    }

    pub fn with_bounds(mut self, bounds: NudgeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    pub fn selected_sprite(&self) -> &Sprite {
        // `selected` is kept in range and the gallery is never empty.
        &self.gallery.sprites()[self.selected]
    }

    /// Apply one input.
    pub fn handle(&mut self, input: Input) -> Step {
        if input == Input::Close {
            return Step::Quit;
        }

        if self.mode.notice.is_some() {
            self.dismiss_notice();
            return Step::Continue;
        }

        let Input::Action(action) = input else {
            return Step::Continue;
        };

        match (self.mode.base, action) {
            (_, Action::Quit) => return Step::Quit,
            (_, Action::Export) => self.export(),

            (BaseMode::Select, Action::Up | Action::Previous) => {
                self.selected = self.gallery.previous_index(self.selected);
            }
            (BaseMode::Select, Action::Down | Action::Next) => {
                self.selected = self.gallery.next_index(self.selected);
            }
            (BaseMode::Select, Action::Confirm) => self.confirm(),

            (BaseMode::Place, Action::Up) => self.nudge(0, -NUDGE_STEP),
            (BaseMode::Place, Action::Down) => self.nudge(0, NUDGE_STEP),
            (BaseMode::Place, Action::Left) => self.nudge(-NUDGE_STEP, 0),
            (BaseMode::Place, Action::Right) => self.nudge(NUDGE_STEP, 0),
            (BaseMode::Place, Action::Back) => {
                self.mode.base = BaseMode::Select;
                debug!(mode = "select", "mode changed");
            }

            _ => {}
        }
        Step::Continue
    }

    /// Drag-follow: while the primary button is held in place mode, the
    /// selected sprite jumps to the pointer every frame.
    ///
    /// Returns true if the position was updated.
    pub fn follow_pointer(&mut self, pointer: Position) -> bool {
        if self.mode.base != BaseMode::Place || self.mode.notice.is_some() {
            return false;
        }
        let selected = self.selected;
        match self.gallery.get_mut(selected) {
            Some(sprite) => {
                sprite.position = pointer;
                true
            }
            None => false,
        }
    }

    /// Status panel lines for the current mode.
    pub fn status_lines(&self) -> Vec<String> {
        if let Some(notice) = &self.mode.notice {
            return match notice {
                Notice::Exported => vec![
                    "● Exported placement data ●".to_string(),
                    "  Press any key".to_string(),
                ],
                Notice::ExportFailed(message) => vec![
                    "● Export failed ●".to_string(),
                    format!("  {message}"),
                    "  Press any key".to_string(),
                ],
            };
        }

        let sprite = self.selected_sprite();
        match self.mode.base {
            BaseMode::Select => vec![
                "<Select> Wheel: choose  Left click: confirm  F1: export".to_string(),
                format!("▼ {}", sprite.name()),
                format!("  Position: {}", sprite.position),
            ],
            BaseMode::Place => vec![
                "<Place> Left drag: move  Right click: back  F1: export".to_string(),
                format!("  {}", sprite.name()),
                format!("▼ Position: {}", sprite.position),
            ],
        }
    }

    fn confirm(&mut self) {
        if let Some(front) = self.gallery.bring_to_front(self.selected) {
            self.selected = front;
        }
        self.mode.base = BaseMode::Place;
        debug!(
            mode = "place",
            sprite = self.selected_sprite().name(),
            "mode changed"
        );
    }

    fn nudge(&mut self, dx: i32, dy: i32) {
        let bounds = self.bounds;
        let selected = self.selected;
        if let Some(sprite) = self.gallery.get_mut(selected) {
            sprite.position = bounds.clamp(sprite.position.offset(dx, dy));
        }
    }

    fn export(&mut self) {
        let notice = match self.exporter.export(&self.gallery) {
            Ok(_) => Notice::Exported,
            Err(err) => {
                error!(error = %err, "export failed");
                Notice::ExportFailed(err.to_string())
            }
        };
        self.mode.notice = Some(notice);
    }

    fn dismiss_notice(&mut self) {
        self.mode.notice = None;
        debug!(mode = self.mode.base.as_str(), "notice dismissed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    struct Fixture {
        _dir: tempfile::TempDir,
        session: Session,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let sprites = names
            .iter()
            .map(|n| Sprite::new(*n, Surface::solid(2, 2, [255, 255, 255, 255])))
            .collect();
        let gallery = Gallery::from_sprites(sprites).unwrap();
        let session = Session::new(gallery, Exporter::new(dir.path().join("out.txt")));
        Fixture { _dir: dir, session }
    }

    fn act(s: &mut Session, action: Action) -> Step {
        s.handle(Input::Action(action))
    }

    fn names(s: &Session) -> Vec<String> {
        s.gallery().names().map(str::to_string).collect()
    }

    #[test]
    fn starts_in_select_with_first_sprite() {
        let f = fixture(&["a", "b"]);
        assert_eq!(f.session.mode().base, BaseMode::Select);
        assert!(!f.session.mode().notice_active());
        assert_eq!(f.session.selected(), 0);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let mut f = fixture(&["a", "b", "c", "d"]);
        for _ in 0..4 {
            act(&mut f.session, Action::Down);
        }
        assert_eq!(f.session.selected(), 0);
        for _ in 0..4 {
            act(&mut f.session, Action::Previous);
        }
        assert_eq!(f.session.selected(), 0);
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut f = fixture(&["a", "b", "c"]);
        act(&mut f.session, Action::Up);
        assert_eq!(f.session.selected(), 2);
        act(&mut f.session, Action::Next);
        assert_eq!(f.session.selected(), 0);
    }

    #[test]
    fn confirm_brings_selected_to_front_and_places() {
        let mut f = fixture(&["a", "b", "c"]);
        act(&mut f.session, Action::Down);
        act(&mut f.session, Action::Confirm);

        assert_eq!(f.session.mode().base, BaseMode::Place);
        assert_eq!(names(&f.session), ["a", "c", "b"]);
        assert_eq!(f.session.selected(), 2);
        assert_eq!(f.session.selected_sprite().name(), "b");
    }

    #[test]
    fn confirm_on_frontmost_keeps_order() {
        let mut f = fixture(&["a", "b", "c"]);
        act(&mut f.session, Action::Up);
        act(&mut f.session, Action::Confirm);
        act(&mut f.session, Action::Back);
        act(&mut f.session, Action::Confirm);
        assert_eq!(names(&f.session), ["a", "b", "c"]);
    }

    #[test]
    fn back_returns_to_select_without_reordering() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Confirm);
        let before = names(&f.session);
        act(&mut f.session, Action::Back);
        assert_eq!(f.session.mode().base, BaseMode::Select);
        assert_eq!(f.session.selected(), 1);
        assert_eq!(names(&f.session), before);
    }

    #[test]
    fn nudge_moves_by_one_and_clamps_at_zero() {
        let mut f = fixture(&["a"]);
        act(&mut f.session, Action::Confirm);
        act(&mut f.session, Action::Right);
        act(&mut f.session, Action::Down);
        act(&mut f.session, Action::Down);
        assert_eq!(f.session.selected_sprite().position, Position::new(1, 2));

        for _ in 0..5 {
            act(&mut f.session, Action::Left);
            act(&mut f.session, Action::Up);
        }
        assert_eq!(f.session.selected_sprite().position, Position::ORIGIN);
    }

    #[test]
    fn nudge_clamps_to_screen_on_matching_axes() {
        let mut f = fixture(&["a"]);
        act(&mut f.session, Action::Confirm);
        f.session.follow_pointer(Position::new(640, 480));
        act(&mut f.session, Action::Right);
        act(&mut f.session, Action::Down);
        assert_eq!(f.session.selected_sprite().position, Position::new(640, 480));
    }

    #[test]
    fn arrows_do_not_nudge_in_select_mode() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Right);
        act(&mut f.session, Action::Left);
        assert_eq!(f.session.selected(), 0);
        assert_eq!(f.session.selected_sprite().position, Position::ORIGIN);
    }

    #[test]
    fn wheel_actions_do_not_navigate_in_place_mode() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Confirm);
        act(&mut f.session, Action::Next);
        act(&mut f.session, Action::Previous);
        assert_eq!(f.session.selected(), 1);
        assert_eq!(f.session.mode().base, BaseMode::Place);
    }

    #[test]
    fn drag_follow_tracks_pointer_exactly() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Confirm);

        assert!(f.session.follow_pointer(Position::new(50, 60)));
        assert_eq!(f.session.selected_sprite().position, Position::new(50, 60));
        assert!(f.session.follow_pointer(Position::new(51, 60)));
        assert_eq!(f.session.selected_sprite().position, Position::new(51, 60));
    }

    #[test]
    fn drag_follow_is_ignored_in_select_mode() {
        let mut f = fixture(&["a"]);
        assert!(!f.session.follow_pointer(Position::new(50, 60)));
        assert_eq!(f.session.selected_sprite().position, Position::ORIGIN);
    }

    #[test]
    fn export_notice_dismissal_restores_select_state() {
        let mut f = fixture(&["a", "b", "c"]);
        act(&mut f.session, Action::Down);
        let before = (f.session.selected(), names(&f.session));

        act(&mut f.session, Action::Export);
        assert_eq!(f.session.mode().notice, Some(Notice::Exported));
        assert_eq!(f.session.mode().base, BaseMode::Select);

        f.session.handle(Input::Press);
        assert!(!f.session.mode().notice_active());
        assert_eq!(f.session.mode().base, BaseMode::Select);
        assert_eq!((f.session.selected(), names(&f.session)), before);
    }

    #[test]
    fn export_notice_dismissal_restores_place_mode() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Confirm);
        act(&mut f.session, Action::Export);
        assert_eq!(f.session.mode().base, BaseMode::Place);

        act(&mut f.session, Action::Down);
        assert!(!f.session.mode().notice_active());
        assert_eq!(f.session.mode().base, BaseMode::Place);
    }

    #[test]
    fn notice_blocks_navigation_nudge_and_drag() {
        let mut f = fixture(&["a", "b"]);
        act(&mut f.session, Action::Confirm);
        act(&mut f.session, Action::Export);

        assert!(!f.session.follow_pointer(Position::new(10, 10)));
        assert_eq!(f.session.selected_sprite().position, Position::ORIGIN);

        // The first press only dismisses.
        act(&mut f.session, Action::Right);
        assert_eq!(f.session.selected_sprite().position, Position::ORIGIN);
        assert_eq!(names(&f.session), ["a", "b"]);
    }

    #[test]
    fn quit_key_only_dismisses_an_active_notice() {
        let mut f = fixture(&["a"]);
        act(&mut f.session, Action::Export);
        assert_eq!(act(&mut f.session, Action::Quit), Step::Continue);
        assert_eq!(act(&mut f.session, Action::Quit), Step::Quit);
    }

    #[test]
    fn close_always_quits() {
        let mut f = fixture(&["a"]);
        assert_eq!(f.session.handle(Input::Close), Step::Quit);
        act(&mut f.session, Action::Export);
        assert_eq!(f.session.handle(Input::Close), Step::Quit);
    }

    #[test]
    fn export_writes_listing_file() {
        let mut f = fixture(&["a.png", "b.png"]);
        act(&mut f.session, Action::Down);
        act(&mut f.session, Action::Confirm);
        f.session.follow_pointer(Position::new(12, 34));
        act(&mut f.session, Action::Export);

        let text = std::fs::read_to_string(f.session.exporter().path()).unwrap();
        assert_eq!(text, "a.png [0, 0]\nb.png [12, 34]\n");
    }

    #[test]
    fn failed_export_shows_failure_notice() {
        let dir = tempfile::tempdir().unwrap();
        let gallery =
            Gallery::from_sprites(vec![Sprite::new("a", Surface::solid(1, 1, [0; 4]))]).unwrap();
        let mut session = Session::new(gallery, Exporter::new(dir.path().join("no/such/file")));

        session.handle(Input::Action(Action::Export));
        assert!(matches!(
            session.mode().notice,
            Some(Notice::ExportFailed(_))
        ));
        assert_eq!(session.status_lines().len(), 3);
        assert_eq!(session.status_lines()[0], "● Export failed ●");
    }

    #[test]
    fn status_lines_describe_mode_and_selection() {
        let mut f = fixture(&["a.png", "b.png"]);
        let lines = f.session.status_lines();
        assert!(lines[0].starts_with("<Select>"));
        assert_eq!(lines[1], "▼ a.png");
        assert_eq!(lines[2], "  Position: [0, 0]");

        act(&mut f.session, Action::Confirm);
        f.session.follow_pointer(Position::new(3, 4));
        let lines = f.session.status_lines();
        assert!(lines[0].starts_with("<Place>"));
        assert_eq!(lines[1], "  a.png");
        assert_eq!(lines[2], "▼ Position: [3, 4]");

        act(&mut f.session, Action::Export);
        assert_eq!(
            f.session.status_lines(),
            ["● Exported placement data ●", "  Press any key"]
        );
    }
}
