//! Frame Driver
//!
//! One call per displayed frame: turn device state into triggers, run the
//! application state machine and its side effects, advance the arena while
//! in play, and hand the renderer a read-only `FrameView`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::roster::{AssetCatalog, SelectionState};
use crate::app::settings::{Settings, SettingsField};
use crate::app::state::{AppState, TransitionError, Trigger};
use crate::config::SimConfig;
use crate::game::arena::{ArenaBounds, MapKind};
use crate::game::camera::{CameraTransform, ViewMode};
use crate::game::events::CombatEvent;
use crate::game::input::{InputSnapshot, Key, PlayerBindings};
use crate::game::session::ArenaSession;
use crate::game::state::{PlayerSlot, PlayerState};

/// Menu keys, checked in priority order.
const TRIGGER_KEYS: [(Key, Trigger); 4] = [
    (Key::Enter, Trigger::Confirm),
    (Key::Escape, Trigger::Cancel),
    (Key::Backspace, Trigger::Back),
    (Key::Tab, Trigger::OpenSettings),
];

/// Pointer button that also confirms on the title menu.
const MENU_CONFIRM_BUTTON: Key = Key::MouseLeft;

/// Key that switches camera mode in the arena.
pub const VIEW_TOGGLE_KEY: Key = Key::V;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Serialize)]
pub struct FrameView {
    /// Current screen
    pub app_state: AppState,
    /// Both players, while a session exists
    pub players: Option<[PlayerState; 2]>,
    /// First player's camera, while a session exists
    pub camera: Option<CameraTransform>,
    /// Camera mode
    pub view_mode: ViewMode,
    /// Draw the crosshair
    pub crosshair_visible: bool,
    /// Current settings
    pub settings: Settings,
    /// Highlighted settings entry
    pub settings_field: SettingsField,
    /// Map and character cursors
    pub selection: SelectionState,
    /// Map being shown
    pub map: MapKind,
    /// Fixed steps run this frame
    pub steps: u32,
    /// Fraction of a step left in the clock, for render interpolation
    pub alpha: f64,
    /// Combat events from this frame's steps
    pub events: Vec<CombatEvent>,
    /// A player with no health left
    pub knocked_out: Option<PlayerSlot>,
}

/// Application driver.
pub struct Game<A: AssetCatalog> {
    config: SimConfig,
    state: AppState,
    settings: Settings,
    settings_field: SettingsField,
    selection: SelectionState,
    session: Option<ArenaSession>,
    bindings: [PlayerBindings; 2],
    assets: A,
    record_sessions: bool,
}

impl<A: AssetCatalog> Game<A> {
    /// Start at the title menu.
    pub fn new(config: SimConfig, assets: A) -> Self {
        let selection = SelectionState {
            map: config.map,
            ..SelectionState::default()
        };
        Self {
            config,
            state: AppState::default(),
            settings: Settings::default(),
            settings_field: SettingsField::default(),
            selection,
            session: None,
            bindings: PlayerSlot::ALL.map(PlayerBindings::for_slot),
            assets,
            record_sessions: false,
        }
    }

    /// Record inputs of every arena session started from now on.
    pub fn with_recording(mut self) -> Self {
        self.record_sessions = true;
        self
    }

    /// Current screen.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Live arena session.
    pub fn session(&self) -> Option<&ArenaSession> {
        self.session.as_ref()
    }

    /// Settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Map and character cursors.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Asset catalog.
    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// False once `Exit` is reached.
    pub fn is_running(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Host-initiated quit (window closed).
    pub fn request_exit(&mut self) {
        // Only fails when already exited.
        let _ = self.apply(Trigger::Quit);
    }

    /// Fire a trigger and run the transition's side effects.
    pub fn apply(&mut self, trigger: Trigger) -> Result<AppState, TransitionError> {
        let from = self.state;
        let to = from.next(trigger)?;
        info!(%from, %to, ?trigger, "app state transition");
        self.state = to;
        self.on_enter(from, to);
        Ok(to)
    }

    fn on_enter(&mut self, from: AppState, to: AppState) {
        match to {
            AppState::CharacterSelect(slot) => {
                self.assets.ensure_loaded(self.selection.character(slot));
            }
            AppState::Arena if self.session.is_none() => {
                let characters = self.selection.characters;
                for id in characters {
                    self.assets.ensure_loaded(id);
                }
                let arena = ArenaBounds::for_map(self.selection.map);
                match ArenaSession::new(&self.config, arena, characters) {
                    Ok(session) if self.record_sessions => self.session = Some(session.with_recording()),
                    Ok(session) => self.session = Some(session),
                    Err(err) => warn!(%err, "arena rejected, no session started"),
                }
            }
            AppState::Exit => {
                self.session = None;
                self.assets.release_all();
                info!("assets released");
            }
            _ => {}
        }

        if !to.holds_session() && from.holds_session() && self.session.take().is_some() {
            info!("arena session discarded");
        }
    }

    /// Run one displayed frame.
    pub fn frame(&mut self, input: &dyn InputSnapshot, elapsed: f64) -> FrameView {
        if !self.is_running() {
            return self.view(0, 0.0, Vec::new());
        }

        self.handle_screen_input(input);

        if let Some(trigger) = TRIGGER_KEYS
            .iter()
            .find(|(key, _)| input.is_pressed(*key))
            .map(|&(_, trigger)| trigger)
            .or_else(|| {
                (self.state == AppState::Menu && input.is_pressed(MENU_CONFIRM_BUTTON))
                    .then_some(Trigger::Confirm)
            })
        {
            if let Err(err) = self.apply(trigger) {
                debug!(%err, "trigger ignored");
            }
        }

        let (steps, alpha, events) = match (self.state, self.session.as_mut()) {
            (AppState::Arena, Some(session)) => {
                if input.is_pressed(VIEW_TOGGLE_KEY) {
                    session.toggle_view();
                }
                let (dx, dy) = input.pointer_delta();
                session.apply_pointer(dx, dy, self.settings.mouse_sensitivity);

                let frames = [
                    self.bindings[0].sample(input),
                    self.bindings[1].sample(input),
                ];
                let summary = session.advance(elapsed, frames);
                (summary.steps, summary.alpha, summary.events)
            }
            _ => (0, 0.0, Vec::new()),
        };

        self.view(steps, alpha, events)
    }

    /// Cursor movement on menu screens.
    fn handle_screen_input(&mut self, input: &dyn InputSnapshot) {
        let horizontal = input.is_pressed(Key::Right) as i32 - input.is_pressed(Key::Left) as i32;
        let vertical = input.is_pressed(Key::Down) as i32 - input.is_pressed(Key::Up) as i32;

        match self.state {
            AppState::MapSelect if horizontal != 0 => {
                self.selection.move_map(horizontal);
            }
            AppState::CharacterSelect(slot) if horizontal != 0 => {
                let id = self.selection.move_character(slot, horizontal);
                self.assets.ensure_loaded(id);
            }
            AppState::Settings { .. } => {
                if vertical > 0 {
                    self.settings_field = self.settings_field.next();
                } else if vertical < 0 {
                    self.settings_field = self.settings_field.previous();
                }
                self.settings.adjust(self.settings_field, horizontal);
            }
            _ => {}
        }
    }

    fn view(&self, steps: u32, alpha: f64, events: Vec<CombatEvent>) -> FrameView {
        let view_mode = self
            .session
            .as_ref()
            .map(ArenaSession::view_mode)
            .unwrap_or_default();

        FrameView {
            app_state: self.state,
            players: self.session.as_ref().map(|s| s.state().players.clone()),
            camera: self
                .session
                .as_ref()
                .map(|s| s.camera(self.settings.field_of_view)),
            view_mode,
            crosshair_visible: self.state == AppState::Arena && view_mode.shows_crosshair(),
            settings: self.settings.clone(),
            settings_field: self.settings_field,
            selection: self.selection.clone(),
            map: self
                .session
                .as_ref()
                .map(|s| s.state().arena.kind)
                .unwrap_or(self.selection.map),
            steps,
            alpha,
            events,
            knocked_out: self.session.as_ref().and_then(|s| s.state().knocked_out()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::roster::TrackingCatalog;
    use crate::core::constants::FIXED_STEP_SECS as DT;
    use crate::game::input::KeyState;
    use crate::game::state::CharacterId;

    fn game() -> Game<TrackingCatalog> {
        Game::new(SimConfig::default(), TrackingCatalog::new())
    }

    fn press(game: &mut Game<TrackingCatalog>, key: Key) -> FrameView {
        game.frame(&KeyState::new().press(key), DT)
    }

    fn enter_arena(game: &mut Game<TrackingCatalog>) {
        for _ in 0..4 {
            press(game, Key::Enter);
        }
        assert_eq!(game.state(), AppState::Arena);
    }

    #[test]
    fn test_menu_to_arena_creates_session() {
        let mut g = game();
        assert!(g.session().is_none());
        enter_arena(&mut g);

        let session = g.session().map(|s| s.state().clone());
        let state = session.unwrap_or_else(|| panic!("no session"));
        assert_eq!(state.player(PlayerSlot::First).position.x, -4.0);
        assert_eq!(state.player(PlayerSlot::Second).position.x, 4.0);
        assert!(g.assets().is_loaded(CharacterId(0)));
    }

    #[test]
    fn test_mouse_confirms_only_on_menu() {
        let mut g = game();
        let view = press(&mut g, Key::MouseLeft);
        assert_eq!(view.app_state, AppState::MapSelect);

        let view = press(&mut g, Key::MouseLeft);
        assert_eq!(view.app_state, AppState::MapSelect);
    }

    #[test]
    fn test_selection_carried_into_arena() {
        let mut g = game();
        press(&mut g, Key::Enter);
        press(&mut g, Key::Right);
        assert_eq!(g.selection().map, MapKind::Desert);
        press(&mut g, Key::Enter);
        press(&mut g, Key::Enter);
        press(&mut g, Key::Right);
        assert!(g.assets().is_loaded(CharacterId(1)));
        let view = press(&mut g, Key::Enter);

        assert_eq!(view.app_state, AppState::Arena);
        assert_eq!(view.map, MapKind::Desert);
        let players = view.players.unwrap_or_else(|| panic!("no players"));
        assert_eq!(players[0].character, CharacterId(0));
        assert_eq!(players[1].character, CharacterId(1));
    }

    #[test]
    fn test_pause_keeps_session() {
        let mut g = game();
        enter_arena(&mut g);
        let walk = KeyState::new().hold(Key::D);
        g.frame(&walk, DT * 10.0);
        let tick = g.session().map(|s| s.state().tick);

        let view = press(&mut g, Key::Escape);
        assert_eq!(view.app_state, AppState::Pause);
        assert_eq!(view.steps, 0);

        g.frame(&walk, 1.0);
        assert_eq!(g.session().map(|s| s.state().tick), tick);

        press(&mut g, Key::Enter);
        assert_eq!(g.state(), AppState::Arena);
        assert!(g.session().is_some());
    }

    #[test]
    fn test_leaving_pause_discards_session() {
        let mut g = game();
        enter_arena(&mut g);
        press(&mut g, Key::Escape);
        press(&mut g, Key::Escape);
        assert_eq!(g.state(), AppState::Menu);
        assert!(g.session().is_none());
    }

    #[test]
    fn test_settings_from_pause_keeps_session() {
        let mut g = game();
        enter_arena(&mut g);
        press(&mut g, Key::Escape);
        press(&mut g, Key::Tab);
        assert!(matches!(g.state(), AppState::Settings { .. }));
        assert!(g.session().is_some());

        press(&mut g, Key::Down);
        press(&mut g, Key::Right);
        assert_eq!(g.settings().field_of_view, 65.0);

        press(&mut g, Key::Escape);
        assert_eq!(g.state(), AppState::Pause);
        assert!(g.session().is_some());
    }

    #[test]
    fn test_view_toggle_and_crosshair() {
        let mut g = game();
        enter_arena(&mut g);
        let view = press(&mut g, Key::V);
        assert_eq!(view.view_mode, ViewMode::FirstPerson);
        assert!(view.crosshair_visible);
        let camera = view.camera.unwrap_or_else(|| panic!("no camera"));
        assert_eq!(camera.fov_y, 60.0);

        let view = press(&mut g, Key::V);
        assert_eq!(view.view_mode, ViewMode::ThirdPerson);
        assert!(!view.crosshair_visible);
    }

    #[test]
    fn test_exit_releases_assets_once() {
        let mut g = game();
        press(&mut g, Key::Escape);
        assert!(!g.is_running());
        assert_eq!(g.assets().release_count(), 1);

        g.request_exit();
        press(&mut g, Key::Enter);
        assert_eq!(g.assets().release_count(), 1);
    }

    #[test]
    fn test_quit_from_arena() {
        let mut g = game();
        enter_arena(&mut g);
        g.request_exit();
        assert_eq!(g.state(), AppState::Exit);
        assert!(g.session().is_none());
        assert_eq!(g.assets().release_count(), 1);
    }

    #[test]
    fn test_frame_view_serializes() {
        let mut g = game();
        enter_arena(&mut g);
        let view = g.frame(&KeyState::new(), DT);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"app_state\":\"Arena\""));
    }
}
