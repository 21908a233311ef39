//! Arena Session
//!
//! The simulation context for one stay in the arena: both players, the
//! fixed-step clock, the camera mode and the first-person look state.
//! Everything the step function touches is reached through this value;
//! there are no globals.

use tracing::{debug, info};

use crate::config::{CombatTuning, ConfigError, SimConfig};
use crate::game::arena::ArenaBounds;
use crate::game::camera::{camera_transform, CameraTransform, LookState, ViewMode};
use crate::game::clock::SimulationClock;
use crate::game::events::CombatEvent;
use crate::game::input::{InputFrame, MovementBasis, StepInput};
use crate::game::replay::InputRecording;
use crate::game::state::{ArenaState, CharacterId, PlayerSlot};
use crate::game::tick::step;

/// What one wall-clock frame did to the simulation.
#[derive(Debug, Default)]
pub struct FrameSummary {
    /// Fixed steps executed
    pub steps: u32,
    /// Seconds of backlog discarded by the catch-up cap
    pub dropped_backlog: f64,
    /// Fraction of a step left in the clock, for render interpolation
    pub alpha: f64,
    /// Events from every step, in order
    pub events: Vec<CombatEvent>,
}

/// Live arena simulation.
#[derive(Clone, Debug)]
pub struct ArenaSession {
    state: ArenaState,
    clock: SimulationClock,
    tuning: CombatTuning,
    dt: f32,
    view_mode: ViewMode,
    look: LookState,
    recording: Option<InputRecording>,
}

impl ArenaSession {
    /// Start a session with both players at their spawn points.
    ///
    /// Fails if the arena is too small or malformed.
    pub fn new(
        config: &SimConfig,
        arena: ArenaBounds,
        characters: [CharacterId; 2],
    ) -> Result<Self, ConfigError> {
        arena.validate()?;
        info!(
            map = arena.kind.name(),
            first = characters[0].0,
            second = characters[1].0,
            "arena session created"
        );
        Ok(Self {
            state: ArenaState::new(arena, characters, &config.tuning),
            clock: SimulationClock::from_config(config),
            tuning: config.tuning.clone(),
            dt: config.fixed_step as f32,
            view_mode: ViewMode::default(),
            look: LookState::default(),
            recording: None,
        })
    }

    /// Record every step's input from now on.
    pub fn with_recording(mut self) -> Self {
        self.recording = Some(InputRecording::new());
        self
    }

    /// Current arena state.
    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    /// Fixed-step clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Tuning in effect.
    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Step length in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Active camera mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// First-person look state.
    pub fn look(&self) -> LookState {
        self.look
    }

    /// Recorded inputs, if recording.
    pub fn recording(&self) -> Option<&InputRecording> {
        self.recording.as_ref()
    }

    /// Switch between first- and third-person.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        debug!(mode = ?self.view_mode, "view mode toggled");
        self.view_mode
    }

    /// Feed pointer motion to the look state. Ignored in third-person.
    pub fn apply_pointer(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if self.view_mode == ViewMode::FirstPerson {
            self.look.apply_pointer(dx, dy, sensitivity);
        }
    }

    /// Step input for the current camera mode.
    pub fn step_input(&self, frames: [InputFrame; 2]) -> StepInput {
        StepInput {
            frames,
            bases: PlayerSlot::ALL.map(|slot| MovementBasis::for_player(slot, self.view_mode, &self.look)),
        }
    }

    /// Advance by elapsed wall-clock time.
    ///
    /// The same input frames drive every step run by this call.
    pub fn advance(&mut self, elapsed: f64, frames: [InputFrame; 2]) -> FrameSummary {
        let plan = self.clock.advance(elapsed);
        let input = self.step_input(frames);

        let mut summary = FrameSummary {
            steps: plan.steps,
            dropped_backlog: plan.dropped_backlog,
            alpha: self.clock.alpha(),
            events: Vec::new(),
        };

        for _ in 0..plan.steps {
            if let Some(recording) = self.recording.as_mut() {
                recording.record(self.state.tick + 1, input);
            }
            let result = step(&mut self.state, &input, &self.tuning, self.dt);
            summary.events.extend(result.events);
        }

        summary
    }

    /// Camera for the first player.
    pub fn camera(&self, fov_y: f32) -> CameraTransform {
        camera_transform(self.state.player(PlayerSlot::First), self.view_mode, &self.look, fov_y)
    }

    /// Put both players back at their spawns and clear the clock.
    ///
    /// The tick keeps counting; a recording notes the reset so replay
    /// follows it.
    pub fn reset(&mut self) {
        self.state.reset_players(&self.tuning);
        self.clock.reset();
        if let Some(recording) = self.recording.as_mut() {
            recording.record_reset(self.state.tick);
        }
        debug!(tick = self.state.tick, "players reset");
    }
}
