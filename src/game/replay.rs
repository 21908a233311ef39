//! Input Recording and Replay
//!
//! Step inputs are delta-compressed: only steps where the input changed
//! are stored, along with the ticks at which both players were sent back
//! to their spawns. Replaying a recording from the same starting state with the
//! same tuning and step length reproduces the session bit for bit, which
//! `ArenaState::compute_hash` can confirm.

use serde::{Serialize, Deserialize};

use crate::config::CombatTuning;
use crate::game::events::CombatEvent;
use crate::game::input::StepInput;
use crate::game::state::ArenaState;
use crate::game::tick::step;

/// Input in effect from a given tick onward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputDelta {
    /// First tick using this input
    pub tick: u64,
    /// The new input
    pub input: StepInput,
}

/// Recorded inputs for one arena session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Last tick recorded
    pub end_tick: u64,

    /// Only ticks where the input changed
    deltas: Vec<InputDelta>,

    /// Ticks after which the players were reset, ascending
    resets: Vec<u64>,

    #[serde(skip)]
    last_input: StepInput,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self {
            end_tick: 0,
            deltas: Vec::with_capacity(256),
            resets: Vec::new(),
            last_input: StepInput::idle(),
        }
    }

    /// Record the input used for a tick. Ticks must be increasing.
    pub fn record(&mut self, tick: u64, input: StepInput) {
        self.end_tick = tick;
        if input != self.last_input {
            self.deltas.push(InputDelta { tick, input });
            self.last_input = input;
        }
    }

    /// Record a reset to spawns after `tick` steps have run.
    pub fn record_reset(&mut self, tick: u64) {
        if self.resets.last() != Some(&tick) {
            self.resets.push(tick);
        }
        self.end_tick = self.end_tick.max(tick);
    }

    /// A reset was recorded after `tick` steps.
    pub fn reset_after(&self, tick: u64) -> bool {
        self.resets.binary_search(&tick).is_ok()
    }

    /// Input in effect at a tick (idle before the first change).
    pub fn input_at(&self, tick: u64) -> StepInput {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            StepInput::idle()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// Number of stored changes.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }
}

/// Re-run a recording from an initial state.
///
/// Runs ticks `initial.tick + 1 ..= recording.end_tick`, applying recorded
/// resets between steps, and returns the final state plus every event
/// generated.
pub fn replay(
    initial: ArenaState,
    recording: &InputRecording,
    tuning: &CombatTuning,
    dt: f32,
) -> (ArenaState, Vec<CombatEvent>) {
    let mut state = initial;
    let mut all_events = Vec::new();

    loop {
        if recording.reset_after(state.tick) {
            state.reset_players(tuning);
        }
        if state.tick >= recording.end_tick {
            break;
        }
        let input = recording.input_at(state.tick + 1);
        let result = step(&mut state, &input, tuning, dt);
        all_events.extend(result.events);
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::FIXED_DT;
    use crate::game::arena::ArenaBounds;
    use crate::game::input::InputFrame;
    use crate::game::state::CharacterId;

    fn walk_right() -> StepInput {
        StepInput::cardinal(InputFrame::new().with(InputFrame::FLAG_RIGHT), InputFrame::new())
    }

    #[test]
    fn test_recording_stores_only_changes() {
        let mut rec = InputRecording::new();
        for tick in 1..=10 {
            rec.record(tick, walk_right());
        }
        assert_eq!(rec.delta_count(), 1);

        rec.record(11, StepInput::idle());
        assert_eq!(rec.delta_count(), 2);
        assert_eq!(rec.end_tick, 11);
    }

    #[test]
    fn test_idle_prefix_not_stored() {
        let mut rec = InputRecording::new();
        rec.record(1, StepInput::idle());
        rec.record(2, StepInput::idle());
        assert_eq!(rec.delta_count(), 0);
        assert_eq!(rec.input_at(2), StepInput::idle());
    }

    #[test]
    fn test_input_at() {
        let mut rec = InputRecording::new();
        rec.record(5, walk_right());
        rec.record(9, StepInput::idle());

        assert_eq!(rec.input_at(1), StepInput::idle());
        assert_eq!(rec.input_at(5), walk_right());
        assert_eq!(rec.input_at(8), walk_right());
        assert_eq!(rec.input_at(9), StepInput::idle());
        assert_eq!(rec.input_at(100), StepInput::idle());
    }

    #[test]
    fn test_reset_markers() {
        let mut rec = InputRecording::new();
        rec.record(1, walk_right());
        rec.record_reset(1);
        rec.record_reset(1);
        assert!(rec.reset_after(1));
        assert!(!rec.reset_after(0));
        assert!(!rec.reset_after(2));
        assert_eq!(rec.end_tick, 1);
    }

    #[test]
    fn test_replay_applies_resets() {
        let tuning = CombatTuning::default();
        let initial = ArenaState::new(
            ArenaBounds::default(),
            [CharacterId(0), CharacterId(1)],
            &tuning,
        );

        let mut live = initial.clone();
        let mut rec = InputRecording::new();
        for n in 0..40u64 {
            if n == 30 {
                live.reset_players(&tuning);
                rec.record_reset(live.tick);
            }
            let input = if n < 30 { walk_right() } else { StepInput::idle() };
            rec.record(live.tick + 1, input);
            step(&mut live, &input, &tuning, FIXED_DT);
        }
        // Trailing reset with no step after it.
        live.reset_players(&tuning);
        rec.record_reset(live.tick);

        let (replayed, _) = replay(initial, &rec, &tuning, FIXED_DT);
        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
    }

    #[test]
    fn test_replay_matches_live_run() {
        let tuning = CombatTuning::default();
        let initial = ArenaState::new(
            ArenaBounds::default(),
            [CharacterId(0), CharacterId(1)],
            &tuning,
        );

        let mut live = initial.clone();
        let mut rec = InputRecording::new();
        let attack = InputFrame::new().with(InputFrame::FLAG_ATTACK);
        for n in 0..200u64 {
            let input = match n % 40 {
                0..=19 => walk_right(),
                20 => StepInput::cardinal(attack, attack),
                _ => StepInput::idle(),
            };
            rec.record(live.tick + 1, input);
            step(&mut live, &input, &tuning, FIXED_DT);
        }

        let (replayed, _) = replay(initial, &rec, &tuning, FIXED_DT);
        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
    }
}
