//! Game Logic Module
//!
//! The arena simulation. Deterministic for a given step length.
//!
//! ## Module Structure
//!
//! - `input`: Device abstraction, per-player input frames, key bindings
//! - `state`: Player state and the arena context
//! - `arena`: Map presets and walkable bounds
//! - `clock`: Fixed-step accumulator
//! - `tick`: One simulation step (movement, vertical physics, bounds)
//! - `combat`: Cooldowns, attack window, damage
//! - `camera`: View modes and camera transforms
//! - `events`: Combat events for hosts and replays
//! - `session`: Live arena session tying the above together
//! - `replay`: Delta-compressed input recording and replay

pub mod input;
pub mod state;
pub mod arena;
pub mod clock;
pub mod tick;
pub mod combat;
pub mod camera;
pub mod events;
pub mod session;
pub mod replay;

// Re-export key types
pub use input::{InputFrame, InputSnapshot, Key, KeyState, MovementBasis, PlayerBindings, StepInput};
pub use state::{ArenaState, CharacterId, PlayerSlot, PlayerState};
pub use arena::{ArenaBounds, MapKind};
pub use clock::{SimulationClock, StepPlan};
pub use tick::StepResult;
pub use camera::{CameraTransform, LookState, ViewMode};
pub use events::{CombatEvent, CombatEventData};
pub use session::{ArenaSession, FrameSummary};
pub use replay::InputRecording;
