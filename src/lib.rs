//! # Epic Battle
//!
//! Simulation core of a two-player local 3D melee game: fixed-step
//! movement and combat, a camera controller, arena presets and the
//! application screen flow. Windowing, rendering and asset decoding
//! belong to the host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        EPIC BATTLE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  ├── constants.rs- Step rate and combat tuning               │
//! │  ├── vec3.rs     - 3D vector                                 │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Arena simulation (deterministic)          │
//! │  ├── input.rs    - Device abstraction and input frames       │
//! │  ├── state.rs    - Player and arena state                    │
//! │  ├── arena.rs    - Map presets and bounds                    │
//! │  ├── clock.rs    - Fixed-step accumulator                    │
//! │  ├── tick.rs     - One simulation step                       │
//! │  ├── combat.rs   - Attacks, cooldowns, damage                │
//! │  ├── camera.rs   - First/third-person camera                 │
//! │  ├── session.rs  - Live arena session                        │
//! │  └── replay.rs   - Input recording and replay                │
//! │                                                              │
//! │  app/            - Screen flow                               │
//! │  ├── state.rs    - Application state machine                 │
//! │  ├── settings.rs - Sensitivity, FOV, cursor lock             │
//! │  ├── roster.rs   - Characters and asset contract             │
//! │  └── game.rs     - Per-frame driver                          │
//! │                                                              │
//! │  config.rs       - Validated simulation configuration        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! A step reads nothing but the arena state, the step input and the
//! tuning. Feeding the same inputs at the same ticks gives bit-identical
//! state regardless of how wall-clock time was split into frames, which
//! `ArenaState::compute_hash` and `game::replay` verify.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod app;
pub mod config;

// Re-export commonly used types
pub use core::vec3::Vec3;
pub use config::{CombatTuning, ConfigError, SimConfig};
pub use game::input::{InputFrame, InputSnapshot, Key, KeyState, StepInput};
pub use game::state::{ArenaState, CharacterId, PlayerSlot, PlayerState};
pub use game::session::ArenaSession;
pub use app::{AppState, FrameView, Game, Trigger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = crate::core::constants::TICK_RATE;
