//! Gameplay Tuning Constants
//!
//! Every number the simulation depends on lives here so that
//! `CombatTuning::default()` and the tests agree on a single source.
//!
//! ## Units
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Distance   world units (1 unit ≈ 1 metre)                  │
//! │  Time       seconds                                         │
//! │  Angles     radians, yaw measured from +Z towards +X        │
//! │  Health     integer points                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// TIMING
// =============================================================================

/// Simulation rate in Hz.
pub const TICK_RATE: u32 = 60;

/// Fixed step in seconds, as used by the clock accumulator.
pub const FIXED_STEP_SECS: f64 = 1.0 / TICK_RATE as f64;

/// Fixed step in seconds, as used by the per-player integration.
pub const FIXED_DT: f32 = 1.0 / TICK_RATE as f32;

/// Default cap on fixed steps executed for a single wall-clock frame.
pub const DEFAULT_MAX_STEPS_PER_CALL: u32 = 8;

/// Timers below this value are snapped to zero.
///
/// Repeated `f32` subtraction of 1/60 never lands exactly on zero.
pub const TIMER_EPSILON: f32 = 1.0e-4;

// =============================================================================
// MOVEMENT
// =============================================================================

/// Base ground speed: 5.0 units/sec
pub const BASE_MOVE_SPEED: f32 = 5.0;

/// Speed multiplier while the sprint modifier is held.
pub const SPRINT_MULTIPLIER: f32 = 1.8;

/// Upward velocity applied on jump: 8.5 units/sec
pub const JUMP_VELOCITY: f32 = 8.5;

/// Downward acceleration: 22.0 units/sec²
pub const GRAVITY: f32 = 22.0;

/// Distance kept between players and the arena edge.
pub const ARENA_MARGIN: f32 = 1.0;

/// Spawn offset along X (first player at -X, second at +X).
pub const SPAWN_OFFSET: f32 = 4.0;

// =============================================================================
// COMBAT
// =============================================================================

/// Starting and maximum health.
pub const MAX_HEALTH: u32 = 100;

/// Damage dealt by one connecting attack.
pub const ATTACK_DAMAGE: u32 = 10;

/// Maximum attacker-to-victim distance for a hit.
pub const ATTACK_RANGE: f32 = 2.5;

/// Length of the active attack window in seconds.
pub const ATTACK_WINDOW: f32 = 0.2;

/// Minimum time between two attack triggers in seconds.
pub const ATTACK_COOLDOWN: f32 = 0.6;

// =============================================================================
// CAMERA
// =============================================================================

/// Pitch clamp for first-person look (~74.5°).
pub const PITCH_LIMIT: f32 = 1.3;

/// Eye height above the player origin in first-person.
pub const EYE_HEIGHT: f32 = 1.7;

/// Height of the third-person look target above the player origin.
pub const THIRD_PERSON_TARGET_HEIGHT: f32 = 1.0;

/// Horizontal distance of the third-person camera behind the target.
pub const THIRD_PERSON_DISTANCE: f32 = 5.0;

/// Height of the third-person camera above the target.
pub const THIRD_PERSON_HEIGHT: f32 = 2.0;
