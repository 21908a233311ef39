//! Simulation configuration
//!
//! Tuning values default to the constants in `core::constants`. The demo
//! binary layers optional environment overrides on top.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::constants::{
    ATTACK_COOLDOWN, ATTACK_DAMAGE, ATTACK_RANGE, ATTACK_WINDOW,
    BASE_MOVE_SPEED, DEFAULT_MAX_STEPS_PER_CALL, FIXED_STEP_SECS, GRAVITY,
    JUMP_VELOCITY, MAX_HEALTH, SPRINT_MULTIPLIER,
};
use crate::game::arena::{ArenaBounds, MapKind};

/// Environment variable selecting the map preset.
pub const ENV_MAP: &str = "EPIC_BATTLE_MAP";

/// Environment variable for the catch-up cap (`none` disables it).
pub const ENV_MAX_CATCHUP: &str = "EPIC_BATTLE_MAX_CATCHUP";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Fixed step must be positive and finite.
    #[error("invalid fixed step: {0}")]
    InvalidFixedStep(f64),

    /// Catch-up cap must allow at least one step.
    #[error("max steps per call must be at least 1")]
    ZeroCatchUpCap,

    /// Arena cannot fit the edge margin.
    #[error("arena {width}x{depth} is smaller than the minimum extent {min}")]
    ArenaTooSmall {
        /// Configured width
        width: f32,
        /// Configured depth
        depth: f32,
        /// Minimum extent on either axis
        min: f32,
    },

    /// Obstacle has inverted extents or lies outside the arena.
    #[error("obstacle {index} is malformed or outside the arena")]
    InvalidObstacle {
        /// Index into the obstacle list
        index: usize,
    },

    /// A tuning value is negative or not finite.
    #[error("tuning value `{name}` must be finite and non-negative, got {value}")]
    InvalidTuning {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Environment override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidOverride {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
}

/// Per-player movement and combat tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatTuning {
    /// Ground speed in units/sec
    pub move_speed: f32,
    /// Speed multiplier while sprinting
    pub sprint_multiplier: f32,
    /// Launch velocity of a jump
    pub jump_velocity: f32,
    /// Downward acceleration (positive number)
    pub gravity: f32,
    /// Maximum hit distance
    pub attack_range: f32,
    /// Health removed per hit
    pub attack_damage: u32,
    /// Active attack window in seconds
    pub attack_window: f32,
    /// Time between attack triggers in seconds
    pub attack_cooldown: f32,
    /// Starting health
    pub max_health: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            move_speed: BASE_MOVE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            attack_range: ATTACK_RANGE,
            attack_damage: ATTACK_DAMAGE,
            attack_window: ATTACK_WINDOW,
            attack_cooldown: ATTACK_COOLDOWN,
            max_health: MAX_HEALTH,
        }
    }
}

impl CombatTuning {
    /// Reject negative or non-finite values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("jump_velocity", self.jump_velocity),
            ("gravity", self.gravity),
            ("attack_range", self.attack_range),
            ("attack_window", self.attack_window),
            ("attack_cooldown", self.attack_cooldown),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration for one arena session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed step size in seconds
    pub fixed_step: f64,
    /// Maximum steps per wall-clock frame (None = uncapped)
    pub max_steps_per_call: Option<u32>,
    /// Default map preset
    pub map: MapKind,
    /// Movement and combat tuning
    pub tuning: CombatTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_step: FIXED_STEP_SECS,
            max_steps_per_call: Some(DEFAULT_MAX_STEPS_PER_CALL),
            map: MapKind::default(),
            tuning: CombatTuning::default(),
        }
    }
}

impl SimConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAP) {
            config.map = MapKind::from_name(&raw).ok_or(ConfigError::InvalidOverride {
                key: ENV_MAP,
                value: raw,
            })?;
        }

        if let Some(raw) = lookup(ENV_MAX_CATCHUP) {
            config.max_steps_per_call = if raw.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                let steps = raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidOverride {
                    key: ENV_MAX_CATCHUP,
                    value: raw.clone(),
                })?;
                Some(steps)
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate step size, cap, tuning and the selected map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_step.is_finite() || self.fixed_step <= 0.0 {
            return Err(ConfigError::InvalidFixedStep(self.fixed_step));
        }
        if self.max_steps_per_call == Some(0) {
            return Err(ConfigError::ZeroCatchUpCap);
        }
        self.tuning.validate()?;
        ArenaBounds::for_map(self.map).validate()
    }
}
