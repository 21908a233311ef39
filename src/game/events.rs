//! Combat Events
//!
//! Emitted by the step function so the host can play sounds, flash
//! health bars or log a match without diffing player state.

use serde::{Serialize, Deserialize};
use crate::game::state::PlayerSlot;

/// What happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEventData {
    /// Player left the ground
    Jumped {
        /// Launch velocity
        velocity: f32,
    },

    /// Player touched down after being airborne
    Landed,

    /// Attack window opened
    AttackStarted,

    /// Attack connected
    Hit {
        /// Who was hit
        victim: PlayerSlot,
        /// Health removed
        damage: u32,
        /// Victim health after the hit
        health_after: u32,
        /// Attacker-to-victim distance at trigger time
        distance: f32,
    },

    /// Attack triggered out of range
    Missed {
        /// Attacker-to-victim distance at trigger time
        distance: f32,
    },

    /// Victim's health reached zero
    KnockedOut {
        /// Who delivered the final hit
        by: PlayerSlot,
    },
}

/// An event with the step it happened on and the player it concerns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Tick the event occurred on
    pub tick: u64,

    /// Acting player (the victim for `KnockedOut`)
    pub slot: PlayerSlot,

    /// Event data
    pub data: CombatEventData,
}

impl CombatEvent {
    /// Create a new event.
    pub fn new(tick: u64, slot: PlayerSlot, data: CombatEventData) -> Self {
        Self { tick, slot, data }
    }

    /// Create jump event.
    pub fn jumped(tick: u64, slot: PlayerSlot, velocity: f32) -> Self {
        Self::new(tick, slot, CombatEventData::Jumped { velocity })
    }

    /// Create landing event.
    pub fn landed(tick: u64, slot: PlayerSlot) -> Self {
        Self::new(tick, slot, CombatEventData::Landed)
    }

    /// Create attack start event.
    pub fn attack_started(tick: u64, slot: PlayerSlot) -> Self {
        Self::new(tick, slot, CombatEventData::AttackStarted)
    }

    /// Create hit event.
    pub fn hit(
        tick: u64,
        attacker: PlayerSlot,
        victim: PlayerSlot,
        damage: u32,
        health_after: u32,
        distance: f32,
    ) -> Self {
        Self::new(
            tick,
            attacker,
            CombatEventData::Hit {
                victim,
                damage,
                health_after,
                distance,
            },
        )
    }

    /// Create miss event.
    pub fn missed(tick: u64, attacker: PlayerSlot, distance: f32) -> Self {
        Self::new(tick, attacker, CombatEventData::Missed { distance })
    }

    /// Create knock-out event.
    pub fn knocked_out(tick: u64, victim: PlayerSlot, by: PlayerSlot) -> Self {
        Self::new(tick, victim, CombatEventData::KnockedOut { by })
    }

    /// True for hits that removed health.
    pub fn is_hit(&self) -> bool {
        matches!(self.data, CombatEventData::Hit { .. })
    }
}
