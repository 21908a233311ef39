//! Game State Definitions
//!
//! Player records and the arena context that owns both of them.
//! The two players live in a fixed-size array indexed by `PlayerSlot`,
//! so iteration order is always first player, then second.

use serde::{Serialize, Deserialize};

use crate::config::CombatTuning;
use crate::core::constants::{MAX_HEALTH, TIMER_EPSILON};
use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::core::vec3::Vec3;
use crate::game::arena::ArenaBounds;
use crate::game::events::CombatEvent;

// =============================================================================
// PLAYER SLOT
// =============================================================================

/// Which of the two local players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerSlot {
    /// Keyboard + mouse player
    First = 0,
    /// Arrow-cluster player
    Second = 1,
}

impl PlayerSlot {
    /// Both slots in step order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::First, PlayerSlot::Second];

    /// Array index of this slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other player.
    #[inline]
    pub const fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }
}

/// Index into the character roster.
///
/// Chosen on the selection screen; the simulation only carries it along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct CharacterId(pub u8);

impl CharacterId {
    /// Roster index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// State of a single combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Which player this is
    pub slot: PlayerSlot,

    /// Which character model represents this player
    pub character: CharacterId,

    /// World position; y is height above the ground
    pub position: Vec3,

    /// Vertical velocity (positive = up)
    pub vertical_velocity: f32,

    /// Yaw in radians
    pub facing_angle: f32,

    /// Health points, 0..=MAX_HEALTH
    pub health: u32,

    /// True while the attack window is open
    pub attacking: bool,

    /// Remaining attack window in seconds
    pub attack_timer: f32,

    /// Remaining cooldown before the next attack in seconds
    pub attack_cooldown: f32,
}

impl PlayerState {
    /// Create a player standing at a spawn point.
    pub fn new(slot: PlayerSlot, character: CharacterId, spawn: Vec3) -> Self {
        Self {
            slot,
            character,
            position: spawn,
            vertical_velocity: 0.0,
            facing_angle: 0.0,
            health: MAX_HEALTH,
            attacking: false,
            attack_timer: 0.0,
            attack_cooldown: 0.0,
        }
    }

    /// Put the player back at a spawn point with full health and idle timers.
    ///
    /// The only operation that raises health.
    pub fn reset(&mut self, spawn: Vec3, tuning: &CombatTuning) {
        self.position = spawn;
        self.vertical_velocity = 0.0;
        self.facing_angle = 0.0;
        self.health = tuning.max_health.min(MAX_HEALTH);
        self.attacking = false;
        self.attack_timer = 0.0;
        self.attack_cooldown = 0.0;
    }

    /// Standing on (or below) the ground plane.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.position.y <= 0.0
    }

    /// Cooldown has fully elapsed.
    #[inline]
    pub fn attack_ready(&self) -> bool {
        self.attack_cooldown <= 0.0
    }

    /// Health is exhausted.
    #[inline]
    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }

    /// Remove health, flooring at zero. Returns the health left.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Count the cooldown down by `dt`, snapping tiny leftovers to zero.
    pub fn decay_cooldown(&mut self, dt: f32) {
        self.attack_cooldown = snap_timer((self.attack_cooldown - dt).max(0.0));
    }

    /// Count the attack window down by `dt`. Returns true when it closed.
    pub fn decay_attack_window(&mut self, dt: f32) -> bool {
        if !self.attacking {
            return false;
        }
        self.attack_timer = snap_timer((self.attack_timer - dt).max(0.0));
        if self.attack_timer <= 0.0 {
            self.attacking = false;
            return true;
        }
        false
    }

    /// Hash this player's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.slot as u8);
        hasher.update_u8(self.character.0);
        hasher.update_vec3(self.position);
        hasher.update_f32(self.vertical_velocity);
        hasher.update_f32(self.facing_angle);
        hasher.update_u32(self.health);
        hasher.update_bool(self.attacking);
        hasher.update_f32(self.attack_timer);
        hasher.update_f32(self.attack_cooldown);
    }
}

#[inline]
fn snap_timer(value: f32) -> f32 {
    if value < TIMER_EPSILON {
        0.0
    } else {
        value
    }
}

// =============================================================================
// ARENA STATE
// =============================================================================

/// Everything one arena session simulates.
///
/// Passed by `&mut` into each step; there is no other copy of player state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArenaState {
    /// Steps simulated since the session started
    pub tick: u64,

    /// Play area
    pub arena: ArenaBounds,

    /// Both combatants, indexed by `PlayerSlot::index`
    pub players: [PlayerState; 2],

    /// Events generated by the current step (drained by the caller)
    #[serde(skip)]
    pub pending_events: Vec<CombatEvent>,
}

impl ArenaState {
    /// Create an arena with both players reset at their spawn points.
    pub fn new(arena: ArenaBounds, characters: [CharacterId; 2], tuning: &CombatTuning) -> Self {
        let players = PlayerSlot::ALL.map(|slot| {
            let mut player = PlayerState::new(slot, characters[slot.index()], Vec3::ZERO);
            player.reset(arena.spawn_point(slot), tuning);
            player
        });

        Self {
            tick: 0,
            arena,
            players,
            pending_events: Vec::new(),
        }
    }

    /// Reset both players to their spawn points.
    pub fn reset_players(&mut self, tuning: &CombatTuning) {
        for slot in PlayerSlot::ALL {
            let spawn = self.arena.spawn_point(slot);
            self.players[slot.index()].reset(spawn, tuning);
        }
    }

    /// Get a player.
    #[inline]
    pub fn player(&self, slot: PlayerSlot) -> &PlayerState {
        &self.players[slot.index()]
    }

    /// Get a player mutably.
    #[inline]
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerState {
        &mut self.players[slot.index()]
    }

    /// First player with no health left, if any.
    pub fn knocked_out(&self) -> Option<PlayerSlot> {
        self.players
            .iter()
            .find(|p| p.is_knocked_out())
            .map(|p| p.slot)
    }

    /// Distance between the two players.
    pub fn player_distance(&self) -> f32 {
        self.players[0].position.distance(self.players[1].position)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            for player in &self.players {
                player.hash_into(hasher);
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
