//! State Hashing
//!
//! SHA-256 digests of simulation state, used to check that two runs fed
//! the same per-step inputs end in bit-identical states.
//!
//! Floats are hashed by bit pattern, so `0.0` and `-0.0` differ. That is
//! intended: any divergence in the arithmetic path should show up.

use sha2::{Sha256, Digest};
use super::vec3::Vec3;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for arena state digests.
const ARENA_STATE_DOMAIN: &[u8] = b"EPIC_BATTLE_ARENA_V1";

/// Deterministic hasher for simulation state.
///
/// Order of updates is part of the digest.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for arena state.
    pub fn for_arena_state() -> Self {
        Self::new(ARENA_STATE_DOMAIN)
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 bit pattern.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a Vec3.
    #[inline]
    pub fn update_vec3(&mut self, value: Vec3) {
        for bits in value.to_bits() {
            self.update_u32(bits);
        }
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for an arena.
///
/// Called by `ArenaState::compute_hash()`; the closure adds the players.
pub fn compute_state_hash<F>(tick: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_arena_state();
    hasher.update_u64(tick);
    add_state(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
