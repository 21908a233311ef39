//! Core primitives.
//!
//! Vector math, tuning constants and state hashing shared by the
//! simulation and the application layer. Nothing here touches time,
//! input devices or rendering.

pub mod constants;
pub mod vec3;
pub mod hash;

// Re-export core types
pub use vec3::Vec3;
pub use hash::{StateHash, StateHasher, compute_state_hash};
