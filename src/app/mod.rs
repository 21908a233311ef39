//! Application Layer
//!
//! Screen flow around the arena: menus, map and character selection,
//! settings, pause and shutdown.
//!
//! ## Module Structure
//!
//! - `state`: Application states, triggers and the transition table
//! - `settings`: Sensitivity, field of view, cursor lock
//! - `roster`: Characters, selection cursors, asset catalog contract
//! - `game`: Per-frame driver producing `FrameView`s

pub mod state;
pub mod settings;
pub mod roster;
pub mod game;

// Re-export key types
pub use state::{AppState, SettingsOrigin, TransitionError, Trigger};
pub use settings::{Settings, SettingsField};
pub use roster::{AssetCatalog, CharacterDef, SelectionState, TrackingCatalog, ROSTER};
pub use game::{FrameView, Game};
