//! Character Roster and Selection
//!
//! The playable characters, the cursors used to pick a map and a
//! character per player, and the contract for whoever loads the models.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::game::arena::MapKind;
use crate::game::state::{CharacterId, PlayerSlot};

/// A playable character's assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterDef {
    /// Display name
    pub name: &'static str,
    /// glTF scene path
    pub model_path: &'static str,
    /// Directory holding the textures
    pub texture_dir: &'static str,
    /// Base-color texture file inside `texture_dir`
    pub base_color: &'static str,
}

/// Every playable character, indexed by `CharacterId`.
pub const ROSTER: [CharacterDef; 2] = [
    CharacterDef {
        name: "Asgore",
        model_path: "models/asgore/scene.gltf",
        texture_dir: "models/asgore/textures",
        base_color: "Asgore_Mat_baseColor.png",
    },
    CharacterDef {
        name: "Metrocop",
        model_path: "models/metrocop/scene.gltf",
        texture_dir: "models/metrocop/textures",
        base_color: "metrocop_body_baseColor.png",
    },
];

impl CharacterDef {
    /// Look up a roster entry.
    pub fn get(id: CharacterId) -> Option<&'static CharacterDef> {
        ROSTER.get(id.index())
    }

    /// Full path of the base-color texture.
    pub fn base_color_path(&self) -> String {
        format!("{}/{}", self.texture_dir, self.base_color)
    }
}

/// Clamp `value` into `min..=max` (no wrap-around).
#[inline]
pub fn clamp_index(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

// =============================================================================
// SELECTION
// =============================================================================

/// Map and character cursors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Highlighted map
    pub map: MapKind,
    /// Highlighted character per player
    pub characters: [CharacterId; 2],
}

impl SelectionState {
    /// Cursors at the first map and first character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the map cursor by `delta`, stopping at either end.
    pub fn move_map(&mut self, delta: i32) -> MapKind {
        for _ in 0..delta.unsigned_abs().min(MapKind::ALL.len() as u32) {
            self.map = if delta > 0 { self.map.next() } else { self.map.previous() };
        }
        self.map
    }

    /// Move one player's character cursor by `delta`, stopping at either end.
    pub fn move_character(&mut self, slot: PlayerSlot, delta: i32) -> CharacterId {
        let last = ROSTER.len() as i64 - 1;
        let current = self.characters[slot.index()].index() as i64;
        let index = clamp_index(current + i64::from(delta), 0, last);
        let id = CharacterId(index as u8);
        self.characters[slot.index()] = id;
        id
    }

    /// A player's current pick.
    pub fn character(&self, slot: PlayerSlot) -> CharacterId {
        self.characters[slot.index()]
    }
}

// =============================================================================
// ASSETS
// =============================================================================

/// Loads and releases character visuals.
///
/// Implementations substitute a placeholder when a texture is missing;
/// the simulation never learns whether loading succeeded.
pub trait AssetCatalog {
    /// Load a character's model if it is not loaded yet.
    fn ensure_loaded(&mut self, id: CharacterId);

    /// A character's model is loaded.
    fn is_loaded(&self, id: CharacterId) -> bool;

    /// Unload everything.
    fn release_all(&mut self);
}

/// Catalog that only tracks what would be loaded.
///
/// Used by the headless binary and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingCatalog {
    loaded: BTreeSet<CharacterId>,
    load_count: usize,
    release_count: usize,
}

impl TrackingCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads performed (repeat requests for a loaded id do not count).
    pub fn load_count(&self) -> usize {
        self.load_count
    }

    /// `release_all` calls so far.
    pub fn release_count(&self) -> usize {
        self.release_count
    }
}

impl AssetCatalog for TrackingCatalog {
    fn ensure_loaded(&mut self, id: CharacterId) {
        if CharacterDef::get(id).is_none() {
            return;
        }
        if self.loaded.insert(id) {
            self.load_count += 1;
        }
    }

    fn is_loaded(&self, id: CharacterId) -> bool {
        self.loaded.contains(&id)
    }

    fn release_all(&mut self) {
        self.loaded.clear();
        self.release_count += 1;
    }
}
