//! Arena Geometry
//!
//! Ground extents, obstacle boxes and spawn points for the two map presets.
//! Obstacles are carried for the renderer only; players walk through them.

use serde::{Serialize, Deserialize};

use crate::config::ConfigError;
use crate::core::constants::{ARENA_MARGIN, SPAWN_OFFSET};
use crate::core::vec3::Vec3;
use crate::game::state::PlayerSlot;

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

/// Map presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum MapKind {
    /// 30×30 grass field
    #[default]
    Green,
    /// 36×22 sand pit
    Desert,
}

impl MapKind {
    /// All presets in menu order.
    pub const ALL: [MapKind; 2] = [MapKind::Green, MapKind::Desert];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            MapKind::Green => "Green",
            MapKind::Desert => "Desert",
        }
    }

    /// Parse a preset name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Next preset in menu order, clamped at the end.
    pub fn next(self) -> Self {
        match self {
            MapKind::Green => MapKind::Desert,
            MapKind::Desert => MapKind::Desert,
        }
    }

    /// Previous preset in menu order, clamped at the start.
    pub fn previous(self) -> Self {
        match self {
            MapKind::Green => MapKind::Green,
            MapKind::Desert => MapKind::Green,
        }
    }
}

/// Legal play area for one arena session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Which preset this was built from
    pub kind: MapKind,
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    /// Ground color (RGBA) for the renderer
    pub ground_color: [u8; 4],
    /// Obstacle boxes (descriptive only)
    pub obstacles: Vec<Aabb>,
}

impl ArenaBounds {
    /// Build the arena for a preset.
    pub fn for_map(kind: MapKind) -> Self {
        match kind {
            MapKind::Green => Self {
                kind,
                width: 30.0,
                depth: 30.0,
                ground_color: [0, 117, 44, 255],
                obstacles: vec![
                    Aabb::new(Vec3::new(-0.75, 0.0, -0.75), Vec3::new(0.75, 1.5, 0.75)),
                    Aabb::new(Vec3::new(-6.5, 0.0, 2.5), Vec3::new(-5.5, 1.0, 5.5)),
                    Aabb::new(Vec3::new(5.5, 0.0, -5.5), Vec3::new(6.5, 1.0, -2.5)),
                ],
            },
            MapKind::Desert => Self {
                kind,
                width: 36.0,
                depth: 22.0,
                ground_color: [200, 180, 120, 255],
                obstacles: vec![
                    Aabb::new(Vec3::new(-2.5, 0.0, -1.0), Vec3::new(2.5, 1.2, 1.0)),
                    Aabb::new(Vec3::new(-12.0, 0.0, -9.0), Vec3::new(-9.0, 1.0, -6.0)),
                    Aabb::new(Vec3::new(9.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 9.0)),
                ],
            },
        }
    }

    /// Plain rectangle with no obstacles.
    pub fn open(width: f32, depth: f32) -> Self {
        Self {
            kind: MapKind::Green,
            width,
            depth,
            ground_color: [0, 117, 44, 255],
            obstacles: Vec::new(),
        }
    }

    /// Half extents of the walkable rectangle (margin applied).
    ///
    /// Never negative or NaN, so an unvalidated arena collapses to a point
    /// instead of breaking the clamp.
    #[inline]
    pub fn walkable_half_extents(&self) -> (f32, f32) {
        (
            (self.width * 0.5 - ARENA_MARGIN).max(0.0),
            (self.depth * 0.5 - ARENA_MARGIN).max(0.0),
        )
    }

    /// Clamp a ground position into the walkable rectangle.
    ///
    /// Height is left untouched.
    #[inline]
    pub fn clamp_position(&self, position: Vec3) -> Vec3 {
        let (hw, hd) = self.walkable_half_extents();
        Vec3 {
            x: position.x.clamp(-hw, hw),
            y: position.y,
            z: position.z.clamp(-hd, hd),
        }
    }

    /// Check if a ground position is inside the walkable rectangle.
    pub fn contains(&self, position: Vec3) -> bool {
        let (hw, hd) = self.walkable_half_extents();
        position.x >= -hw && position.x <= hw && position.z >= -hd && position.z <= hd
    }

    /// Spawn point for a player slot (symmetric along X).
    pub fn spawn_point(&self, slot: PlayerSlot) -> Vec3 {
        let (hw, _) = self.walkable_half_extents();
        let offset = SPAWN_OFFSET.min(hw);
        match slot {
            PlayerSlot::First => Vec3::ground(-offset, 0.0),
            PlayerSlot::Second => Vec3::ground(offset, 0.0),
        }
    }

    /// Check extents and obstacles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_extent = 2.0 * ARENA_MARGIN;
        let valid = |v: f32| v.is_finite() && v >= min_extent;
        if !valid(self.width) || !valid(self.depth) {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                depth: self.depth,
                min: min_extent,
            });
        }

        let hw = self.width * 0.5;
        let hd = self.depth * 0.5;
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let inside = obstacle.min.x >= -hw
                && obstacle.max.x <= hw
                && obstacle.min.z >= -hd
                && obstacle.max.z <= hd;
            if !obstacle.is_well_formed() || !inside {
                return Err(ConfigError::InvalidObstacle { index });
            }
        }

        Ok(())
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::for_map(MapKind::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
