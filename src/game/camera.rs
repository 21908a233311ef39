//! Camera Controller
//!
//! Derives the view transform from the first player's state. Reads the
//! simulation, never writes it. The only mutable state is the first-person
//! look accumulator, which the frame driver owns.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    EYE_HEIGHT, PITCH_LIMIT, THIRD_PERSON_DISTANCE, THIRD_PERSON_HEIGHT,
    THIRD_PERSON_TARGET_HEIGHT,
};
use crate::core::vec3::Vec3;
use crate::game::state::PlayerState;

/// Camera mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum ViewMode {
    /// Eye-level camera steered by the pointer
    FirstPerson,
    /// Chase camera behind the player
    #[default]
    ThirdPerson,
}

impl ViewMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
        }
    }

    /// Crosshair is drawn only in first-person.
    pub fn shows_crosshair(self) -> bool {
        self == ViewMode::FirstPerson
    }
}

/// First-person yaw/pitch accumulator.
///
/// Survives mode switches; pitch is ignored in third-person.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookState {
    /// Yaw in radians (0 = +Z)
    pub yaw: f32,
    /// Pitch in radians, clamped to ±PITCH_LIMIT
    pub pitch: f32,
}

impl LookState {
    /// Apply pointer motion.
    ///
    /// Moving right turns right, moving up looks up.
    pub fn apply_pointer(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit look direction.
    pub fn direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }
}

/// Viewing transform handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    /// Eye position
    pub position: Vec3,
    /// Point looked at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
}

/// Compute the camera for a player.
///
/// Third-person depends only on position and facing; first-person only on
/// position and the look accumulator.
pub fn camera_transform(
    player: &PlayerState,
    mode: ViewMode,
    look: &LookState,
    fov_y: f32,
) -> CameraTransform {
    match mode {
        ViewMode::FirstPerson => {
            let eye = player.position + Vec3::UP * EYE_HEIGHT;
            CameraTransform {
                position: eye,
                target: eye + look.direction(),
                up: Vec3::UP,
                fov_y,
            }
        }
        ViewMode::ThirdPerson => {
            let target = player.position + Vec3::UP * THIRD_PERSON_TARGET_HEIGHT;
            let behind = Vec3::from_yaw(player.facing_angle) * -THIRD_PERSON_DISTANCE;
            CameraTransform {
                position: target + behind + Vec3::UP * THIRD_PERSON_HEIGHT,
                target,
                up: Vec3::UP,
                fov_y,
            }
        }
    }
}
