//! Input Capture and Normalization
//!
//! The host owns the devices; the simulation sees them through the
//! `InputSnapshot` trait and reduces them to one `InputFrame` per player.
//!
//! A frame is sampled once per wall-clock frame and reused for every fixed
//! step that frame runs. When the loop catches up several steps, they all
//! see the same (possibly stale) input, including the same pressed edges.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::core::vec3::Vec3;
use crate::game::camera::{LookState, ViewMode};
use crate::game::state::PlayerSlot;

// =============================================================================
// DEVICE ABSTRACTION
// =============================================================================

/// Physical keys and buttons the simulation cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    /// W
    W,
    /// A
    A,
    /// S
    S,
    /// D
    D,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Right control
    RightControl,
    /// Space bar
    Space,
    /// Enter / return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// V
    V,
    /// Primary mouse button
    MouseLeft,
}

/// Read-only view of device state for one frame.
pub trait InputSnapshot {
    /// Key is currently held.
    fn is_down(&self, key: Key) -> bool;

    /// Key went down since the previous frame.
    fn is_pressed(&self, key: Key) -> bool;

    /// Pointer movement since the previous frame, in pixels.
    fn pointer_delta(&self) -> (f32, f32);
}

/// Plain in-memory snapshot.
///
/// Used by the headless binary and by tests; a windowed host would
/// implement `InputSnapshot` directly over its polling API.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyState {
    down: BTreeSet<Key>,
    pressed: BTreeSet<Key>,
    pointer: (f32, f32),
}

impl KeyState {
    /// Empty snapshot (nothing held, no pointer motion).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held.
    pub fn hold(mut self, key: Key) -> Self {
        self.down.insert(key);
        self
    }

    /// Mark a key as pressed this frame (implies held).
    pub fn press(mut self, key: Key) -> Self {
        self.down.insert(key);
        self.pressed.insert(key);
        self
    }

    /// Set pointer motion.
    pub fn pointer(mut self, dx: f32, dy: f32) -> Self {
        self.pointer = (dx, dy);
        self
    }

    /// Forget this frame's edges and pointer motion, keeping held keys.
    pub fn next_frame(&mut self) {
        self.pressed.clear();
        self.pointer = (0.0, 0.0);
    }

    /// Release a held key.
    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
        self.pressed.remove(&key);
    }
}

impl InputSnapshot for KeyState {
    fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn pointer_delta(&self) -> (f32, f32) {
        self.pointer
    }
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Per-player intent for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0-3: forward / back / left / right held
    /// - Bit 4: sprint held
    /// - Bit 5: jump pressed this frame
    /// - Bit 6: attack pressed this frame
    pub flags: u8,
}

impl InputFrame {
    /// Forward flag bit
    pub const FLAG_FORWARD: u8 = 0x01;
    /// Back flag bit
    pub const FLAG_BACK: u8 = 0x02;
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x04;
    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x08;
    /// Sprint flag bit
    pub const FLAG_SPRINT: u8 = 0x10;
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x20;
    /// Attack flag bit
    pub const FLAG_ATTACK: u8 = 0x40;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flags.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Builder form of `set(flag, true)`.
    #[inline]
    pub const fn with(self, flag: u8) -> Self {
        Self { flags: self.flags | flag }
    }

    #[inline]
    fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Sprint modifier held.
    #[inline]
    pub fn sprint_held(&self) -> bool {
        self.has(Self::FLAG_SPRINT)
    }

    /// Jump pressed this frame.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.has(Self::FLAG_JUMP)
    }

    /// Attack pressed this frame.
    #[inline]
    pub fn attack_pressed(&self) -> bool {
        self.has(Self::FLAG_ATTACK)
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Unit movement direction on the ground plane in the given basis.
    ///
    /// Opposite keys cancel; diagonals are normalized so they are not faster.
    pub fn direction(&self, basis: MovementBasis) -> Vec3 {
        let axis = |pos: u8, neg: u8| -> f32 {
            (self.has(pos) as i8 - self.has(neg) as i8) as f32
        };
        let forward_amount = axis(Self::FLAG_FORWARD, Self::FLAG_BACK);
        let right_amount = axis(Self::FLAG_RIGHT, Self::FLAG_LEFT);
        if forward_amount == 0.0 && right_amount == 0.0 {
            return Vec3::ZERO;
        }

        let (forward, right) = basis.axes();
        (forward * forward_amount + right * right_amount).normalize()
    }
}

// =============================================================================
// MOVEMENT BASIS
// =============================================================================

/// Frame of reference for directional keys.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[derive(Default)]
pub enum MovementBasis {
    /// Forward is -Z, right is +X
    #[default]
    Cardinal,
    /// Forward follows the first-person look yaw
    Look {
        /// Look yaw in radians
        yaw: f32,
    },
}

impl MovementBasis {
    /// Basis a player moves in for the current view mode.
    ///
    /// Only the first player in first-person steers relative to the camera.
    pub fn for_player(slot: PlayerSlot, mode: ViewMode, look: &LookState) -> Self {
        match (slot, mode) {
            (PlayerSlot::First, ViewMode::FirstPerson) => MovementBasis::Look { yaw: look.yaw },
            _ => MovementBasis::Cardinal,
        }
    }

    /// (forward, right) unit vectors on the ground plane.
    pub fn axes(self) -> (Vec3, Vec3) {
        match self {
            MovementBasis::Cardinal => (Vec3::FORWARD, Vec3::RIGHT),
            MovementBasis::Look { yaw } => {
                let forward = Vec3::from_yaw(yaw);
                let right = Vec3::ground(-forward.z, forward.x);
                (forward, right)
            }
        }
    }

    /// Facing imposed by the camera, if any.
    pub fn facing_override(self) -> Option<f32> {
        match self {
            MovementBasis::Cardinal => None,
            MovementBasis::Look { yaw } => Some(yaw),
        }
    }
}

/// Everything one fixed step consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    /// Intent per player, indexed by `PlayerSlot::index`
    pub frames: [InputFrame; 2],
    /// Movement basis per player
    pub bases: [MovementBasis; 2],
}

impl StepInput {
    /// Both players idle, cardinal basis.
    pub const fn idle() -> Self {
        Self {
            frames: [InputFrame::new(), InputFrame::new()],
            bases: [MovementBasis::Cardinal, MovementBasis::Cardinal],
        }
    }

    /// Cardinal basis for both players.
    pub const fn cardinal(first: InputFrame, second: InputFrame) -> Self {
        Self {
            frames: [first, second],
            bases: [MovementBasis::Cardinal, MovementBasis::Cardinal],
        }
    }

    /// Input frame for a player.
    #[inline]
    pub fn frame(&self, slot: PlayerSlot) -> InputFrame {
        self.frames[slot.index()]
    }

    /// Movement basis for a player.
    #[inline]
    pub fn basis(&self, slot: PlayerSlot) -> MovementBasis {
        self.bases[slot.index()]
    }
}

// =============================================================================
// KEY BINDINGS
// =============================================================================

/// Keys driving one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBindings {
    /// Move forward
    pub forward: Key,
    /// Move back
    pub back: Key,
    /// Strafe left
    pub left: Key,
    /// Strafe right
    pub right: Key,
    /// Sprint modifier
    pub sprint: Key,
    /// Jump
    pub jump: Key,
    /// Attack trigger
    pub attack: Key,
}

impl PlayerBindings {
    /// WASD, shift, space, primary mouse button.
    pub const fn first() -> Self {
        Self {
            forward: Key::W,
            back: Key::S,
            left: Key::A,
            right: Key::D,
            sprint: Key::LeftShift,
            jump: Key::Space,
            attack: Key::MouseLeft,
        }
    }

    /// Arrow cluster, right shift (doubles as jump), right control.
    pub const fn second() -> Self {
        Self {
            forward: Key::Up,
            back: Key::Down,
            left: Key::Left,
            right: Key::Right,
            sprint: Key::RightShift,
            jump: Key::RightShift,
            attack: Key::RightControl,
        }
    }

    /// Default bindings for a slot.
    pub const fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::First => Self::first(),
            PlayerSlot::Second => Self::second(),
        }
    }

    /// Reduce device state to an input frame.
    pub fn sample(&self, input: &dyn InputSnapshot) -> InputFrame {
        let mut frame = InputFrame::new();
        frame.set(InputFrame::FLAG_FORWARD, input.is_down(self.forward));
        frame.set(InputFrame::FLAG_BACK, input.is_down(self.back));
        frame.set(InputFrame::FLAG_LEFT, input.is_down(self.left));
        frame.set(InputFrame::FLAG_RIGHT, input.is_down(self.right));
        frame.set(InputFrame::FLAG_SPRINT, input.is_down(self.sprint));
        frame.set(InputFrame::FLAG_JUMP, input.is_pressed(self.jump));
        frame.set(InputFrame::FLAG_ATTACK, input.is_pressed(self.attack));
        frame
    }
}

// =============================================================================
// TESTS
// =============================================================================
