//! Fixed Simulation Step
//!
//! Advances the arena by exactly one step of `dt` seconds. Given the same
//! state, input and tuning it always produces the same result; nothing here
//! reads a clock or a device.
//!
//! Each player is processed in slot order, in phases:
//!
//! 1. horizontal movement and facing
//! 2. jump, gravity and ground contact
//! 3. clamp to the walkable area
//! 4. cooldown, attack trigger and attack window (see `combat`)

#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::config::CombatTuning;
use crate::core::vec3::Vec3;
use crate::game::arena::ArenaBounds;
use crate::game::combat::update_attack;
use crate::game::events::CombatEvent;
use crate::game::input::{InputFrame, MovementBasis, StepInput};
use crate::game::state::{ArenaState, PlayerSlot, PlayerState};

/// Result of a step.
#[derive(Debug, Default)]
pub struct StepResult {
    /// Events generated this step
    pub events: Vec<CombatEvent>,
    /// A player with no health left after this step
    pub knocked_out: Option<PlayerSlot>,
}

/// Run one simulation step.
///
/// # Arguments
///
/// * `state` - The arena state (will be mutated)
/// * `input` - Input frames and movement bases for both players
/// * `tuning` - Movement and combat constants
/// * `dt` - Step length in seconds
pub fn step(state: &mut ArenaState, input: &StepInput, tuning: &CombatTuning, dt: f32) -> StepResult {
    // 0. Advance tick counter
    state.tick += 1;
    let tick = state.tick;

    // Attacks measure against where the opponent stood when the step began.
    let start_positions = [state.players[0].position, state.players[1].position];

    let ArenaState {
        arena,
        players,
        pending_events,
        ..
    } = state;

    for slot in PlayerSlot::ALL {
        let frame = input.frame(slot);

        {
            let player = &mut players[slot.index()];

            // 1. Movement
            apply_movement(player, frame, input.basis(slot), tuning, dt);

            // 2. Vertical physics
            let vertical = apply_vertical(player, frame, tuning, dt);
            if vertical.jumped {
                pending_events.push(CombatEvent::jumped(tick, slot, tuning.jump_velocity));
            }
            if vertical.landed {
                pending_events.push(CombatEvent::landed(tick, slot));
            }

            // 3. Bounds
            clamp_to_arena(player, arena);
        }

        // 4. Combat
        update_attack(players, slot, frame, &start_positions, tuning, dt, tick, pending_events);

        #[cfg(feature = "debug-tracing")]
        {
            let p = &players[slot.index()];
            trace!(
                tick,
                ?slot,
                x = p.position.x,
                y = p.position.y,
                z = p.position.z,
                health = p.health,
                "step"
            );
        }
    }

    StepResult {
        events: state.take_events(),
        knocked_out: state.knocked_out(),
    }
}

/// Move along the ground and update facing.
///
/// A camera-driven basis forces the facing to the look yaw; otherwise the
/// player turns toward any nonzero movement and keeps its facing when idle.
pub fn apply_movement(
    player: &mut PlayerState,
    frame: InputFrame,
    basis: MovementBasis,
    tuning: &CombatTuning,
    dt: f32,
) {
    let direction = frame.direction(basis);
    let speed = if frame.sprint_held() {
        tuning.move_speed * tuning.sprint_multiplier
    } else {
        tuning.move_speed
    };

    if direction != Vec3::ZERO {
        player.position = player.position + direction * (speed * dt);
    }

    if let Some(yaw) = basis.facing_override() {
        player.facing_angle = yaw;
    } else if direction != Vec3::ZERO {
        player.facing_angle = direction.yaw();
    }
}

/// What happened vertically during a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalOutcome {
    /// Left the ground this step
    pub jumped: bool,
    /// Was airborne and touched down this step
    pub landed: bool,
}

/// Jump, gravity and ground contact.
///
/// A jump only starts from the ground. Gravity applies in the same step
/// as the launch.
pub fn apply_vertical(
    player: &mut PlayerState,
    frame: InputFrame,
    tuning: &CombatTuning,
    dt: f32,
) -> VerticalOutcome {
    let mut outcome = VerticalOutcome::default();
    let was_airborne = !player.is_grounded();

    if !was_airborne {
        player.position.y = 0.0;
        if frame.jump_pressed() {
            player.vertical_velocity = tuning.jump_velocity;
            outcome.jumped = true;
        }
    }

    player.vertical_velocity -= tuning.gravity * dt;
    player.position.y += player.vertical_velocity * dt;

    if player.position.y <= 0.0 {
        player.position.y = 0.0;
        player.vertical_velocity = 0.0;
        outcome.landed = was_airborne;
    }

    outcome
}

/// Keep the player inside the walkable area. Height is not affected.
#[inline]
pub fn clamp_to_arena(player: &mut PlayerState, arena: &ArenaBounds) {
    player.position = arena.clamp_position(player.position);
}
