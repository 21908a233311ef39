//! Attack Resolution
//!
//! Cooldown gating, the attack window and instant range-checked damage.
//! A strike always measures against the victim's position from the start
//! of the step, so processing order between the two players does not
//! change who gets hit.

use tracing::{debug, info};

use crate::config::CombatTuning;
use crate::core::vec3::Vec3;
use crate::game::events::CombatEvent;
use crate::game::input::InputFrame;
use crate::game::state::{PlayerSlot, PlayerState};

/// Result of a triggered attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrikeOutcome {
    /// Victim was in range and lost health
    Hit {
        /// Health removed
        damage: u32,
        /// Victim health afterwards
        health_after: u32,
    },
    /// Victim was out of range
    Miss,
}

/// Borrow the acting player and the opponent mutably at the same time.
pub fn pair_mut(
    players: &mut [PlayerState; 2],
    slot: PlayerSlot,
) -> (&mut PlayerState, &mut PlayerState) {
    let (first, second) = players.split_at_mut(1);
    match slot {
        PlayerSlot::First => (&mut first[0], &mut second[0]),
        PlayerSlot::Second => (&mut second[0], &mut first[0]),
    }
}

/// Check if an attack from `from` reaches `to`.
#[inline]
pub fn in_range(from: Vec3, to: Vec3, range: f32) -> bool {
    from.distance(to) <= range
}

/// Apply one strike. Health floors at zero.
pub fn resolve_strike(
    attacker_position: Vec3,
    victim_position: Vec3,
    victim: &mut PlayerState,
    tuning: &CombatTuning,
) -> StrikeOutcome {
    if !in_range(attacker_position, victim_position, tuning.attack_range) {
        return StrikeOutcome::Miss;
    }
    let health_after = victim.apply_damage(tuning.attack_damage);
    StrikeOutcome::Hit {
        damage: tuning.attack_damage,
        health_after,
    }
}

/// Run the attack phases of a step for one player.
///
/// 1. Cooldown decays.
/// 2. A newly pressed attack starts only when the cooldown is zero; it
///    opens the window, restarts the cooldown and strikes immediately.
/// 3. An already-open window decays. A window opened in this step keeps
///    its full length until the next step.
#[allow(clippy::too_many_arguments)]
pub fn update_attack(
    players: &mut [PlayerState; 2],
    slot: PlayerSlot,
    frame: InputFrame,
    start_positions: &[Vec3; 2],
    tuning: &CombatTuning,
    dt: f32,
    tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    let (attacker, victim) = pair_mut(players, slot);

    attacker.decay_cooldown(dt);

    let triggered = frame.attack_pressed() && attacker.attack_ready();
    if !triggered {
        attacker.decay_attack_window(dt);
        return;
    }

    attacker.attacking = true;
    attacker.attack_timer = tuning.attack_window;
    attacker.attack_cooldown = tuning.attack_cooldown;
    events.push(CombatEvent::attack_started(tick, slot));

    let victim_slot = slot.opponent();
    let victim_position = start_positions[victim_slot.index()];
    let distance = attacker.position.distance(victim_position);
    let health_before = victim.health;

    match resolve_strike(attacker.position, victim_position, victim, tuning) {
        StrikeOutcome::Hit { damage, health_after } => {
            debug!(tick, ?slot, distance, health_after, "attack hit");
            events.push(CombatEvent::hit(tick, slot, victim_slot, damage, health_after, distance));
            if health_before > 0 && health_after == 0 {
                info!(tick, victim = ?victim_slot, by = ?slot, "player knocked out");
                events.push(CombatEvent::knocked_out(tick, victim_slot, slot));
            }
        }
        StrikeOutcome::Miss => {
            debug!(tick, ?slot, distance, "attack missed");
            events.push(CombatEvent::missed(tick, slot, distance));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::FIXED_DT;
    use crate::game::events::CombatEventData;
    use crate::game::state::CharacterId;

    fn duel(attacker_at: Vec3, victim_at: Vec3) -> [PlayerState; 2] {
        [
            PlayerState::new(PlayerSlot::First, CharacterId(0), attacker_at),
            PlayerState::new(PlayerSlot::Second, CharacterId(1), victim_at),
        ]
    }

    fn attack() -> InputFrame {
        InputFrame::new().with(InputFrame::FLAG_ATTACK)
    }

    fn run(players: &mut [PlayerState; 2], slot: PlayerSlot, frame: InputFrame) -> Vec<CombatEvent> {
        let start = [players[0].position, players[1].position];
        let mut events = Vec::new();
        update_attack(players, slot, frame, &start, &CombatTuning::default(), FIXED_DT, 1, &mut events);
        events
    }

    #[test]
    fn test_pair_mut_orders_by_slot() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(1.0, 0.0));
        let (a, b) = pair_mut(&mut players, PlayerSlot::Second);
        assert_eq!(a.slot, PlayerSlot::Second);
        assert_eq!(b.slot, PlayerSlot::First);
    }

    #[test]
    fn test_hit_in_range() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(2.0, 0.0));
        let events = run(&mut players, PlayerSlot::First, attack());

        assert_eq!(players[1].health, 90);
        assert!(players[0].attacking);
        assert_eq!(players[0].attack_timer, 0.2);
        assert_eq!(players[0].attack_cooldown, 0.6);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, CombatEventData::AttackStarted);
        assert!(events[1].is_hit());
    }

    #[test]
    fn test_miss_out_of_range() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(3.0, 0.0));
        let events = run(&mut players, PlayerSlot::First, attack());

        assert_eq!(players[1].health, 100);
        assert!(players[0].attacking);
        assert!(matches!(events[1].data, CombatEventData::Missed { distance } if distance == 3.0));
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(0.0, 2.5));
        run(&mut players, PlayerSlot::First, attack());
        assert_eq!(players[1].health, 90);
    }

    #[test]
    fn test_height_counts_toward_distance() {
        let mut players = duel(Vec3::new(0.0, 2.0, 0.0), Vec3::ground(2.0, 0.0));
        run(&mut players, PlayerSlot::First, attack());
        assert_eq!(players[1].health, 100);
    }

    #[test]
    fn test_cooldown_rejects_trigger() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(1.0, 0.0));
        players[0].attack_cooldown = 0.3;
        let events = run(&mut players, PlayerSlot::First, attack());

        assert!(events.is_empty());
        assert!(!players[0].attacking);
        assert!(players[0].attack_cooldown < 0.3);
        assert_eq!(players[1].health, 100);
    }

    #[test]
    fn test_victim_position_from_step_start() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(2.0, 0.0));
        let start = [players[0].position, players[1].position];
        // Victim moved away mid-step; the strike still uses the start position.
        players[1].position = Vec3::ground(10.0, 0.0);
        let mut events = Vec::new();
        update_attack(
            &mut players,
            PlayerSlot::First,
            attack(),
            &start,
            &CombatTuning::default(),
            FIXED_DT,
            1,
            &mut events,
        );
        assert_eq!(players[1].health, 90);
    }

    #[test]
    fn test_knockout_event_once() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(1.0, 0.0));
        players[1].health = 10;
        let events = run(&mut players, PlayerSlot::First, attack());
        assert_eq!(players[1].health, 0);
        assert!(events.iter().any(|e| matches!(e.data, CombatEventData::KnockedOut { .. })));

        players[0].attack_cooldown = 0.0;
        let events = run(&mut players, PlayerSlot::First, attack());
        assert_eq!(players[1].health, 0);
        assert!(!events.iter().any(|e| matches!(e.data, CombatEventData::KnockedOut { .. })));
    }

    #[test]
    fn test_window_closes_after_twelve_steps() {
        let mut players = duel(Vec3::ZERO, Vec3::ground(5.0, 0.0));
        run(&mut players, PlayerSlot::First, attack());
        for _ in 0..11 {
            run(&mut players, PlayerSlot::First, InputFrame::new());
            assert!(players[0].attacking);
        }
        run(&mut players, PlayerSlot::First, InputFrame::new());
        assert!(!players[0].attacking);
    }
}
