//! Property tests for the simulation invariants.

use proptest::prelude::*;

use epic_battle::{
    ArenaState, CharacterId, CombatTuning, InputFrame, StepInput, Vec3,
    core::constants::{FIXED_DT, FIXED_STEP_SECS as DT, MAX_HEALTH},
    game::{
        arena::{ArenaBounds, MapKind},
        camera::{camera_transform, LookState, ViewMode},
        clock::SimulationClock,
        input::MovementBasis,
        tick::step,
    },
};

fn map_strategy() -> impl Strategy<Value = MapKind> {
    prop_oneof![Just(MapKind::Green), Just(MapKind::Desert)]
}

fn step_input_strategy() -> impl Strategy<Value = StepInput> {
    (any::<u8>(), any::<u8>(), any::<bool>(), -10.0f32..10.0).prop_map(|(a, b, look, yaw)| {
        let first_basis = if look {
            MovementBasis::Look { yaw }
        } else {
            MovementBasis::Cardinal
        };
        StepInput {
            frames: [InputFrame::from_flags(a & 0x7F), InputFrame::from_flags(b & 0x7F)],
            bases: [first_basis, MovementBasis::Cardinal],
        }
    })
}

fn fresh(map: MapKind) -> ArenaState {
    ArenaState::new(
        ArenaBounds::for_map(map),
        [CharacterId(0), CharacterId(1)],
        &CombatTuning::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_health_bounded_and_never_regenerates(
        map in map_strategy(),
        inputs in prop::collection::vec(step_input_strategy(), 1..400),
    ) {
        let tuning = CombatTuning::default();
        let mut state = fresh(map);
        // Start close so attacks actually land.
        state.players[0].position = Vec3::ground(-1.0, 0.0);
        state.players[1].position = Vec3::ground(1.0, 0.0);

        for input in &inputs {
            let before = [state.players[0].health, state.players[1].health];
            step(&mut state, input, &tuning, FIXED_DT);
            for (i, player) in state.players.iter().enumerate() {
                prop_assert!(player.health <= MAX_HEALTH);
                prop_assert!(player.health <= before[i]);
            }
        }
    }

    #[test]
    fn test_position_stays_in_walkable_area(
        map in map_strategy(),
        inputs in prop::collection::vec(step_input_strategy(), 1..600),
    ) {
        let tuning = CombatTuning::default();
        let mut state = fresh(map);

        for input in &inputs {
            step(&mut state, input, &tuning, FIXED_DT);
            for player in &state.players {
                prop_assert!(state.arena.contains(player.position));
                prop_assert!(player.position.y >= 0.0);
            }
        }
    }

    #[test]
    fn test_clock_runs_whole_steps(k in 0u32..60, fraction in 0.0f64..0.99) {
        let mut clock = SimulationClock::new(DT, None);
        let epsilon = fraction * DT;
        let plan = clock.advance(f64::from(k) * DT + epsilon);
        prop_assert_eq!(plan.steps, k);
        prop_assert!((clock.accumulator() - epsilon).abs() < 1e-9);
    }

    #[test]
    fn test_split_elapsed_runs_same_steps(splits in prop::collection::vec(0.0f64..0.1, 1..50)) {
        let total: f64 = splits.iter().sum();
        let mut split_clock = SimulationClock::new(DT, None);
        let split_steps: u32 = splits.iter().map(|&e| split_clock.advance(e).steps).sum();

        let mut whole_clock = SimulationClock::new(DT, None);
        let whole_steps = whole_clock.advance(total).steps;

        // Rounding in the two summation orders may differ by one step
        // right at a boundary.
        prop_assert!(split_steps.abs_diff(whole_steps) <= 1);
    }

    #[test]
    fn test_third_person_camera_is_pure(
        x in -14.0f32..14.0,
        z in -14.0f32..14.0,
        y in 0.0f32..3.0,
        facing in -6.3f32..6.3,
        yaw in -6.3f32..6.3,
        pitch in -1.3f32..1.3,
    ) {
        let mut state = fresh(MapKind::Green);
        let player = &mut state.players[0];
        player.position = Vec3::new(x, y, z);
        player.facing_angle = facing;

        let a = camera_transform(player, ViewMode::ThirdPerson, &LookState::default(), 60.0);
        let b = camera_transform(player, ViewMode::ThirdPerson, &LookState { yaw, pitch }, 60.0);
        prop_assert_eq!(a, b);
        prop_assert!((a.position.y - a.target.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_never_exceeds_limit(deltas in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 1..100)) {
        let mut look = LookState::default();
        for (dx, dy) in deltas {
            look.apply_pointer(dx, dy, 0.01);
            prop_assert!(look.pitch.abs() <= 1.3);
        }
    }
}
