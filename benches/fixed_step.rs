//! Step throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use epic_battle::{
    ArenaSession, ArenaState, CharacterId, CombatTuning, InputFrame, SimConfig, StepInput, Vec3,
    core::constants::FIXED_DT,
    game::{arena::ArenaBounds, tick::step},
};

fn duel_state() -> ArenaState {
    let mut state = ArenaState::new(
        ArenaBounds::default(),
        [CharacterId(0), CharacterId(1)],
        &CombatTuning::default(),
    );
    state.players[0].position = Vec3::ground(-1.0, 0.0);
    state.players[1].position = Vec3::ground(1.0, 0.0);
    state
}

fn bench_step(c: &mut Criterion) {
    let tuning = CombatTuning::default();
    let input = StepInput::cardinal(
        InputFrame::new()
            .with(InputFrame::FLAG_FORWARD)
            .with(InputFrame::FLAG_RIGHT)
            .with(InputFrame::FLAG_ATTACK),
        InputFrame::new()
            .with(InputFrame::FLAG_BACK)
            .with(InputFrame::FLAG_SPRINT)
            .with(InputFrame::FLAG_JUMP),
    );

    c.bench_function("step_1000", |b| {
        b.iter(|| {
            let mut state = duel_state();
            for _ in 0..1_000 {
                black_box(step(&mut state, black_box(&input), &tuning, FIXED_DT));
            }
            state.tick
        })
    });
}

fn bench_session_frame(c: &mut Criterion) {
    let config = SimConfig::default();
    let walk = InputFrame::new().with(InputFrame::FLAG_FORWARD);

    c.bench_function("session_advance_30hz", |b| {
        let mut session = ArenaSession::new(
            &config,
            ArenaBounds::for_map(config.map),
            [CharacterId(0), CharacterId(1)],
        )
        .expect("preset arena");
        b.iter(|| black_box(session.advance(black_box(1.0 / 30.0), [walk, walk])).steps)
    });
}

fn bench_hash(c: &mut Criterion) {
    let state = duel_state();
    c.bench_function("compute_hash", |b| b.iter(|| black_box(&state).compute_hash()));
}

criterion_group!(benches, bench_step, bench_session_frame, bench_hash);
criterion_main!(benches);
