//! Epic Battle headless driver
//!
//! Plays a scripted match through the same frame API a windowed host
//! would use, at an uneven frame rate with one long stall, then replays
//! the recorded inputs and checks the final state hash.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use epic_battle::{
    AppState, Game, Key, KeyState, SimConfig, TICK_RATE, VERSION,
    app::TrackingCatalog,
    game::{
        events::CombatEventData,
        replay::replay,
        state::ArenaState,
    },
};

/// Scripted frames in the arena.
const DEMO_FRAMES: u32 = 900;

/// Frame on which the host "stalls" for a second.
const STALL_FRAME: u32 = 300;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Epic Battle v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = SimConfig::from_env().context("invalid configuration from environment")?;
    info!(
        map = config.map.name(),
        max_steps_per_call = ?config.max_steps_per_call,
        "configuration loaded"
    );

    demo_match(config)
}

/// Frame time for a scripted frame: alternating 144 Hz, 60 Hz and 30 Hz
/// with one long stall.
fn frame_time(frame: u32) -> f64 {
    if frame == STALL_FRAME {
        return 1.0;
    }
    match frame % 3 {
        0 => 1.0 / 144.0,
        1 => 1.0 / 60.0,
        _ => 1.0 / 30.0,
    }
}

/// Keys held by the script on a given frame.
fn scripted_keys(frame: u32) -> KeyState {
    let mut keys = KeyState::new();

    // First player closes in, then circles.
    keys = match frame {
        0..=119 => keys.hold(Key::D),
        120..=479 => keys.hold(Key::W).hold(Key::D),
        _ => keys.hold(Key::S).hold(Key::A),
    };
    if frame % 20 == 0 {
        keys = keys.press(Key::MouseLeft);
    }

    // Second player approaches and jumps now and then.
    keys = keys.hold(Key::Left);
    if frame % 90 == 45 {
        keys = keys.press(Key::RightShift);
    }
    if frame % 25 == 10 {
        keys = keys.press(Key::RightControl);
    }
    if frame == 600 {
        keys = keys.press(Key::V);
    }
    keys.pointer(if frame >= 600 { 2.0 } else { 0.0 }, 0.0)
}

fn demo_match(config: SimConfig) -> Result<()> {
    info!("=== Starting Demo Match ===");

    let mut game = Game::new(config, TrackingCatalog::new()).with_recording();

    // Menu -> map select -> both character selects -> arena. The second
    // player moves their cursor to the other character.
    let menu_script = [
        KeyState::new().press(Key::Enter),
        KeyState::new().press(Key::Enter),
        KeyState::new().press(Key::Enter),
        KeyState::new().press(Key::Right),
        KeyState::new().press(Key::Enter),
    ];
    for keys in &menu_script {
        game.frame(keys, 1.0 / 60.0);
    }
    if game.state() != AppState::Arena {
        bail!("menu script ended in {} instead of the arena", game.state());
    }

    let initial: ArenaState = game
        .session()
        .map(|s| s.state().clone())
        .context("arena entered without a session")?;

    let mut total_steps = 0u64;
    let mut hits = 0usize;
    for frame in 0..DEMO_FRAMES {
        let view = game.frame(&scripted_keys(frame), frame_time(frame));
        total_steps += u64::from(view.steps);

        for event in &view.events {
            match &event.data {
                CombatEventData::Hit { victim, health_after, distance, .. } => {
                    hits += 1;
                    info!(
                        "Tick {}: {:?} hit {:?} at {:.2} ({} hp left)",
                        event.tick, event.slot, victim, distance, health_after
                    );
                }
                CombatEventData::KnockedOut { by } => {
                    info!("Tick {}: {:?} knocked out by {:?}", event.tick, event.slot, by);
                }
                _ => {}
            }
        }

        if frame % 300 == 0 {
            if let Some(players) = &view.players {
                info!(
                    "Frame {}: health {} / {}, distance {:.2}",
                    frame,
                    players[0].health,
                    players[1].health,
                    players[0].position.distance(players[1].position)
                );
            }
        }
    }

    let session = game.session().context("session ended unexpectedly")?;
    let final_state = session.state();

    // Print final results
    info!("=== Match Results ===");
    info!("Steps simulated: {} (tick {})", total_steps, final_state.tick);
    info!("Hits landed: {}", hits);
    let hash = final_state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let recording = session.recording().context("session was not recorded")?;
    info!("Recorded {} input changes", recording.delta_count());
    let (replayed, _) = replay(initial, recording, session.tuning(), session.dt());
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    let view = game.frame(&KeyState::new(), 0.0);
    println!("{}", serde_json::to_string_pretty(&view)?);

    game.request_exit();
    info!(
        "Exited; assets released {} time(s)",
        game.assets().release_count()
    );

    Ok(())
}
