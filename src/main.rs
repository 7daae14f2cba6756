//! Glitch Flap headless runner
//!
//! Drives the simulation with a fixed 60 Hz frame clock and a simple
//! autopilot standing in for the player, restarting after each crash until
//! the configured demo time is used up. Prints the last snapshot as JSON.
//!
//! Usage: `glitch-flap [mode] [seed] [seconds]`

use glitch_flap::sim::{ControlInversion, Snapshot, TickInput, reset, tick};
use glitch_flap::consts::FRAMES_PER_SEC;
use glitch_flap::{Assist, DeathStreak, GameMode, Settings};

const FRAME_DT: f32 = 1.0 / FRAMES_PER_SEC;

/// Pick the input for the next frame from what the renderer would see
fn autopilot(snapshot: &Snapshot, holding: bool) -> TickInput {
    let bird_mid = snapshot.bird.pos.y + snapshot.bird.size.y / 2.0;
    // Aim a little below the center of the next gap ahead
    let target = snapshot
        .pipes
        .iter()
        .find(|p| !p.scored && !p.is_ghost)
        .map(|p| p.gap_center + 10.0)
        .unwrap_or(300.0);
    let low = bird_mid > target;

    match snapshot.inversion {
        ControlInversion::Active { .. } => {
            // Hold sinks, release floats: hold while too high
            let want_hold = !low;
            TickInput {
                flap_pressed: false,
                hold_active: want_hold && !holding,
                hold_released: !want_hold && holding,
            }
        }
        _ => TickInput {
            flap_pressed: low && snapshot.bird.vel.y > 0.0,
            hold_active: false,
            hold_released: holding,
        },
    }
}

fn parse_args() -> Settings {
    let mut settings = Settings::default();
    let mut args = std::env::args().skip(1);
    if let Some(mode) = args.next() {
        match GameMode::from_str(&mode) {
            Some(mode) => settings.mode = mode,
            None => log::warn!("Unknown mode '{}', using {}", mode, settings.mode.as_str()),
        }
    }
    if let Some(seed) = args.next() {
        match seed.parse() {
            Ok(seed) => settings.seed = seed,
            Err(_) => log::warn!("Bad seed '{}', using {}", seed, settings.seed),
        }
    }
    if let Some(secs) = args.next() {
        match secs.parse() {
            Ok(secs) => settings.demo_seconds = secs,
            Err(_) => log::warn!("Bad duration '{}', using {}", secs, settings.demo_seconds),
        }
    }
    settings
}

fn main() {
    env_logger::init();
    let settings = parse_args();
    log::info!(
        "Glitch Flap (headless) mode={} seed={} for {}s",
        settings.mode.as_str(),
        settings.seed,
        settings.demo_seconds
    );

    let mut streak = DeathStreak::new();
    let mut seed = settings.seed;
    let mut state = reset(settings.profile(), seed);
    let mut best = 0;
    let frames = (settings.demo_seconds.max(0.0) * FRAMES_PER_SEC).round() as u64;

    for _ in 0..frames {
        if state.is_game_over() {
            best = best.max(state.score);
            let level = streak.record_run(state.survival_time);
            seed = seed.wrapping_add(1);
            let assist = if settings.adaptive_difficulty {
                level.multipliers()
            } else {
                Assist::NONE
            };
            state = reset(settings.profile(), seed).with_assist(assist);
        }
        let input = autopilot(&state.snapshot(), state.controls.holding);
        tick(&mut state, &input, FRAME_DT);
    }
    best = best.max(state.score);

    log::info!("Best score {}", best);
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}
