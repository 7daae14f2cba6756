//! Simulation step
//!
//! Advances the game state by one externally clocked frame. The order is
//! fixed: overload gate, slow-motion time scale, survival time and phase,
//! control inversion, gravity/wind, bird, pipes, collisions.

use serde::{Deserialize, Serialize};

use super::bird::{self, ControlState};
use super::collision::{bird_ground_collision, bird_pipe_collision};
use super::events::{ControlInversion, SlowMotion, SystemOverload, is_overload_phase};
use super::phase::{
    GravityCycle, gravity, phase_config, phase_of, phase_start, phase_title, pipe_speed,
    time_in_phase, wind_force,
};
use super::pipes;
use super::state::{PlayStatus, SimulationState};
use crate::consts::*;
use crate::error::{Error, Result};
use crate::mode::ModeProfile;

/// Highest phase `jump_to_phase` accepts
pub const MAX_JUMP_PHASE: i64 = 10_000;

/// Input events for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Flap (ignored while controls are inverted)
    pub flap_pressed: bool,
    /// Input went down and is being held
    pub hold_active: bool,
    /// Held input was let go
    pub hold_released: bool,
}

/// Fresh run for a profile
pub fn reset(profile: ModeProfile, seed: u64) -> SimulationState {
    log::info!("New run: mode {} seed {}", profile.mode.as_str(), seed);
    SimulationState::new(profile, seed)
}

/// Advance the state by one frame of `dt` real seconds
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    if state.status == PlayStatus::GameOver {
        return;
    }
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    state.time_ticks += 1;
    state.gravity_shift = false;

    if input.hold_active {
        state.controls.holding = true;
    }
    if input.hold_released {
        state.controls.holding = false;
    }

    // Overload pauses everything but its own timer
    if state.overload.advance(dt) {
        return;
    }

    let time_scale = state.slow_motion.time_scale();
    state.slow_motion.advance(dt);
    let sim_dt = dt * time_scale;
    let frames = sim_dt * FRAMES_PER_SEC;

    state.advance_clock(sim_dt);
    let phase = phase_of(state.survival_time);
    if phase > state.phase {
        enter_phase(state, phase);
        if state.overload.is_frozen() {
            return;
        }
    }

    let phase = state.phase;
    let now = state.survival_time;
    let config = phase_config(phase);
    let profile = state.profile;

    state
        .inversion
        .update(&config, time_in_phase(now), sim_dt, &profile, &mut state.rng);

    let reading = gravity(phase, now, state.gravity_cycle, &profile);
    state.gravity_shift = reading.changed;
    state.gravity_cycle = reading.cycle;
    let wind = wind_force(phase, now, &profile);

    // Bird
    let inverted = state.inversion.is_inverted();
    if input.flap_pressed {
        state.bird = bird::flap(&state.bird, inverted);
    }
    let control = ControlState {
        inverted,
        holding: state.controls.holding,
        flip_force: profile.control_flip_force,
    };
    state.bird = bird::integrate(
        &state.bird,
        reading.value * state.assist.gravity,
        wind,
        &control,
        frames,
    );

    // Pipes
    if state.sandbox.spawn_obstacles {
        state.spawn_timer += sim_dt;
        let interval = SPAWN_INTERVAL * profile.spawn_interval;
        if state.spawn_timer >= interval {
            state.spawn_timer -= interval;
            let id = state.next_entity_id();
            let pipe = pipes::spawn(id, phase, &profile, state.assist.gap, now, &mut state.rng);
            state.pipes.push(pipe);
        }
    }

    let speed = pipe_speed(phase, now, &profile) * state.assist.pipe_speed;
    let bird_center = state.bird.center_x();
    for pipe in state.pipes.iter_mut() {
        pipes::advance(pipe, speed, phase, config.oscillation, now, &profile, frames);
        if pipes::score_check(pipe, bird_center) {
            state.score += 1;
        }
    }
    state.pipes.retain(|p| !pipes::is_retired(p));

    // Collisions
    let forgiveness = profile.collision_forgiveness_ms;
    let hit_pipe = state
        .pipes
        .iter()
        .any(|p| bird_pipe_collision(&state.bird, p, now, forgiveness));
    let hit_ground = bird_ground_collision(&state.bird);

    if state.sandbox.invulnerable {
        if hit_ground {
            state.bird.pos.y = GROUND_Y - state.bird.size.y;
            state.bird.vel.y = state.bird.vel.y.min(0.0);
        }
    } else if hit_pipe || hit_ground {
        state.status = PlayStatus::GameOver;
        log::info!(
            "Game over at {:.2}s (phase {}, score {}, {})",
            now,
            phase,
            state.score,
            if hit_pipe { "pipe" } else { "ground" }
        );
    }
}

/// Handle crossing into a new phase
fn enter_phase(state: &mut SimulationState, phase: u32) {
    log::info!(
        "Phase {} -> {} ({})",
        state.phase,
        phase,
        phase_title(phase).unwrap_or("untitled")
    );
    state.phase = phase;
    state.slow_motion.trigger_for(phase);
    if is_overload_phase(phase) {
        log::info!("System overload at phase {}", phase);
        state.overload.trigger();
    }
}

/// Immutable form of [`tick`]: returns the next state, leaving `state` untouched
pub fn step(state: &SimulationState, dt: f32, input: &TickInput) -> SimulationState {
    let mut next = state.clone();
    tick(&mut next, input, dt);
    next
}

/// Testing/demo hook: move the run to the first instant of `phase`
///
/// The jump counts as entering the phase: event machines are reset, then the
/// phase's slow motion and (at overload milestones) its freeze are armed the
/// same way a natural crossing arms them. Existing pipes are cleared since
/// they were sized for the old phase.
pub fn jump_to_phase(state: &SimulationState, phase: i64) -> Result<SimulationState> {
    if phase <= 0 {
        return Err(Error::InvalidArgument(format!(
            "phase must be positive, got {}",
            phase
        )));
    }
    if phase > MAX_JUMP_PHASE {
        return Err(Error::InvalidArgument(format!(
            "phase {} exceeds {}",
            phase, MAX_JUMP_PHASE
        )));
    }
    let phase = phase as u32;

    let mut next = state.clone();
    next.set_survival_time(phase_start(phase));
    next.gravity_cycle = GravityCycle::at(phase, next.survival_time);
    next.gravity_shift = false;
    next.inversion = ControlInversion::Idle;
    next.overload = SystemOverload::Idle;
    next.slow_motion = SlowMotion::default();
    next.pipes.clear();
    next.spawn_timer = 0.0;
    log::info!("Jumped to phase {}", phase);
    enter_phase(&mut next, phase);
    Ok(next)
}
