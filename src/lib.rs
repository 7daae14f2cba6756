//! Glitch Flap - a flappy-style survival game whose rules decay over time
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase rules, bird physics, pipes, events)
//! - `mode`: Difficulty mode profiles
//! - `assist`: Adaptive difficulty layered over a mode profile
//! - `settings`: Run configuration
//! - `error`: Boundary errors

pub mod assist;
pub mod error;
pub mod mode;
pub mod settings;
pub mod sim;

pub use assist::{Assist, AssistLevel, DeathStreak};
pub use error::{Error, Result};
pub use mode::{GameMode, ModeProfile};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-tick physics constants are tuned for
    pub const FRAMES_PER_SEC: f32 = 60.0;
    /// Largest real frame delta accepted per step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Top of the ground strip; touching it is fatal
    pub const GROUND_Y: f32 = 520.0;

    /// Bird defaults
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    pub const BIRD_START_X: f32 = 80.0;
    pub const BIRD_START_Y: f32 = 250.0;
    /// Upward impulse applied by a flap (pixels/frame)
    pub const FLAP_IMPULSE: f32 = -7.0;
    pub const MIN_VELOCITY: f32 = -10.0;
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Horizontal drift limits (wind)
    pub const MAX_DRIFT_VELOCITY: f32 = 3.0;
    pub const DRIFT_FRICTION: f32 = 0.95;

    /// Base gravity (pixels/frame²)
    pub const BASE_GRAVITY: f32 = 0.375;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const BASE_GAP: f32 = 200.0;
    pub const MIN_GAP: f32 = 120.0;
    pub const GAP_SHRINK_PER_PHASE: f32 = 8.0;
    /// Keeps the gap clear of the ceiling and the ground
    pub const GAP_MARGIN: f32 = 50.0;
    /// Base pipe speed (pixels/frame)
    pub const BASE_PIPE_SPEED: f32 = 2.0;
    /// Seconds of simulated time between spawns
    pub const SPAWN_INTERVAL: f32 = 1.6;
}

/// Wrap a value into `[0, period)`, tolerating negative input
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    value.rem_euclid(period)
}
