//! Game state and core simulation types
//!
//! `SimulationState` is the aggregate root of one run. It is created fresh on
//! every restart; only the mode profile and assist level carry over, and
//! those are passed in by the caller.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{ControlInversion, SlowMotion, SystemOverload};
use super::phase::{GravityCycle, PHASE_DURATION};
use crate::assist::Assist;
use crate::consts::*;
use crate::mode::ModeProfile;

/// Whether the run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayStatus {
    Playing,
    /// Terminal: a collision ended the run
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub size: Vec2,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
        }
    }
}

impl Bird {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A pipe pair with a gap the bird has to fly through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Gap center before oscillation
    pub gap_y: f32,
    pub gap_height: f32,
    /// Drawn but never collides
    pub is_ghost: bool,
    /// Inert for a grace window after spawning
    pub delayed_collision: bool,
    /// Fixed random phase so neighbouring pipes sway out of step
    pub oscillation_seed: f32,
    /// Recomputed every tick
    pub oscillation_offset: f32,
    /// Set once, when the bird's center passes the pipe's center
    pub scored: bool,
    /// Survival time at spawn
    pub spawn_time: f32,
}

impl Pipe {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + PIPE_WIDTH / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Gap center including the current oscillation
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_y + self.oscillation_offset
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center() - self.gap_height / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center() + self.gap_height / 2.0
    }
}

/// Latched input state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub holding: bool,
}

/// Testing/demo switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sandbox {
    /// Collisions never end the run; the bird rests on the ground instead
    pub invulnerable: bool,
    pub spawn_obstacles: bool,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self {
            invulnerable: false,
            spawn_obstacles: true,
        }
    }
}

const NS_PER_SEC: f64 = 1e9;
const PHASE_NS: u64 = (PHASE_DURATION as f64 * NS_PER_SEC) as u64;
/// Clock error tolerated at a phase boundary (1 ms)
pub const CLOCK_SNAP_NS: u64 = 1_000_000;

/// Negative and NaN inputs map to zero
fn secs_to_ns(secs: f32) -> u64 {
    (secs as f64 * NS_PER_SEC).round() as u64
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub profile: ModeProfile,
    pub assist: Assist,
    pub sandbox: Sandbox,
    pub bird: Bird,
    /// Spawn order, which is also screen order
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Simulated seconds survived (frozen during system overload)
    ///
    /// Read-only view of the integer clock; change it with [`Self::advance_clock`]
    /// or [`Self::set_survival_time`].
    pub survival_time: f32,
    pub phase: u32,
    pub status: PlayStatus,
    pub controls: Controls,
    pub inversion: ControlInversion,
    pub slow_motion: SlowMotion,
    pub overload: SystemOverload,
    /// Gravity slot seen on the previous tick
    pub gravity_cycle: GravityCycle,
    /// True on the tick gravity changed slot (cosmetic wobble)
    pub gravity_shift: bool,
    /// Simulated seconds since the last spawn
    pub spawn_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
    /// Simulated nanoseconds survived
    clock_ns: u64,
}

impl SimulationState {
    /// Create a new run with the given profile and seed
    pub fn new(profile: ModeProfile, seed: u64) -> Self {
        Self {
            seed,
            profile,
            assist: Assist::NONE,
            sandbox: Sandbox::default(),
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            survival_time: 0.0,
            phase: 1,
            status: PlayStatus::Playing,
            controls: Controls::default(),
            inversion: ControlInversion::default(),
            slow_motion: SlowMotion::default(),
            overload: SystemOverload::default(),
            gravity_cycle: GravityCycle::Steady,
            gravity_shift: false,
            spawn_timer: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            clock_ns: 0,
        }
    }

    pub fn with_assist(mut self, assist: Assist) -> Self {
        self.assist = assist;
        self
    }

    pub fn with_sandbox(mut self, sandbox: Sandbox) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Add `dt` simulated seconds to the survival clock
    ///
    /// Time is summed as integer nanoseconds so the total does not depend on
    /// how it was sliced into frames. A clock that lands within
    /// [`CLOCK_SNAP_NS`] of a phase boundary is snapped onto it.
    pub fn advance_clock(&mut self, dt: f32) {
        self.clock_ns = self.clock_ns.saturating_add(secs_to_ns(dt));
        let next_boundary = (self.clock_ns / PHASE_NS + 1) * PHASE_NS;
        if next_boundary - self.clock_ns <= CLOCK_SNAP_NS {
            self.clock_ns = next_boundary;
        }
        self.survival_time = (self.clock_ns as f64 / NS_PER_SEC) as f32;
    }

    /// Place the survival clock at `secs`
    pub fn set_survival_time(&mut self, secs: f32) {
        self.clock_ns = secs_to_ns(secs);
        self.survival_time = (self.clock_ns as f64 / NS_PER_SEC) as f32;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == PlayStatus::Playing
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status == PlayStatus::GameOver
    }
}
