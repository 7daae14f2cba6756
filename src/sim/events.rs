//! Timed event state machines
//!
//! Three independent machines layered over the phase rules:
//! - Control inversion: Idle -> Warning -> Active -> Idle
//! - Slow motion: reduced time scale while a phase title is announced
//! - System overload: a full simulation freeze at fixed phase milestones

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::phase::{COLLAPSE_PHASE, PhaseConfig, phase_title};
use crate::consts::FRAMES_PER_SEC;
use crate::mode::ModeProfile;

/// Warning lead time before controls flip (seconds)
pub const INVERSION_WARNING_SECS: f32 = 2.0;
/// Base inversion length, scaled by the profile (seconds)
pub const INVERSION_ACTIVE_SECS: f32 = 5.0;
/// A phase that enables the flip triggers it within this many seconds of starting
pub const INVERSION_TRIGGER_WINDOW: f32 = 1.0;
/// Random trigger odds per 60 Hz frame while idle
pub const INVERSION_CHANCE_PER_FRAME: f64 = 0.0015;

pub const SLOW_MOTION_SCALE: f32 = 0.35;
/// Real seconds
pub const SLOW_MOTION_SECS: f32 = 1.5;

/// Overload hits every this many phases, up to the collapse phase
pub const OVERLOAD_PHASE_STEP: u32 = 3;
/// Real seconds frozen
pub const OVERLOAD_FREEZE_SECS: f32 = 1.5;
/// Real seconds of fade after the freeze
pub const OVERLOAD_RECOVERY_SECS: f32 = 0.5;
const OVERLOAD_FLICKER_HZ: f32 = 12.0;

/// Control inversion machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ControlInversion {
    #[default]
    Idle,
    /// Flip announced, controls still normal
    Warning { remaining: f32 },
    /// Hold and release swap meaning, flaps do nothing
    Active { remaining: f32 },
}

impl ControlInversion {
    #[inline]
    pub fn is_inverted(&self) -> bool {
        matches!(self, ControlInversion::Active { .. })
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, ControlInversion::Idle)
    }

    /// Advance by `dt` simulated seconds
    ///
    /// Only one flip is ever in flight; trigger checks run only while idle.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        config: &PhaseConfig,
        time_in_phase: f32,
        dt: f32,
        profile: &ModeProfile,
        rng: &mut R,
    ) {
        *self = match *self {
            ControlInversion::Idle => {
                if !config.control_flip {
                    return;
                }
                let chance = (INVERSION_CHANCE_PER_FRAME * (dt * FRAMES_PER_SEC) as f64).clamp(0.0, 1.0);
                if time_in_phase < INVERSION_TRIGGER_WINDOW || rng.random_bool(chance) {
                    log::debug!("Control inversion warning");
                    ControlInversion::Warning {
                        remaining: INVERSION_WARNING_SECS,
                    }
                } else {
                    ControlInversion::Idle
                }
            }
            ControlInversion::Warning { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    log::debug!("Controls inverted");
                    ControlInversion::Active {
                        remaining: INVERSION_ACTIVE_SECS * profile.control_flip_duration,
                    }
                } else {
                    ControlInversion::Warning { remaining }
                }
            }
            ControlInversion::Active { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    log::debug!("Controls restored");
                    ControlInversion::Idle
                } else {
                    ControlInversion::Active { remaining }
                }
            }
        };
    }
}

/// Phase-announcement slow motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SlowMotion {
    /// Real seconds left
    pub remaining: f32,
}

impl SlowMotion {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Multiplier applied to the real frame delta
    pub fn time_scale(&self) -> f32 {
        if self.is_active() { SLOW_MOTION_SCALE } else { 1.0 }
    }

    /// Start slow motion if the phase has a title. Returns whether it started.
    pub fn trigger_for(&mut self, phase: u32) -> bool {
        if phase_title(phase).is_none() {
            return false;
        }
        self.remaining = SLOW_MOTION_SECS;
        true
    }

    /// Advance by real seconds
    pub fn advance(&mut self, real_dt: f32) {
        if self.is_active() {
            self.remaining = (self.remaining - real_dt).max(0.0);
        }
    }
}

/// Whether entering `phase` freezes the simulation
pub fn is_overload_phase(phase: u32) -> bool {
    phase > 0 && phase <= COLLAPSE_PHASE && phase % OVERLOAD_PHASE_STEP == 0
}

/// System overload machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum SystemOverload {
    #[default]
    Idle,
    /// Simulation paused; only the flicker animates
    Frozen { remaining: f32, elapsed: f32 },
    /// Fade-out after the freeze, simulation running again
    Recovering { remaining: f32 },
}

impl SystemOverload {
    #[inline]
    pub fn is_frozen(&self) -> bool {
        matches!(self, SystemOverload::Frozen { .. })
    }

    pub fn trigger(&mut self) {
        *self = SystemOverload::Frozen {
            remaining: OVERLOAD_FREEZE_SECS,
            elapsed: 0.0,
        };
    }

    /// Advance by real seconds. Returns true if this tick is frozen.
    ///
    /// The tick that exhausts the freeze is still frozen; integration resumes
    /// on the next one.
    pub fn advance(&mut self, real_dt: f32) -> bool {
        match *self {
            SystemOverload::Idle => false,
            SystemOverload::Frozen { remaining, elapsed } => {
                let remaining = remaining - real_dt;
                *self = if remaining <= 0.0 {
                    log::info!("System overload cleared");
                    SystemOverload::Recovering {
                        remaining: OVERLOAD_RECOVERY_SECS,
                    }
                } else {
                    SystemOverload::Frozen {
                        remaining,
                        elapsed: elapsed + real_dt,
                    }
                };
                true
            }
            SystemOverload::Recovering { remaining } => {
                let remaining = remaining - real_dt;
                *self = if remaining <= 0.0 {
                    SystemOverload::Idle
                } else {
                    SystemOverload::Recovering { remaining }
                };
                false
            }
        }
    }

    /// Flicker intensity 0-1 while frozen
    pub fn flicker(&self) -> f32 {
        match *self {
            SystemOverload::Frozen { elapsed, .. } => {
                (elapsed * OVERLOAD_FLICKER_HZ * std::f32::consts::TAU).sin() * 0.5 + 0.5
            }
            _ => 0.0,
        }
    }

    /// Recovery fade 1 -> 0
    pub fn recovery(&self) -> f32 {
        match *self {
            SystemOverload::Recovering { remaining } => (remaining / OVERLOAD_RECOVERY_SECS).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}
