//! Phase rules
//!
//! Survival time is cut into fixed-length phases. Each phase switches on more
//! unstable mechanics, and the instantaneous gravity, wind and pipe speed are
//! pure functions of `(phase, survival_time)`. Nothing here depends on tick
//! count, so the same survival time always yields the same values no matter
//! the frame rate.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::mode::ModeProfile;
use crate::wrap;

/// Length of one phase (seconds of survival time)
pub const PHASE_DURATION: f32 = 15.0;
/// Last phase that gets an announcement banner. Difficulty keeps scaling past it.
pub const PHASE_TITLE_CAP: u32 = 10;

/// Phase thresholds (mechanic stays on from this phase onward)
pub const GRAVITY_DRIFT_PHASE: u32 = 2;
pub const OSCILLATION_PHASE: u32 = 3;
pub const WIND_PHASE: u32 = 4;
pub const CONTROL_FLIP_PHASE: u32 = 5;
pub const GHOST_PHASE: u32 = 6;
pub const SPEED_DRIFT_PHASE: u32 = 7;
pub const VISUAL_GLITCH_PHASE: u32 = 8;
pub const DELAYED_COLLISION_PHASE: u32 = 8;
/// Everything is on from here regardless of individual thresholds
pub const COLLAPSE_PHASE: u32 = 9;

/// Gravity alternation period in the first drift phases (seconds)
pub const GRAVITY_ALTERNATE_PERIOD: f32 = 4.0;
pub const GRAVITY_LOW: f32 = 0.8;
pub const GRAVITY_HIGH: f32 = 1.25;
/// Round-robin period once drift is fully established (seconds)
pub const GRAVITY_ROUND_ROBIN_PERIOD: f32 = 5.0;
/// base, heavy, floaty
pub const GRAVITY_ROUND_ROBIN: [f32; 3] = [1.0, 1.2, 0.7];

/// Milliseconds per gust step
pub const GUST_INTERVAL_MS: f32 = 2000.0;
pub const BASE_GUST: f32 = 0.12;
/// Per-phase gust growth past the wind threshold
pub const GUST_RAMP_PER_PHASE: f32 = 0.1;
pub const MAX_GUST_RAMP: f32 = 1.5;

pub const SPEED_DRIFT_PERIOD: f32 = 10.0;
/// Pipe speed never strays further than this fraction from base
pub const SPEED_DRIFT_LIMIT: f32 = 0.15;

/// Pipe oscillation
pub const OSCILLATION_AMPLITUDE: f32 = 30.0;
/// Radians per second of survival time
pub const OSCILLATION_FREQUENCY: f32 = 1.2;
pub const MAX_OSCILLATION_SCALE: f32 = 2.0;

const PHASE_TITLES: [&str; PHASE_TITLE_CAP as usize] = [
    "Stable Ground",
    "Gravity Drift",
    "Restless Pipes",
    "Crosswind",
    "Control Flip",
    "Ghost Pipes",
    "Speed Drift",
    "Signal Loss",
    "Collapse",
    "Entropy",
];

/// Phase number (1-based, unbounded) for a survival time
pub fn phase_of(survival_time: f32) -> u32 {
    // Also catches NaN
    if !(survival_time > 0.0) {
        return 1;
    }
    ((survival_time / PHASE_DURATION).floor() as u32).saturating_add(1)
}

/// First instant of a phase
pub fn phase_start(phase: u32) -> f32 {
    phase.saturating_sub(1) as f32 * PHASE_DURATION
}

/// Seconds elapsed since the current phase began
pub fn time_in_phase(survival_time: f32) -> f32 {
    (survival_time - phase_start(phase_of(survival_time))).max(0.0)
}

/// Announcement banner for a phase, if it has one
pub fn phase_title(phase: u32) -> Option<&'static str> {
    if phase == 0 {
        return None;
    }
    PHASE_TITLES.get(phase as usize - 1).copied()
}

/// Which mechanics are active in a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub gravity_drift: bool,
    pub oscillation: bool,
    pub wind: bool,
    pub control_flip: bool,
    pub ghost_pipes: bool,
    pub speed_drift: bool,
    pub visual_glitch: bool,
    pub all_unstable: bool,
}

impl PhaseConfig {
    /// Flags as an array, in threshold order
    pub fn flags(&self) -> [bool; 8] {
        [
            self.gravity_drift,
            self.oscillation,
            self.wind,
            self.control_flip,
            self.ghost_pipes,
            self.speed_drift,
            self.visual_glitch,
            self.all_unstable,
        ]
    }
}

pub fn phase_config(phase: u32) -> PhaseConfig {
    let collapse = phase >= COLLAPSE_PHASE;
    PhaseConfig {
        gravity_drift: collapse || phase >= GRAVITY_DRIFT_PHASE,
        oscillation: collapse || phase >= OSCILLATION_PHASE,
        wind: collapse || phase >= WIND_PHASE,
        control_flip: collapse || phase >= CONTROL_FLIP_PHASE,
        ghost_pipes: collapse || phase >= GHOST_PHASE,
        speed_drift: collapse || phase >= SPEED_DRIFT_PHASE,
        visual_glitch: collapse || phase >= VISUAL_GLITCH_PHASE,
        all_unstable: collapse,
    }
}

/// Which gravity cycle slot is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityCycle {
    /// Base gravity, no drift
    #[default]
    Steady,
    /// Low/high alternation right after drift starts
    Alternating(u32),
    /// base/heavy/floaty rotation
    RoundRobin(u32),
}

impl GravityCycle {
    pub fn at(phase: u32, survival_time: f32) -> Self {
        let t = survival_time.max(0.0);
        if !phase_config(phase).gravity_drift {
            GravityCycle::Steady
        } else if phase <= GRAVITY_DRIFT_PHASE + 1 {
            GravityCycle::Alternating(((t / GRAVITY_ALTERNATE_PERIOD).floor() as u32) % 2)
        } else {
            GravityCycle::RoundRobin(
                ((t / GRAVITY_ROUND_ROBIN_PERIOD).floor() as u32) % GRAVITY_ROUND_ROBIN.len() as u32,
            )
        }
    }

    pub fn multiplier(&self) -> f32 {
        match *self {
            GravityCycle::Steady => 1.0,
            GravityCycle::Alternating(0) => GRAVITY_LOW,
            GravityCycle::Alternating(_) => GRAVITY_HIGH,
            GravityCycle::RoundRobin(i) => GRAVITY_ROUND_ROBIN[i as usize % GRAVITY_ROUND_ROBIN.len()],
        }
    }
}

/// Instantaneous gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityReading {
    pub value: f32,
    pub cycle: GravityCycle,
    /// True on the tick the cycle slot flipped (drives the cosmetic wobble)
    pub changed: bool,
}

/// Gravity at `survival_time`, compared against the slot seen last tick
pub fn gravity(
    phase: u32,
    survival_time: f32,
    previous: GravityCycle,
    profile: &ModeProfile,
) -> GravityReading {
    let cycle = GravityCycle::at(phase, survival_time);
    GravityReading {
        value: BASE_GRAVITY * cycle.multiplier() * profile.gravity,
        cycle,
        changed: cycle != previous,
    }
}

/// Position in the four-step gust cycle: left, calm, right, calm
pub fn gust_step(survival_time: f32) -> u32 {
    ((survival_time.max(0.0) * 1000.0 / GUST_INTERVAL_MS).floor() as u64 % 4) as u32
}

/// Largest gust magnitude before the profile multiplier
pub fn max_gust() -> f32 {
    BASE_GUST * MAX_GUST_RAMP
}

/// Horizontal wind force (negative = leftward)
pub fn wind_force(phase: u32, survival_time: f32, profile: &ModeProfile) -> f32 {
    if !phase_config(phase).wind {
        return 0.0;
    }
    let direction = match gust_step(survival_time) {
        0 => -1.0,
        2 => 1.0,
        _ => 0.0,
    };
    let past = phase.saturating_sub(WIND_PHASE) as f32;
    let ramp = (1.0 + GUST_RAMP_PER_PHASE * past).min(MAX_GUST_RAMP);
    direction * BASE_GUST * ramp * profile.wind
}

/// Fractional deviation from base pipe speed within the drift cycle
///
/// 0-4 s ramps up to +15%, 4-5 s drops to -15%, 5-10 s recovers to 0.
pub fn speed_drift(survival_time: f32) -> f32 {
    let c = wrap(survival_time.max(0.0), SPEED_DRIFT_PERIOD);
    let drift = if c < 4.0 {
        SPEED_DRIFT_LIMIT * c / 4.0
    } else if c < 5.0 {
        SPEED_DRIFT_LIMIT - 2.0 * SPEED_DRIFT_LIMIT * (c - 4.0)
    } else {
        -SPEED_DRIFT_LIMIT * (1.0 - (c - 5.0) / 5.0)
    };
    drift.clamp(-SPEED_DRIFT_LIMIT, SPEED_DRIFT_LIMIT)
}

/// Pipe scroll speed (pixels/frame)
pub fn pipe_speed(phase: u32, survival_time: f32, profile: &ModeProfile) -> f32 {
    let base = BASE_PIPE_SPEED * profile.pipe_speed;
    if phase_config(phase).speed_drift {
        base * (1.0 + speed_drift(survival_time))
    } else {
        base
    }
}

/// Oscillation angular frequency for a phase (radians/second)
pub fn oscillation_frequency(phase: u32) -> f32 {
    let past = phase.saturating_sub(OSCILLATION_PHASE) as f32;
    OSCILLATION_FREQUENCY * (1.0 + 0.1 * past).min(MAX_OSCILLATION_SCALE)
}

/// Amplitude growth for a phase
pub fn oscillation_phase_multiplier(phase: u32) -> f32 {
    let past = phase.saturating_sub(OSCILLATION_PHASE) as f32;
    (1.0 + 0.15 * past).min(MAX_OSCILLATION_SCALE)
}

/// Chance a freshly spawned pipe is a ghost
pub fn ghost_chance(phase: u32) -> f64 {
    if !phase_config(phase).ghost_pipes {
        return 0.0;
    }
    let past = phase.saturating_sub(GHOST_PHASE) as f64;
    (0.1 + 0.05 * past).min(0.5)
}

/// Chance a freshly spawned pipe has delayed collision
pub fn delayed_collision_chance(phase: u32) -> f64 {
    if phase >= DELAYED_COLLISION_PHASE { 0.25 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_of() {
        assert_eq!(phase_of(0.0), 1);
        assert_eq!(phase_of(14.99), 1);
        assert_eq!(phase_of(15.0), 2);
        assert_eq!(phase_of(150.0), 11);
        assert_eq!(phase_of(-3.0), 1);
        assert_eq!(phase_of(f32::NAN), 1);
    }

    #[test]
    fn test_phase_start_round_trips() {
        for phase in 1..40 {
            assert_eq!(phase_of(phase_start(phase)), phase);
        }
    }

    #[test]
    fn test_titles_capped() {
        assert_eq!(phase_title(1), Some("Stable Ground"));
        assert_eq!(phase_title(PHASE_TITLE_CAP), Some("Entropy"));
        assert_eq!(phase_title(PHASE_TITLE_CAP + 1), None);
        assert_eq!(phase_title(0), None);
    }

    #[test]
    fn test_flags_monotonic() {
        for phase in 1..30 {
            let now = phase_config(phase).flags();
            let next = phase_config(phase + 1).flags();
            for (a, b) in now.iter().zip(next.iter()) {
                assert!(!a || *b, "flag dropped between phase {} and {}", phase, phase + 1);
            }
        }
    }

    #[test]
    fn test_collapse_forces_everything() {
        assert!(!phase_config(COLLAPSE_PHASE - 1).all_unstable);
        for phase in COLLAPSE_PHASE..COLLAPSE_PHASE + 5 {
            assert!(phase_config(phase).flags().iter().all(|f| *f));
        }
        assert_eq!(phase_config(1), PhaseConfig::default());
    }

    #[test]
    fn test_gravity_steady_before_drift() {
        let profile = ModeProfile::NORMAL;
        let reading = gravity(1, 7.0, GravityCycle::Steady, &profile);
        assert_eq!(reading.value, BASE_GRAVITY);
        assert!(!reading.changed);
    }

    #[test]
    fn test_gravity_alternates_and_flags_flip() {
        let profile = ModeProfile::NORMAL;
        // 16 s -> slot 0 (low), 20 s -> slot 1 (high)
        let a = gravity(2, 16.0, GravityCycle::Alternating(0), &profile);
        assert!(!a.changed);
        assert!((a.value - BASE_GRAVITY * GRAVITY_LOW).abs() < 1e-6);
        let b = gravity(2, 20.0, a.cycle, &profile);
        assert!(b.changed);
        assert!((b.value - BASE_GRAVITY * GRAVITY_HIGH).abs() < 1e-6);
        let c = gravity(2, 20.5, b.cycle, &profile);
        assert!(!c.changed);
    }

    #[test]
    fn test_gravity_round_robin_scaled_by_profile() {
        let profile = ModeProfile::CHILL;
        for (slot, mult) in GRAVITY_ROUND_ROBIN.iter().enumerate() {
            // Phase 5 covers 60..75 s; 60 / 5 = 12 -> slot 0
            let t = 60.0 + slot as f32 * GRAVITY_ROUND_ROBIN_PERIOD + 0.5;
            let reading = gravity(5, t, GravityCycle::Steady, &profile);
            assert_eq!(reading.cycle, GravityCycle::RoundRobin(slot as u32));
            assert!((reading.value - BASE_GRAVITY * mult * profile.gravity).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wind_cycle_sign() {
        let profile = ModeProfile::NORMAL;
        // 60 s sits 4 s into the 8 s cycle: right gust first
        assert_eq!(gust_step(60.0), 2);
        assert_eq!(wind_force(WIND_PHASE, 60.5, &profile), BASE_GUST);
        assert_eq!(wind_force(WIND_PHASE, 62.5, &profile), 0.0);
        assert_eq!(wind_force(WIND_PHASE, 64.5, &profile), -BASE_GUST);
        assert_eq!(wind_force(WIND_PHASE, 66.5, &profile), 0.0);
        assert_eq!(wind_force(WIND_PHASE, 68.5, &profile), BASE_GUST);
    }

    #[test]
    fn test_no_wind_before_threshold() {
        assert_eq!(wind_force(WIND_PHASE - 1, 0.5, &ModeProfile::NORMAL), 0.0);
    }

    #[test]
    fn test_wind_ramp_saturates() {
        let profile = ModeProfile::NORMAL;
        let far = wind_force(200, 0.5, &profile);
        assert!((far + max_gust()).abs() < 1e-6);
    }

    #[test]
    fn test_pipe_speed_constant_before_drift() {
        let profile = ModeProfile::NORMAL;
        assert_eq!(pipe_speed(SPEED_DRIFT_PHASE - 1, 83.0, &profile), BASE_PIPE_SPEED);
    }

    #[test]
    fn test_speed_drift_shape() {
        assert_eq!(speed_drift(0.0), 0.0);
        assert!((speed_drift(2.0) - 0.075).abs() < 1e-6);
        assert!((speed_drift(3.999) - SPEED_DRIFT_LIMIT).abs() < 1e-3);
        assert!((speed_drift(4.5) - 0.0).abs() < 1e-6);
        assert!((speed_drift(5.0) + SPEED_DRIFT_LIMIT).abs() < 1e-6);
        assert!((speed_drift(7.5) + 0.075).abs() < 1e-6);
        assert!(speed_drift(9.999).abs() < 1e-3);
    }

    #[test]
    fn test_ghost_chance_grows() {
        assert_eq!(ghost_chance(GHOST_PHASE - 1), 0.0);
        assert!(ghost_chance(GHOST_PHASE + 2) > ghost_chance(GHOST_PHASE));
        assert!(ghost_chance(500) <= 0.5);
    }
}
