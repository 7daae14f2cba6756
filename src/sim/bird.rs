//! Bird kinematics
//!
//! Integrates the bird one tick at a time from gravity, wind and control
//! state. Velocities are in pixels per 60 Hz frame and `frames` is how many
//! such frames the tick covers, so `frames == 1.0` reproduces the classic
//! per-frame update exactly.

use super::state::Bird;
use crate::consts::*;

/// Extra pull while holding during control inversion
pub const INVERTED_HOLD_PULL: f32 = 2.5;
/// Upward float after releasing during control inversion
pub const INVERTED_RELEASE_LIFT: f32 = 1.2;
/// Gravity blended back in when the flip force is softened
pub const SOFTENED_FLIP_BLEND: f32 = 0.5;

/// How input maps to vertical motion this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub inverted: bool,
    pub holding: bool,
    /// Profile's control-flip force multiplier
    pub flip_force: f32,
}

impl ControlState {
    pub fn normal() -> Self {
        Self {
            inverted: false,
            holding: false,
            flip_force: 1.0,
        }
    }
}

/// Apply a flap. Inverted controls ignore it; hold/release drive the bird instead.
pub fn flap(bird: &Bird, inverted: bool) -> Bird {
    let mut next = *bird;
    if !inverted {
        next.vel.y = FLAP_IMPULSE;
    }
    next
}

/// Advance the bird by one tick
pub fn integrate(bird: &Bird, gravity: f32, wind: f32, control: &ControlState, frames: f32) -> Bird {
    let mut next = *bird;
    let dt = frames.max(0.0);

    if control.inverted {
        let force = control.flip_force;
        if control.holding {
            next.vel.y += gravity * INVERTED_HOLD_PULL * force * dt;
        } else {
            next.vel.y -= gravity * INVERTED_RELEASE_LIFT * force * dt;
        }
        // Keep softened modes playable rather than floaty
        if force < 1.0 {
            next.vel.y += gravity * (1.0 - force) * SOFTENED_FLIP_BLEND * dt;
        }
    } else {
        next.vel.y += gravity * dt;
    }
    next.vel.y = next.vel.y.clamp(MIN_VELOCITY, MAX_VELOCITY);

    next.pos.y += next.vel.y * dt;
    // Hard ceiling, no bounce
    if next.pos.y < 0.0 {
        next.pos.y = 0.0;
        next.vel.y = 0.0;
    }

    next.vel.x += wind * dt;
    next.vel.x *= DRIFT_FRICTION.powf(dt);
    next.vel.x = next.vel.x.clamp(-MAX_DRIFT_VELOCITY, MAX_DRIFT_VELOCITY);
    next.pos.x = (next.pos.x + next.vel.x * dt).clamp(0.0, FIELD_WIDTH - next.size.x);

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_gravity_accumulates_per_frame() {
        let mut bird = Bird::default();
        for _ in 0..10 {
            bird = integrate(&bird, 0.375, 0.0, &ControlState::normal(), 1.0);
        }
        assert_eq!(bird.vel.y, 3.75_f32.min(MAX_VELOCITY));
    }

    #[test]
    fn test_velocity_clamped() {
        let mut bird = Bird::default();
        bird.vel.y = 9.9;
        let bird = integrate(&bird, 5.0, 0.0, &ControlState::normal(), 1.0);
        assert_eq!(bird.vel.y, MAX_VELOCITY);
    }

    #[test]
    fn test_ceiling_is_hard_clamp() {
        let mut bird = Bird::default();
        bird.pos.y = 2.0;
        bird.vel.y = -8.0;
        let bird = integrate(&bird, 0.375, 0.0, &ControlState::normal(), 1.0);
        assert_eq!(bird.pos.y, 0.0);
        assert_eq!(bird.vel.y, 0.0);
    }

    #[test]
    fn test_flap_only_in_normal_mode() {
        let bird = Bird::default();
        assert_eq!(flap(&bird, false).vel.y, FLAP_IMPULSE);
        assert_eq!(flap(&bird, true).vel.y, bird.vel.y);
    }

    #[test]
    fn test_inverted_hold_pulls_down_release_floats_up() {
        let bird = Bird::default();
        let hold = ControlState {
            inverted: true,
            holding: true,
            flip_force: 1.0,
        };
        let release = ControlState {
            holding: false,
            ..hold
        };
        let held = integrate(&bird, 0.4, 0.0, &hold, 1.0);
        assert!((held.vel.y - 0.4 * INVERTED_HOLD_PULL).abs() < 1e-6);
        let released = integrate(&bird, 0.4, 0.0, &release, 1.0);
        assert!((released.vel.y + 0.4 * INVERTED_RELEASE_LIFT).abs() < 1e-6);
    }

    #[test]
    fn test_softened_flip_blends_gravity() {
        let bird = Bird::default();
        let control = ControlState {
            inverted: true,
            holding: false,
            flip_force: 0.5,
        };
        let next = integrate(&bird, 0.4, 0.0, &control, 1.0);
        // -0.4*1.2*0.5 + 0.4*0.5*0.5
        assert!((next.vel.y - (-0.24 + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_wind_drift_decays_and_stays_on_screen() {
        let mut bird = Bird::default();
        for _ in 0..200 {
            bird = integrate(&bird, 0.0, 1.0, &ControlState::normal(), 1.0);
        }
        assert!(bird.vel.x <= MAX_DRIFT_VELOCITY);
        assert_eq!(bird.pos.x, FIELD_WIDTH - BIRD_WIDTH);

        let mut calm = bird;
        for _ in 0..200 {
            calm = integrate(&calm, 0.0, 0.0, &ControlState::normal(), 1.0);
        }
        assert!(calm.vel.x.abs() < 0.01);

        let mut left = Bird {
            pos: Vec2::new(5.0, 100.0),
            ..Bird::default()
        };
        for _ in 0..50 {
            left = integrate(&left, 0.0, -1.0, &ControlState::normal(), 1.0);
        }
        assert_eq!(left.pos.x, 0.0);
    }
}
