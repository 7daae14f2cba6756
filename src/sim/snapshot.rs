//! Read-only projection of the simulation for the renderer, audio and HUD
//!
//! Snapshots are plain values copied out of the state; consumers never hold
//! handles into live simulation data.

use glam::Vec2;
use serde::Serialize;

use super::collision::is_solid;
use super::events::{ControlInversion, SystemOverload};
use super::phase::{PhaseConfig, phase_config, phase_title};
use super::state::{PlayStatus, SimulationState};

/// Bird pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdPose {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

/// One pipe as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeView {
    pub id: u32,
    pub x: f32,
    /// Gap center including oscillation
    pub gap_center: f32,
    pub gap_height: f32,
    pub is_ghost: bool,
    pub delayed_collision: bool,
    /// Whether the pipe can currently collide
    pub solid: bool,
    pub scored: bool,
}

/// Overload machine plus its cosmetic signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverloadView {
    pub state: SystemOverload,
    pub flicker: f32,
    pub recovery: f32,
}

/// Slow-motion machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlowMotionView {
    pub active: bool,
    pub remaining: f32,
    pub time_scale: f32,
}

/// Everything external consumers read from one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub bird: BirdPose,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub phase: u32,
    pub phase_title: Option<&'static str>,
    pub survival_time: f32,
    pub status: PlayStatus,
    pub config: PhaseConfig,
    pub inversion: ControlInversion,
    pub slow_motion: SlowMotionView,
    pub overload: OverloadView,
    /// Gravity changed slot this tick (wobble cue)
    pub gravity_shift: bool,
    pub ghost_opacity: f32,
}

impl SimulationState {
    pub fn snapshot(&self) -> Snapshot {
        let forgiveness = self.profile.collision_forgiveness_ms;
        Snapshot {
            bird: BirdPose {
                pos: self.bird.pos,
                vel: self.bird.vel,
                size: self.bird.size,
            },
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    id: p.id,
                    x: p.x,
                    gap_center: p.gap_center(),
                    gap_height: p.gap_height,
                    is_ghost: p.is_ghost,
                    delayed_collision: p.delayed_collision,
                    solid: is_solid(p, self.survival_time, forgiveness),
                    scored: p.scored,
                })
                .collect(),
            score: self.score,
            phase: self.phase,
            phase_title: phase_title(self.phase),
            survival_time: self.survival_time,
            status: self.status,
            config: phase_config(self.phase),
            inversion: self.inversion,
            slow_motion: SlowMotionView {
                active: self.slow_motion.is_active(),
                remaining: self.slow_motion.remaining,
                time_scale: self.slow_motion.time_scale(),
            },
            overload: OverloadView {
                state: self.overload,
                flicker: self.overload.flicker(),
                recovery: self.overload.recovery(),
            },
            gravity_shift: self.gravity_shift,
            ghost_opacity: self.profile.ghost_opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeProfile;

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = SimulationState::new(ModeProfile::NORMAL, 1);
        let snap = state.snapshot();
        state.bird.pos.y += 50.0;
        state.score = 9;
        assert_ne!(snap.bird.pos.y, state.bird.pos.y);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.phase_title, Some("Stable Ground"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SimulationState::new(ModeProfile::CHILL, 1);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":1"));
        assert!(json.contains("\"status\":\"Playing\""));
    }
}
