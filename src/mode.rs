//! Difficulty modes
//!
//! A mode resolves to an immutable [`ModeProfile`] of multipliers. The
//! profile is chosen once per run and replaced wholesale on toggle.

use serde::{Deserialize, Serialize};

/// Named difficulty modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Normal,
    Chill,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::Chill => "Chill",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "base" => Some(GameMode::Normal),
            "chill" | "easy" => Some(GameMode::Chill),
            _ => None,
        }
    }

    /// The other mode (menu toggle)
    pub fn toggled(&self) -> Self {
        match self {
            GameMode::Normal => GameMode::Chill,
            GameMode::Chill => GameMode::Normal,
        }
    }

    pub fn profile(&self) -> ModeProfile {
        match self {
            GameMode::Normal => ModeProfile::NORMAL,
            GameMode::Chill => ModeProfile::CHILL,
        }
    }
}

/// Multipliers scaling every tunable of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub mode: GameMode,
    pub gap: f32,
    /// Scales the time between pipe spawns (>1 = sparser)
    pub spawn_interval: f32,
    pub pipe_speed: f32,
    pub gravity: f32,
    pub wind: f32,
    pub oscillation: f32,
    pub control_flip_duration: f32,
    pub control_flip_force: f32,
    /// Cosmetic only, read by the renderer
    pub ghost_opacity: f32,
    /// Extra grace (ms) before delayed-collision pipes become solid
    pub collision_forgiveness_ms: f32,
}

impl ModeProfile {
    pub const NORMAL: ModeProfile = ModeProfile {
        mode: GameMode::Normal,
        gap: 1.0,
        spawn_interval: 1.0,
        pipe_speed: 1.0,
        gravity: 1.0,
        wind: 1.0,
        oscillation: 1.0,
        control_flip_duration: 1.0,
        control_flip_force: 1.0,
        ghost_opacity: 0.3,
        collision_forgiveness_ms: 0.0,
    };

    pub const CHILL: ModeProfile = ModeProfile {
        mode: GameMode::Chill,
        gap: 1.25,
        spawn_interval: 1.2,
        pipe_speed: 0.85,
        gravity: 0.85,
        wind: 0.5,
        oscillation: 0.6,
        control_flip_duration: 0.6,
        control_flip_force: 0.7,
        ghost_opacity: 0.5,
        collision_forgiveness_ms: 300.0,
    };
}

impl Default for ModeProfile {
    fn default() -> Self {
        ModeProfile::NORMAL
    }
}
