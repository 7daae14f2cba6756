//! Adaptive difficulty
//!
//! Repeated early deaths soften the game. The softening is a separate
//! multiplier set layered over the chosen [`ModeProfile`](crate::ModeProfile),
//! never baked into the phase rules. The streak tracker is owned by the
//! caller because it must outlive the per-run simulation state.

use serde::{Deserialize, Serialize};

/// A run shorter than this (simulated seconds) counts as an early death
pub const EARLY_DEATH_SECS: f32 = 10.0;
/// Early deaths in a row before the mild assist kicks in
pub const MILD_ASSIST_STREAK: u32 = 3;
/// Early deaths in a row before the strong assist kicks in
pub const STRONG_ASSIST_STREAK: u32 = 5;

/// How much help the player currently gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum AssistLevel {
    #[default]
    None,
    Mild,
    Strong,
}

impl AssistLevel {
    pub fn multipliers(&self) -> Assist {
        match self {
            AssistLevel::None => Assist::NONE,
            AssistLevel::Mild => Assist {
                gap: 1.1,
                pipe_speed: 0.95,
                gravity: 0.95,
            },
            AssistLevel::Strong => Assist {
                gap: 1.2,
                pipe_speed: 0.9,
                gravity: 0.9,
            },
        }
    }
}

/// Multipliers applied on top of the mode profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assist {
    pub gap: f32,
    pub pipe_speed: f32,
    pub gravity: f32,
}

impl Assist {
    pub const NONE: Assist = Assist {
        gap: 1.0,
        pipe_speed: 1.0,
        gravity: 1.0,
    };
}

impl Default for Assist {
    fn default() -> Self {
        Assist::NONE
    }
}

/// Consecutive early-death counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeathStreak {
    pub early_deaths: u32,
}

impl DeathStreak {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run and return the assist level for the next one
    pub fn record_run(&mut self, survival_time: f32) -> AssistLevel {
        if survival_time < EARLY_DEATH_SECS {
            self.early_deaths = self.early_deaths.saturating_add(1);
        } else {
            self.early_deaths = 0;
        }
        let level = self.level();
        if level != AssistLevel::None {
            log::info!(
                "Assist {:?} after {} early deaths",
                level,
                self.early_deaths
            );
        }
        level
    }

    pub fn level(&self) -> AssistLevel {
        if self.early_deaths >= STRONG_ASSIST_STREAK {
            AssistLevel::Strong
        } else if self.early_deaths >= MILD_ASSIST_STREAK {
            AssistLevel::Mild
        } else {
            AssistLevel::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_escalates() {
        let mut streak = DeathStreak::new();
        assert_eq!(streak.record_run(3.0), AssistLevel::None);
        assert_eq!(streak.record_run(4.0), AssistLevel::None);
        assert_eq!(streak.record_run(2.0), AssistLevel::Mild);
        assert_eq!(streak.record_run(2.0), AssistLevel::Mild);
        assert_eq!(streak.record_run(1.0), AssistLevel::Strong);
    }

    #[test]
    fn test_long_run_resets_streak() {
        let mut streak = DeathStreak::new();
        for _ in 0..4 {
            streak.record_run(1.0);
        }
        assert_eq!(streak.level(), AssistLevel::Mild);
        assert_eq!(streak.record_run(45.0), AssistLevel::None);
        assert_eq!(streak.early_deaths, 0);
    }

    #[test]
    fn test_stronger_assist_widens_gap() {
        assert!(AssistLevel::Strong.multipliers().gap > AssistLevel::Mild.multipliers().gap);
        assert_eq!(AssistLevel::None.multipliers(), Assist::NONE);
    }
}
