//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time-based effects depend on survival time, never on tick count
//! - Seeded RNG only
//! - Stable iteration order (pipes stay in spawn order)
//! - No rendering, audio or platform dependencies

pub mod bird;
pub mod collision;
pub mod events;
pub mod phase;
pub mod pipes;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use bird::ControlState;
pub use collision::{bird_ground_collision, bird_pipe_collision, is_solid};
pub use events::{ControlInversion, SlowMotion, SystemOverload};
pub use phase::{GravityCycle, GravityReading, PhaseConfig, phase_config, phase_of, phase_title};
pub use snapshot::{BirdPose, OverloadView, PipeView, SlowMotionView, Snapshot};
pub use state::{Bird, Controls, Pipe, PlayStatus, Sandbox, SimulationState};
pub use tick::{TickInput, jump_to_phase, reset, step, tick};
