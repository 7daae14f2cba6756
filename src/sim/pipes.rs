//! Pipe field
//!
//! Pipes spawn at the right edge, scroll left, score once when the bird's
//! center passes theirs, and retire once fully off the left edge.

use rand::Rng;

use super::phase::{
    OSCILLATION_AMPLITUDE, delayed_collision_chance, ghost_chance, oscillation_frequency,
    oscillation_phase_multiplier,
};
use super::state::Pipe;
use crate::consts::*;
use crate::mode::ModeProfile;

/// Gap height for a pipe spawned in `phase`
pub fn gap_height(phase: u32, profile: &ModeProfile, assist_gap: f32) -> f32 {
    let shrink = GAP_SHRINK_PER_PHASE * phase.saturating_sub(2) as f32;
    (BASE_GAP - shrink).max(MIN_GAP) * profile.gap * assist_gap
}

/// Create a pipe at the right edge
pub fn spawn<R: Rng + ?Sized>(
    id: u32,
    phase: u32,
    profile: &ModeProfile,
    assist_gap: f32,
    spawn_time: f32,
    rng: &mut R,
) -> Pipe {
    let gap = gap_height(phase, profile, assist_gap);

    // Keep the whole gap between the ceiling margin and the ground
    let low = GAP_MARGIN + gap / 2.0;
    let high = GROUND_Y - GAP_MARGIN - gap / 2.0;
    let gap_y = if high > low {
        rng.random_range(low..=high)
    } else {
        (low + high) / 2.0
    };

    let is_ghost = rng.random_bool(ghost_chance(phase));
    let delayed = rng.random_bool(delayed_collision_chance(phase));
    let oscillation_seed = rng.random::<f32>() * std::f32::consts::TAU;

    let pipe = Pipe {
        id,
        x: FIELD_WIDTH,
        gap_y,
        gap_height: gap,
        is_ghost,
        delayed_collision: delayed && !is_ghost,
        oscillation_seed,
        oscillation_offset: 0.0,
        scored: false,
        spawn_time,
    };
    log::debug!(
        "Spawned pipe {} gap={:.0}@{:.0} ghost={} delayed={}",
        pipe.id,
        pipe.gap_height,
        pipe.gap_y,
        pipe.is_ghost,
        pipe.delayed_collision
    );
    pipe
}

/// Scroll a pipe left and refresh its oscillation
pub fn advance(
    pipe: &mut Pipe,
    speed: f32,
    phase: u32,
    oscillation_enabled: bool,
    survival_time: f32,
    profile: &ModeProfile,
    frames: f32,
) {
    pipe.x -= speed * frames;
    pipe.oscillation_offset = if oscillation_enabled {
        (survival_time * oscillation_frequency(phase) + pipe.oscillation_seed).sin()
            * OSCILLATION_AMPLITUDE
            * profile.oscillation
            * oscillation_phase_multiplier(phase)
    } else {
        0.0
    };
}

/// Mark the pipe scored once the bird's center has passed its center.
/// Returns true only on the tick it flips.
pub fn score_check(pipe: &mut Pipe, bird_center_x: f32) -> bool {
    if pipe.scored || bird_center_x <= pipe.center_x() {
        return false;
    }
    pipe.scored = true;
    true
}

/// Fully past the left edge
#[inline]
pub fn is_retired(pipe: &Pipe) -> bool {
    pipe.right() < 0.0
}
