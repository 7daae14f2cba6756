//! Collision detection between the bird and the field
//!
//! Axis-aligned boxes throughout. A pipe only kills when the bird overlaps it
//! horizontally without sitting fully inside the (current, oscillated) gap.

use super::state::{Bird, Pipe};
use crate::consts::*;

/// Grace window before a delayed-collision pipe turns solid (ms)
pub const DELAYED_COLLISION_WINDOW_MS: f32 = 1500.0;

/// Whether a pipe can collide at survival time `now`
pub fn is_solid(pipe: &Pipe, now: f32, forgiveness_ms: f32) -> bool {
    if pipe.is_ghost {
        return false;
    }
    if pipe.delayed_collision {
        let age_ms = (now - pipe.spawn_time) * 1000.0;
        return age_ms > DELAYED_COLLISION_WINDOW_MS + forgiveness_ms;
    }
    true
}

/// Bird and pipe columns overlap on the x axis
#[inline]
pub fn horizontal_overlap(bird: &Bird, pipe: &Pipe) -> bool {
    bird.right() > pipe.x && bird.pos.x < pipe.right()
}

/// Bird box fully inside the gap
#[inline]
pub fn inside_gap(bird: &Bird, pipe: &Pipe) -> bool {
    bird.pos.y >= pipe.gap_top() && bird.bottom() <= pipe.gap_bottom()
}

/// Check if the bird hit a pipe
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe, now: f32, forgiveness_ms: f32) -> bool {
    is_solid(pipe, now, forgiveness_ms) && horizontal_overlap(bird, pipe) && !inside_gap(bird, pipe)
}

/// Check if the bird touched the ground. The ceiling is never fatal.
#[inline]
pub fn bird_ground_collision(bird: &Bird) -> bool {
    bird.bottom() >= GROUND_Y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn pipe_at(x: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            gap_y: 260.0,
            gap_height: 200.0,
            is_ghost: false,
            delayed_collision: false,
            oscillation_seed: 0.0,
            oscillation_offset: 0.0,
            scored: false,
            spawn_time: 10.0,
        }
    }

    fn bird_at(x: f32, y: f32) -> Bird {
        Bird {
            pos: Vec2::new(x, y),
            ..Bird::default()
        }
    }

    #[test]
    fn test_inside_gap_is_safe() {
        // Gap spans 160..360
        let pipe = pipe_at(70.0);
        assert!(!bird_pipe_collision(&bird_at(80.0, 200.0), &pipe, 20.0, 0.0));
        assert!(!bird_pipe_collision(&bird_at(80.0, 160.0), &pipe, 20.0, 0.0));
        assert!(!bird_pipe_collision(&bird_at(80.0, 336.0), &pipe, 20.0, 0.0));
    }

    #[test]
    fn test_clipping_gap_edge_hits() {
        let pipe = pipe_at(70.0);
        assert!(bird_pipe_collision(&bird_at(80.0, 150.0), &pipe, 20.0, 0.0));
        assert!(bird_pipe_collision(&bird_at(80.0, 340.0), &pipe, 20.0, 0.0));
    }

    #[test]
    fn test_no_overlap_no_hit() {
        let pipe = pipe_at(200.0);
        assert!(!bird_pipe_collision(&bird_at(80.0, 0.0), &pipe, 20.0, 0.0));
        // Touching edges exactly is not an overlap
        assert!(!bird_pipe_collision(&bird_at(200.0 - BIRD_WIDTH, 0.0), &pipe, 20.0, 0.0));
    }

    #[test]
    fn test_oscillation_moves_gap() {
        let mut pipe = pipe_at(70.0);
        let bird = bird_at(80.0, 170.0);
        assert!(!bird_pipe_collision(&bird, &pipe, 20.0, 0.0));
        pipe.oscillation_offset = 30.0;
        assert!(bird_pipe_collision(&bird, &pipe, 20.0, 0.0));
    }

    #[test]
    fn test_ghost_never_collides() {
        let pipe = Pipe {
            is_ghost: true,
            ..pipe_at(70.0)
        };
        assert!(!bird_pipe_collision(&bird_at(80.0, 0.0), &pipe, 100.0, 0.0));
    }

    #[test]
    fn test_delayed_collision_window() {
        let pipe = Pipe {
            delayed_collision: true,
            ..pipe_at(70.0)
        };
        let bird = bird_at(80.0, 0.0);
        // Spawned at 10 s: inert through 11.5 s, solid after
        assert!(!bird_pipe_collision(&bird, &pipe, 11.4, 0.0));
        assert!(bird_pipe_collision(&bird, &pipe, 11.6, 0.0));
        // Forgiveness extends the window
        assert!(!bird_pipe_collision(&bird, &pipe, 11.6, 300.0));
        assert!(bird_pipe_collision(&bird, &pipe, 11.9, 300.0));
    }

    #[test]
    fn test_ground() {
        assert!(!bird_ground_collision(&bird_at(80.0, GROUND_Y - BIRD_HEIGHT - 0.5)));
        assert!(bird_ground_collision(&bird_at(80.0, GROUND_Y - BIRD_HEIGHT)));
    }
}
