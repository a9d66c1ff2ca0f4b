//! Petal Pong - a two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, timed events, AI)
//! - `settings`: Player preferences (difficulty, audio, accessibility)
//! - `audio`: Cue-to-sound mapping for an external audio backend

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Sizes are given for the 800x400 reference arena and scaled by
/// [`arena_scale`] when the arena is resized.
pub mod consts {
    /// Nominal simulation step (ms). Velocities are expressed per step.
    pub const TICK_MS: f32 = 16.0;
    /// Maximum steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Reference arena width; all sizes below are for this width
    pub const REFERENCE_WIDTH: f32 = 800.0;
    /// Arena aspect ratio (width / height)
    pub const ARENA_ASPECT: f32 = 2.0;

    /// Score needed to win a round
    pub const WIN_SCORE: u32 = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Keyboard nudge per key press
    pub const PADDLE_KEY_STEP: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 7.0;
    /// Added to a ball's speed on every paddle hit
    pub const PADDLE_HIT_SPEEDUP: f32 = 0.1;
    /// Added to every ball's speed when the speed timer elapses
    pub const SPEED_RAMP: f32 = 0.5;
    /// Balls are only multiplied while fewer than this are live
    pub const MAX_BALLS: usize = 4;

    /// Peripheral flowers
    pub const FLOWER_RADIUS: f32 = 10.0;
    pub const FLOWER_MARGIN: f32 = 50.0;
    pub const MAX_FLOWERS: usize = 5;

    /// Center target
    pub const CENTER_FLOWER_RADIUS: f32 = 25.0;
    pub const CENTER_FLOWER_PETALS: u32 = 8;

    /// Timer intervals (ms)
    pub const SPEED_RAMP_INTERVAL_MS: f32 = 10_000.0;
    pub const PADDLE_SPIN_INTERVAL_MS: f32 = 10_000.0;
    pub const FLOWER_SPAWN_INTERVAL_MS: f32 = 5_000.0;
    pub const BALL_SPLIT_INTERVAL_MS: f32 = 15_000.0;

    /// One-shot effect durations (ms)
    pub const FLASH_DURATION_MS: f32 = 500.0;
    pub const PADDLE_SPIN_DURATION_MS: f32 = 1_000.0;

    /// AI tracking gain boost while the tracked ball approaches
    pub const AI_ALERT_MULTIPLIER: f32 = 1.5;
}

/// Ratio of an arena width to the reference width
#[inline]
pub fn arena_scale(width: f32) -> f32 {
    width / consts::REFERENCE_WIDTH
}

/// Unit vector for an angle (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_scale() {
        assert!((arena_scale(800.0) - 1.0).abs() < f32::EPSILON);
        assert!((arena_scale(400.0) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_direction_from_angle_is_unit() {
        for i in 0..16 {
            let dir = direction_from_angle(i as f32 * 0.4);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }
}
