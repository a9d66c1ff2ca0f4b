//! Computer paddle controller
//!
//! Proportional tracking: each tick the paddle closes a fraction of the gap
//! to the tracked ball. The fraction depends on difficulty and rises while
//! the ball is coming toward the paddle.

use serde::{Deserialize, Serialize};

use super::state::{Ball, GameState};
use crate::consts::AI_ALERT_MULTIPLIER;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "low" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" | "high" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Base tracking gain (fraction of the gap closed per tick)
    pub fn tracking_gain(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.05,
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.18,
        }
    }
}

/// Pick the ball to track. Prefers the approaching ball closest to the
/// paddle (largest x); otherwise the ball nearest horizontally. The flag is
/// true when the chosen ball is approaching.
pub fn pick_target(balls: &[Ball], paddle_x: f32) -> Option<(&Ball, bool)> {
    let approaching = balls
        .iter()
        .filter(|b| b.vel.x > 0.0)
        .max_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(ball) = approaching {
        return Some((ball, true));
    }

    balls
        .iter()
        .min_by(|a, b| {
            (paddle_x - a.pos.x)
                .abs()
                .total_cmp(&(paddle_x - b.pos.x).abs())
        })
        .map(|ball| (ball, false))
}

/// Move the computer paddle one step toward its target
pub fn update_computer(state: &mut GameState) {
    let Some((target_y, approaching)) =
        pick_target(&state.balls, state.computer.pos.x).map(|(b, a)| (b.pos.y, a))
    else {
        return;
    };

    let mut gain = state.difficulty.tracking_gain();
    if approaching {
        gain *= AI_ALERT_MULTIPLIER;
    }
    state.computer.track(target_y, gain, state.arena.height);
}
