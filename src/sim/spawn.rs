//! Entity spawning: serves, flowers and extra balls
//!
//! All randomness comes from the state's seeded RNG.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, FLOWER_PALETTE, Flower, GameState};
use crate::consts::*;
use crate::direction_from_angle;

/// Serve a fresh ball from arena center at base speed. The horizontal
/// direction alternates between serves.
pub fn serve_ball(state: &mut GameState) {
    state.serve_direction = -state.serve_direction;
    let id = state.next_entity_id();
    let dir = Vec2::new(state.serve_direction * FRAC_PI_4.cos(), FRAC_PI_4.sin());
    let radius = BALL_RADIUS * state.arena.scale();
    let mut ball = Ball::new(id, state.arena.center(), radius, state.base_speed(), dir);
    // Serves start inside the center target; that is not a contact
    ball.touching_center = true;
    let toward = if dir.x < 0.0 { "player" } else { "computer" };
    log::debug!("Serve ball {} toward {}", id, toward);
    state.balls.push(ball);
}

/// Spawn a flower at a random spot inside the margin. The oldest flower is
/// evicted once the cap is exceeded.
pub fn spawn_flower(state: &mut GameState) -> Flower {
    let scale = state.arena.scale();
    let margin = FLOWER_MARGIN * scale;
    let x = random_within(&mut state.rng, margin, state.arena.width - margin);
    let y = random_within(&mut state.rng, margin, state.arena.height - margin);
    let color = FLOWER_PALETTE[state.rng.random_range(0..FLOWER_PALETTE.len())];

    let flower = Flower {
        pos: Vec2::new(x, y),
        radius: FLOWER_RADIUS * scale,
        color,
        active: true,
    };
    state.flowers.push(flower.clone());
    if state.flowers.len() > MAX_FLOWERS {
        state.flowers.remove(0);
    }
    flower
}

/// Uniform in `[lo, hi)`, or the midpoint if the range is empty
fn random_within(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Clone every live ball into a new one at the same position and speed
/// with a random heading. No-op when empty or already at the cap.
/// Returns the number of balls added.
pub fn multiply_balls(state: &mut GameState) -> usize {
    let live = state.balls.len();
    if live == 0 || live >= MAX_BALLS {
        return 0;
    }

    for i in 0..live {
        let angle = state.rng.random_range(0.0..TAU);
        let id = state.next_entity_id();
        let mut clone = state.balls[i].clone();
        clone.id = id;
        clone.set_heading(direction_from_angle(angle));
        state.balls.push(clone);
    }
    live
}
