//! Collision detection and response
//!
//! Paddles and balls are tested as axis-aligned boxes; flowers as circles.
//! Paddle response replaces the ball's velocity with an angle chosen by
//! where on the paddle it landed.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use super::state::Paddle;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Bounding square of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    pub fn of_paddle(paddle: &Paddle) -> Self {
        Self {
            min: paddle.pos,
            max: paddle.pos + Vec2::new(paddle.width, paddle.height),
        }
    }

    /// Strict overlap: boxes that only touch do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.min.y < other.max.y
            && self.max.x > other.min.x
            && self.max.y > other.min.y
    }
}

/// Ball vs paddle box test
pub fn ball_paddle_collision(ball_pos: Vec2, ball_radius: f32, paddle: &Paddle) -> bool {
    Aabb::of_paddle(paddle).overlaps(&Aabb::around_circle(ball_pos, ball_radius))
}

/// Circle vs circle: center distance strictly below the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// True if the ball's top or bottom edge is past the arena bounds
#[inline]
pub fn crosses_horizontal_wall(ball_pos: Vec2, ball_radius: f32, arena_height: f32) -> bool {
    ball_pos.y - ball_radius < 0.0 || ball_pos.y + ball_radius > arena_height
}

/// Where the ball hit relative to the paddle center, in [-1, 1]
pub fn normalized_offset(ball_y: f32, paddle: &Paddle) -> f32 {
    let half = paddle.height / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball_y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// Return velocity for a paddle hit: edge hits leave at up to 45 degrees,
/// center hits leave horizontally. `direction` is +1 off the left paddle.
pub fn deflect(offset: f32, direction: f32, speed: f32) -> Vec2 {
    let angle = FRAC_PI_4 * offset;
    Vec2::new(direction * speed * angle.cos(), speed * angle.sin())
}
