//! Fixed timestep simulation tick
//!
//! Advances a round by one step and reports what happened as events.

use super::ai::update_computer;
use super::collision::{
    ball_paddle_collision, circles_overlap, crosses_horizontal_wall, deflect, normalized_offset,
};
use super::events::{Cue, GameEvent};
use super::spawn::{multiply_balls, serve_ball, spawn_flower};
use super::state::{GamePhase, GameState, Side};
use super::timers::TimerKind;
use crate::consts::*;

/// Discrete keyboard step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

/// Input observed since the previous tick (last write wins)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch y in arena coordinates; the paddle centers on it
    pub pointer_y: Option<f32>,
    /// Arrow key step
    pub nudge: Option<Nudge>,
    /// Start/restart trigger (button, space, touch-to-start)
    pub start: bool,
}

/// Advance the round by one step of `dt_ms` milliseconds.
///
/// Outside of a running round this only honors the start trigger; nothing
/// else is mutated.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start {
        state.start();
        events.push(GameEvent::RoundStarted);
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    apply_player_input(state, input);

    run_timers(state, dt_ms, &mut events);
    update_effects(state, dt_ms);

    if score_escaped_balls(state, &mut events) {
        check_game_over(state, &mut events);
    }

    if state.phase == GamePhase::Running {
        move_balls(state, &mut events);
        update_computer(state);
        collect_flowers(state, &mut events);
    }

    if state.balls.is_empty() {
        serve_ball(state);
    }

    events
}

fn apply_player_input(state: &mut GameState, input: &TickInput) {
    let step = PADDLE_KEY_STEP * state.arena.scale();
    match input.nudge {
        Some(Nudge::Up) => state.nudge_player(-step),
        Some(Nudge::Down) => state.nudge_player(step),
        None => {}
    }
    if let Some(y) = input.pointer_y {
        state.move_player_to(y);
    }
}

/// Advance the periodic timers and dispatch whatever fired
fn run_timers(state: &mut GameState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    for kind in state.timers.advance(dt_ms) {
        match kind {
            TimerKind::SpeedRamp => {
                for ball in &mut state.balls {
                    ball.set_speed(ball.speed + SPEED_RAMP * state.arena.scale());
                }
                log::debug!("Speed ramp: {} balls sped up", state.balls.len());
            }
            TimerKind::PaddleSpin => {
                state.spin.start();
                events.push(GameEvent::PaddleSpinStarted);
            }
            TimerKind::FlowerSpawn => {
                let flower = spawn_flower(state);
                events.push(GameEvent::FlowerSpawned {
                    pos: flower.pos,
                    color: flower.color,
                });
            }
            TimerKind::BallSplit => {
                let added = multiply_balls(state);
                if added > 0 {
                    log::debug!(
                        "Ball split: {} -> {}",
                        state.balls.len() - added,
                        state.balls.len()
                    );
                    events.push(GameEvent::BallsMultiplied {
                        count: state.balls.len(),
                    });
                }
            }
        }
    }
}

fn update_effects(state: &mut GameState, dt_ms: f32) {
    if let Some(angle) = state.spin.advance(dt_ms) {
        state.player.rotation = angle;
        state.computer.rotation = angle;
    }
    state.flash.advance(dt_ms);
}

/// Remove balls that left the arena horizontally and award points.
/// Returns true if anyone scored.
fn score_escaped_balls(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let width = state.arena.width;
    let mut scored = false;

    let mut i = 0;
    while i < state.balls.len() {
        let ball = &state.balls[i];
        let side = if ball.pos.x - ball.radius < 0.0 {
            Some(Side::Computer)
        } else if ball.pos.x + ball.radius > width {
            Some(Side::Player)
        } else {
            None
        };

        let Some(side) = side else {
            i += 1;
            continue;
        };

        state.balls.remove(i);
        match side {
            Side::Player => state.player.score += 1,
            Side::Computer => state.computer.score += 1,
        }
        scored = true;
        state.flash.start();

        let (player, computer) = state.scores();
        log::info!("{:?} scores: {} - {}", side, player, computer);
        events.push(GameEvent::Cue(Cue::Score));
        events.push(GameEvent::ScoreChanged { player, computer });
    }

    scored
}

/// End the round if a side reached the win score. The player is checked
/// first, so a same-tick double breach goes to the player.
fn check_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let winner = if state.player.score >= WIN_SCORE {
        Side::Player
    } else if state.computer.score >= WIN_SCORE {
        Side::Computer
    } else {
        return;
    };

    state.phase = GamePhase::Over;
    state.winner = Some(winner);
    log::info!("Round over, {:?} wins", winner);
    events.push(GameEvent::GameOver { winner });
}

/// Move every ball, bounce off top/bottom and respond to paddle hits
fn move_balls(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let arena = state.arena;
    let speedup = PADDLE_HIT_SPEEDUP * arena.scale();

    for ball in &mut state.balls {
        ball.pos += ball.vel;

        if crosses_horizontal_wall(ball.pos, ball.radius, arena.height) {
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::Cue(Cue::WallHit));
        }

        let on_left = ball.pos.x + ball.radius < arena.midline();
        let (paddle, direction) = if on_left {
            (&state.player, 1.0)
        } else {
            (&state.computer, -1.0)
        };

        if ball_paddle_collision(ball.pos, ball.radius, paddle) {
            let offset = normalized_offset(ball.pos.y, paddle);
            ball.speed += speedup;
            ball.vel = deflect(offset, direction, ball.speed);
            events.push(GameEvent::Cue(Cue::PaddleHit));
        }
    }
}

/// Recolor balls that touch flowers and wear down the center target
fn collect_flowers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for ball in &mut state.balls {
        for flower in state.flowers.iter_mut().filter(|f| f.active) {
            if circles_overlap(ball.pos, ball.radius, flower.pos, flower.radius) {
                ball.color = flower.color;
                flower.active = false;
                events.push(GameEvent::Cue(Cue::FlowerHit));
            }
        }

        let center = &mut state.center;
        let overlapping = circles_overlap(ball.pos, ball.radius, center.pos, center.radius);
        let entered = overlapping && !ball.touching_center;
        ball.touching_center = overlapping;
        if center.active && entered {
            ball.color = center.color;
            events.push(GameEvent::Cue(Cue::FlowerHit));
            if center.lose_petal() {
                log::info!("Center target destroyed");
                events.push(GameEvent::CenterTargetDestroyed);
            }
        }
    }
}
