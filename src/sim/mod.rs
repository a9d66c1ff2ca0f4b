//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Side effects reported as events, never performed
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use ai::Difficulty;
pub use collision::{Aabb, ball_paddle_collision, circles_overlap, deflect, normalized_offset};
pub use events::{Cue, GameEvent};
pub use state::{
    Arena, Ball, CenterFlower, Color, FLOWER_PALETTE, Flower, GamePhase, GameState, Paddle, Side,
};
pub use tick::{Nudge, TickInput, tick};
pub use timers::{FlashEffect, PeriodicTimer, RoundTimers, SpinEffect, TimerKind};
