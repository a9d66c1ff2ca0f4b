//! Signals emitted by a tick
//!
//! The simulation never plays audio or touches presentation. It returns
//! these events and external handlers decide what to do with them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Color, Side};

/// Named cue for an external audio/visual handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    PaddleHit,
    WallHit,
    FlowerHit,
    Score,
}

/// Everything a tick can report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(Cue),
    /// A start trigger (re)initialized the round
    RoundStarted,
    ScoreChanged { player: u32, computer: u32 },
    GameOver { winner: Side },
    FlowerSpawned { pos: Vec2, color: Color },
    BallsMultiplied { count: usize },
    PaddleSpinStarted,
    CenterTargetDestroyed,
}

impl GameEvent {
    /// The cue carried by this event, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Cue(cue) => Some(*cue),
            _ => None,
        }
    }
}
