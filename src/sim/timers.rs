//! Round timers and one-shot visual effects
//!
//! Periodic events are a small table of independent count-up timers. Each
//! tick advances every entry by the step; an entry that reaches its
//! interval fires and restarts from zero. The tick dispatches fired kinds.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Periodic round events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Raise every live ball's speed
    SpeedRamp,
    /// Start the paddle spin animation
    PaddleSpin,
    /// Spawn a collectible flower
    FlowerSpawn,
    /// Double the live balls
    BallSplit,
}

impl TimerKind {
    /// Interval between firings (ms)
    pub fn interval_ms(self) -> f32 {
        match self {
            TimerKind::SpeedRamp => SPEED_RAMP_INTERVAL_MS,
            TimerKind::PaddleSpin => PADDLE_SPIN_INTERVAL_MS,
            TimerKind::FlowerSpawn => FLOWER_SPAWN_INTERVAL_MS,
            TimerKind::BallSplit => BALL_SPLIT_INTERVAL_MS,
        }
    }
}

/// A count-up timer that fires every `interval_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    pub kind: TimerKind,
    pub interval_ms: f32,
    pub elapsed_ms: f32,
}

impl PeriodicTimer {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            interval_ms: kind.interval_ms(),
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`. Returns true when the interval elapsed; the
    /// timer then restarts from zero.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0.0;
            return true;
        }
        false
    }
}

/// The four periodic timers of a round, processed in table order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTimers {
    pub entries: [PeriodicTimer; 4],
}

impl Default for RoundTimers {
    fn default() -> Self {
        Self {
            entries: [
                PeriodicTimer::new(TimerKind::FlowerSpawn),
                PeriodicTimer::new(TimerKind::SpeedRamp),
                PeriodicTimer::new(TimerKind::PaddleSpin),
                PeriodicTimer::new(TimerKind::BallSplit),
            ],
        }
    }
}

impl RoundTimers {
    pub fn reset(&mut self) {
        for timer in &mut self.entries {
            timer.elapsed_ms = 0.0;
        }
    }

    /// Advance every timer; returns the kinds that fired this step
    pub fn advance(&mut self, dt_ms: f32) -> Vec<TimerKind> {
        self.entries
            .iter_mut()
            .filter_map(|timer| timer.advance(dt_ms).then_some(timer.kind))
            .collect()
    }

    pub fn get(&self, kind: TimerKind) -> Option<&PeriodicTimer> {
        self.entries.iter().find(|t| t.kind == kind)
    }

    pub fn get_mut(&mut self, kind: TimerKind) -> Option<&mut PeriodicTimer> {
        self.entries.iter_mut().find(|t| t.kind == kind)
    }
}

/// Background flash started by a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashEffect {
    pub active: bool,
    pub elapsed_ms: f32,
}

impl FlashEffect {
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed_ms = 0.0;
    }

    pub fn advance(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= FLASH_DURATION_MS {
            self.active = false;
        }
    }
}

/// Synchronized full turn of both paddles
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinEffect {
    pub active: bool,
    pub elapsed_ms: f32,
}

impl SpinEffect {
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed_ms = 0.0;
    }

    /// Advance the animation; returns the paddle angle (degrees) to apply,
    /// or `None` when idle. Completion snaps back to 0.
    pub fn advance(&mut self, dt_ms: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.elapsed_ms += dt_ms;
        let progress = self.elapsed_ms / PADDLE_SPIN_DURATION_MS;
        if progress >= 1.0 {
            self.active = false;
            self.elapsed_ms = 0.0;
            Some(0.0)
        } else {
            Some(360.0 * progress)
        }
    }
}
