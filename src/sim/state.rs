//! Game state and core simulation types
//!
//! Everything the renderer reads and every tick mutates lives in
//! [`GameState`]. There are no process-wide globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::Difficulty;
use super::spawn;
use super::timers::{FlashEffect, RoundTimers, SpinEffect};
use crate::arena_scale;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start trigger
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// A side reached the win score; ticks are ignored until restart
    Over,
}

/// Which paddle a score or win belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Computer,
}

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    /// Background while a score flash is active
    pub const FLASH: Color = Color(0xFFFF00);
    /// Center target
    pub const CENTER_FLOWER: Color = Color(0xFF69B4);

    /// CSS-style hex string, e.g. `#FF5733`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// Palette peripheral flowers pick from
pub const FLOWER_PALETTE: [Color; 6] = [
    Color(0xFF5733),
    Color(0x33FF57),
    Color(0x3357FF),
    Color(0xF3FF33),
    Color(0xFF33F3),
    Color(0x33FFF3),
];

/// Playing field bounds. The net is purely decorative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn from_width(width: f32) -> Self {
        Self {
            width,
            height: width / ARENA_ASPECT,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn midline(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        arena_scale(self.width)
    }
}

/// A paddle. `pos` is the top-left corner; x is fixed per side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub score: u32,
    /// Rotation (degrees, 0..360) driven by the spin effect
    pub rotation: f32,
}

impl Paddle {
    /// Create a paddle vertically centered in the arena
    pub fn new(x: f32, arena: &Arena) -> Self {
        let scale = arena.scale();
        let height = PADDLE_HEIGHT * scale;
        Self {
            pos: Vec2::new(x, (arena.height - height) / 2.0),
            width: PADDLE_WIDTH * scale,
            height,
            score: 0,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Keep the paddle fully inside the arena
    pub fn clamp_to(&mut self, arena_height: f32) {
        let max_y = (arena_height - self.height).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    /// Center the paddle on `y` (pointer/touch), clamped
    pub fn center_on(&mut self, y: f32, arena_height: f32) {
        self.pos.y = y - self.height / 2.0;
        self.clamp_to(arena_height);
    }

    /// Move by a fixed step (keyboard), clamped
    pub fn nudge(&mut self, dy: f32, arena_height: f32) {
        self.pos.y += dy;
        self.clamp_to(arena_height);
    }

    /// Move a fraction `gain` of the way toward centering on `target_y`
    pub fn track(&mut self, target_y: f32, gain: f32, arena_height: f32) {
        let max_y = (arena_height - self.height).max(0.0);
        let target = (target_y - self.height / 2.0).clamp(0.0, max_y);
        self.pos.y += (target - self.pos.y) * gain;
        self.clamp_to(arena_height);
    }
}

/// A ball entity. `vel` is in arena units per tick and its length always
/// equals `speed` after any collision response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Color,
    /// Overlapping the center target as of the last tick; a petal is
    /// only lost when this goes from false to true
    #[serde(default)]
    pub touching_center: bool,
}

impl Ball {
    /// Create a ball heading along `dir` (normalized here) at `speed`
    pub fn new(id: u32, pos: Vec2, radius: f32, speed: f32, dir: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: dir.normalize_or_zero() * speed,
            radius,
            speed,
            color: Color::WHITE,
            touching_center: false,
        }
    }

    /// Change speed while keeping the heading
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.vel = self.vel.normalize_or_zero() * speed;
    }

    /// Change heading while keeping the speed
    pub fn set_heading(&mut self, dir: Vec2) {
        self.vel = dir.normalize_or_zero() * self.speed;
    }
}

/// A collectible flower. Deactivated (not removed) on first contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flower {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub active: bool,
}

/// The destructible target at arena center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterFlower {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub petals: u32,
    pub max_petals: u32,
    pub active: bool,
}

impl CenterFlower {
    pub fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            radius: CENTER_FLOWER_RADIUS * arena.scale(),
            color: Color::CENTER_FLOWER,
            petals: CENTER_FLOWER_PETALS,
            max_petals: CENTER_FLOWER_PETALS,
            active: true,
        }
    }

    /// Remove one petal. Returns true if this hit destroyed the target.
    pub fn lose_petal(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.petals = self.petals.saturating_sub(1);
        if self.petals == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub arena: Arena,
    /// Left paddle, controlled by input
    pub player: Paddle,
    /// Right paddle, controlled by the AI
    pub computer: Paddle,
    /// Live balls in spawn order
    pub balls: Vec<Ball>,
    /// Peripheral flowers, oldest first
    pub flowers: Vec<Flower>,
    pub center: CenterFlower,
    pub timers: RoundTimers,
    pub flash: FlashEffect,
    pub spin: SpinEffect,
    pub difficulty: Difficulty,
    /// Winner of the last finished round
    pub winner: Option<Side>,
    /// Horizontal sign of the most recent serve
    pub serve_direction: f32,
    /// Ticks simulated this round
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create an idle state for an arena of the given width
    pub fn new(seed: u64, arena_width: f32) -> Self {
        let arena = Arena::from_width(arena_width);
        let player = Paddle::new(0.0, &arena);
        let computer = Paddle::new(arena.width - player.width, &arena);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            center: CenterFlower::new(&arena),
            arena,
            player,
            computer,
            balls: Vec::new(),
            flowers: Vec::new(),
            timers: RoundTimers::default(),
            flash: FlashEffect::default(),
            spin: SpinEffect::default(),
            difficulty: Difficulty::default(),
            winner: None,
            serve_direction: 1.0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Base serve speed for the current arena width
    #[inline]
    pub fn base_speed(&self) -> f32 {
        BALL_BASE_SPEED * self.arena.scale()
    }

    /// Start (or restart) a round: every entity, timer and effect is
    /// reinitialized and the phase becomes Running.
    pub fn start(&mut self) {
        self.player = Paddle::new(0.0, &self.arena);
        self.computer = Paddle::new(self.arena.width - self.player.width, &self.arena);
        self.balls.clear();
        self.flowers.clear();
        self.center = CenterFlower::new(&self.arena);
        self.timers.reset();
        self.flash = FlashEffect::default();
        self.spin = SpinEffect::default();
        self.winner = None;
        self.time_ticks = 0;
        spawn::serve_ball(self);
        self.phase = GamePhase::Running;
        log::info!(
            "Round started ({}x{}, {:?})",
            self.arena.width,
            self.arena.height,
            self.difficulty
        );
    }

    /// Resize the arena, scaling entity positions and sizes to match
    pub fn resize(&mut self, width: f32) {
        if width <= 0.0 || (width - self.arena.width).abs() < f32::EPSILON {
            return;
        }
        let factor = width / self.arena.width;
        self.arena = Arena::from_width(width);

        for paddle in [&mut self.player, &mut self.computer] {
            paddle.width *= factor;
            paddle.height *= factor;
            paddle.pos.y *= factor;
            paddle.clamp_to(self.arena.height);
        }
        self.computer.pos.x = self.arena.width - self.computer.width;

        for ball in &mut self.balls {
            ball.pos *= factor;
            ball.radius *= factor;
            ball.set_speed(ball.speed * factor);
        }
        for flower in &mut self.flowers {
            flower.pos *= factor;
            flower.radius *= factor;
        }
        self.center.pos = self.arena.center();
        self.center.radius *= factor;

        log::debug!("Arena resized to {}x{}", self.arena.width, self.arena.height);
    }

    /// Pointer/touch input: center the player paddle on `y`
    pub fn move_player_to(&mut self, y: f32) {
        self.player.center_on(y, self.arena.height);
    }

    /// Keyboard input: move the player paddle by `dy`
    pub fn nudge_player(&mut self, dy: f32) {
        self.player.nudge(dy, self.arena.height);
    }

    /// Background color the renderer should clear with
    pub fn background_color(&self) -> Color {
        if self.flash.active {
            Color::FLASH
        } else {
            Color::BLACK
        }
    }

    /// Current scores as (player, computer)
    pub fn scores(&self) -> (u32, u32) {
        (self.player.score, self.computer.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, 800.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.arena.height, 400.0);
        assert!(state.balls.is_empty());
        assert_eq!(state.computer.pos.x, 790.0);
        assert_eq!(state.player.pos.y, 150.0);
    }

    #[test]
    fn test_start_serves_one_ball_at_center() {
        let mut state = GameState::new(1, 800.0);
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(400.0, 200.0));
        assert!((state.balls[0].vel.length() - state.balls[0].speed).abs() < 1e-4);
        assert!(state.center.active);
        assert_eq!(state.center.petals, CENTER_FLOWER_PETALS);
    }

    #[test]
    fn test_restart_clears_scores() {
        let mut state = GameState::new(1, 800.0);
        state.start();
        state.player.score = 7;
        state.computer.score = 10;
        state.phase = GamePhase::Over;
        state.winner = Some(Side::Computer);
        state.start();
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.winner, None);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_paddle_clamps() {
        let arena = Arena::from_width(800.0);
        let mut paddle = Paddle::new(0.0, &arena);
        paddle.center_on(-500.0, arena.height);
        assert_eq!(paddle.pos.y, 0.0);
        paddle.center_on(5000.0, arena.height);
        assert_eq!(paddle.pos.y, 300.0);
        paddle.nudge(-PADDLE_KEY_STEP, arena.height);
        assert_eq!(paddle.pos.y, 280.0);
    }

    #[test]
    fn test_paddle_track_is_partial() {
        let arena = Arena::from_width(800.0);
        let mut paddle = Paddle::new(790.0, &arena);
        // Target top edge is 0, paddle top starts at 150
        paddle.track(50.0, 0.1, arena.height);
        assert!((paddle.pos.y - 135.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_flower_petals() {
        let arena = Arena::from_width(800.0);
        let mut center = CenterFlower::new(&arena);
        for _ in 0..CENTER_FLOWER_PETALS - 1 {
            assert!(!center.lose_petal());
            assert!(center.active);
        }
        assert!(center.lose_petal());
        assert!(!center.active);
        assert_eq!(center.petals, 0);
        assert!(!center.lose_petal());
        assert_eq!(center.petals, 0);
    }

    #[test]
    fn test_resize_scales_entities() {
        let mut state = GameState::new(1, 800.0);
        state.start();
        state.resize(400.0);
        assert_eq!(state.arena.height, 200.0);
        assert_eq!(state.player.height, 50.0);
        assert_eq!(state.computer.pos.x, 395.0);
        assert_eq!(state.balls[0].pos, Vec2::new(200.0, 100.0));
        assert!((state.balls[0].speed - 3.5).abs() < 1e-4);
        assert!((state.balls[0].vel.length() - 3.5).abs() < 1e-4);
        assert_eq!(state.center.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color(0xFF5733).to_hex(), "#FF5733");
        assert_eq!(Color::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn test_background_follows_flash() {
        let mut state = GameState::new(1, 800.0);
        assert_eq!(state.background_color(), Color::BLACK);
        state.flash.start();
        assert_eq!(state.background_color(), Color::FLASH);
    }
}
