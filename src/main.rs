//! Petal Pong entry point
//!
//! Native headless driver: runs a full round with an autopilot standing in
//! for the human player and logs what happens.
//!
//! Usage: `petal-pong [seed] [settings.json]`

use petal_pong::Settings;
use petal_pong::audio::{AudioManager, LogSink};
use petal_pong::consts::*;
use petal_pong::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Wall-clock frame length the driver pretends to render at
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Give up after this many frames (about ten minutes)
const MAX_FRAMES: u32 = 60 * 600;
const ARENA_WIDTH: f32 = REFERENCE_WIDTH;

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    audio: AudioManager<LogSink>,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        let mut state = GameState::new(seed, ARENA_WIDTH);
        settings.apply_to(&mut state);
        Self {
            audio: AudioManager::from_settings(LogSink, &settings),
            state,
            settings,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Stand-in for mouse input: follow the leftmost ball heading left
    fn autopilot(&mut self) {
        let target = self
            .state
            .balls
            .iter()
            .filter(|b| b.vel.x < 0.0)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|b| b.pos.y);
        self.input.pointer_y = target;
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt_ms: f32) {
        self.accumulator += dt_ms.min(100.0);

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            self.autopilot();
            let events = tick(&mut self.state, &self.input, TICK_MS);
            self.accumulator -= TICK_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.nudge = None;

            self.audio.handle_events(&events);
            for event in &events {
                report(event);
            }
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::ScoreChanged { player, computer } => {
            println!("Score: player {} - computer {}", player, computer);
        }
        GameEvent::GameOver { winner } => println!("{:?} wins!", winner),
        GameEvent::BallsMultiplied { count } => log::info!("{} balls in play", count),
        GameEvent::CenterTargetDestroyed => log::info!("Center flower cleared"),
        other => log::trace!("{:?}", other),
    }
}

fn main() {
    env_logger::init();
    log::info!("Petal Pong (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let settings = args.next().map(Settings::load).unwrap_or_default();

    let mut game = Game::new(seed, settings);
    log::info!(
        "Game initialized with seed: {} ({})",
        game.state.seed,
        game.settings.difficulty.as_str()
    );

    game.input.start = true;
    for _ in 0..MAX_FRAMES {
        game.update(FRAME_MS);
        if game.state.phase == GamePhase::Over {
            break;
        }
    }

    if game.state.phase != GamePhase::Over {
        log::warn!("Round did not finish within {} frames", MAX_FRAMES);
    }

    let (player, computer) = game.state.scores();
    println!(
        "Final: player {} - computer {} after {} ticks, seed {} (background {})",
        player,
        computer,
        game.state.time_ticks,
        game.state.seed,
        game.settings.effective_background(&game.state).to_hex()
    );

    match serde_json::to_string(&game.state) {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}
