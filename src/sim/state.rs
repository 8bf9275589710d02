//! Session state and core simulation types
//!
//! The session owns every entity collection plus score, lives, level and the
//! freeze/countdown timers. Entities only mutate themselves; every effect that
//! crosses entities (score, visibility, lives) is applied from here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::prize::Prize;
use crate::consts::*;

/// Overall outcome of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Things that happened during a frame, drained by the host (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player stepped one tile
    Hop,
    /// An enemy caught the player
    Collision { lives_left: u32 },
    PrizeCollected { value: u32 },
    /// Player reached the water with nothing left to collect
    LevelComplete,
    /// Enemies, prizes and player rebuilt for `level`
    LevelReset { level: u32 },
    MusicStarted,
    MusicPaused,
    DebugOverlay { enabled: bool },
    CharacterChanged { character: usize },
    Won,
    Lost,
}

/// Tunables the session runs with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub starting_lives: u32,
    /// Reaching this level wins
    pub final_level: u32,
    pub enemy_speed_low: f32,
    pub enemy_speed_high: f32,
    /// Coarse timer period (seconds)
    pub timer_interval: f32,
    /// Timer ticks from level complete to the next level
    pub level_countdown: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            final_level: FINAL_LEVEL,
            enemy_speed_low: ENEMY_SPEED_LOW,
            enemy_speed_high: ENEMY_SPEED_HIGH,
            timer_interval: TIMER_INTERVAL,
            level_countdown: LEVEL_COUNTDOWN,
        }
    }
}

impl Rules {
    #[inline]
    pub fn speed_range(&self) -> (f32, f32) {
        (self.enemy_speed_low, self.enemy_speed_high)
    }
}

/// How many enemies and prizes a level starts with
pub fn level_population(level: u32) -> (usize, usize) {
    match level {
        0 => (1, 0),
        1 => (1, 1),
        n => (n as usize, n as usize),
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: Rules,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    /// Player input and enemy motion suspended
    pub frozen: bool,
    /// Timer ticks left before the pending level transition
    pub countdown: u32,
    /// Seconds until the next coarse timer tick
    pub timer: f32,
    pub status: GameStatus,
    pub audio_on: bool,
    /// Bounding-box overlay; also halts enemies
    pub debug_overlay: bool,
    /// Index into the character sprite list
    pub character: usize,
    /// Simulation frame counter
    pub frame: u64,
    pub enemies: Vec<Enemy>,
    pub prizes: Vec<Prize>,
    pub player: Player,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session and build level 0
    pub fn new(seed: u64, rules: Rules) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            score: 0,
            level: 0,
            lives: rules.starting_lives,
            frozen: false,
            countdown: 0,
            timer: 0.0,
            status: GameStatus::Playing,
            audio_on: true,
            debug_overlay: false,
            character: 0,
            frame: 0,
            enemies: Vec::new(),
            prizes: Vec::new(),
            player: Player::new(0),
            events: Vec::new(),
        };

        log::info!("***** GAME START ***** (seed {seed})");
        state.reset_level();
        state
    }

    /// Rebuild every entity for the current level and clear the freeze.
    /// Collections are replaced wholesale.
    pub fn reset_level(&mut self) {
        let (num_enemies, num_prizes) = level_population(self.level);
        log::info!(
            "Level {} reset: {} enemies, {} prizes",
            self.level,
            num_enemies,
            num_prizes
        );

        let speed_range = self.rules.speed_range();
        let enemies: Vec<Enemy> = (0..num_enemies)
            .map(|i| Enemy::spawn(i, &mut self.rng, speed_range))
            .collect();
        let prizes: Vec<Prize> = (0..num_prizes)
            .map(|i| {
                let row = self.rng.random_range(ENEMY_ROW_MIN..=ENEMY_ROW_MAX);
                let col = self.rng.random_range(0..BOARD_COLS);
                Prize::new(i, row, col)
            })
            .collect();

        self.enemies = enemies;
        self.prizes = prizes;
        self.player = Player::new(self.character);
        self.frozen = false;
        self.countdown = 0;
        self.emit(GameEvent::LevelReset { level: self.level });
    }

    /// User-initiated restart from level 0
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.level = 0;
        self.score = 0;
        self.lives = self.rules.starting_lives;
        self.countdown = 0;
        self.frozen = false;
        self.status = GameStatus::Playing;
        self.reset_level();
    }

    /// Freeze for the level transition and arm the countdown
    pub fn complete_level(&mut self) {
        log::info!("Level {} complete", self.level);
        self.frozen = true;
        self.countdown = self.rules.level_countdown;
        self.emit(GameEvent::MusicPaused);
        self.emit(GameEvent::LevelComplete);
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
