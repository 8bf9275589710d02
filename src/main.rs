//! Gem Hopper entry point
//!
//! Headless native driver: loads settings and assets, then plays the game with
//! a simple autopilot and prints a JSON run summary.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll, Waker};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use gem_hopper::audio::{AudioManager, LogBackend, audio_manifest};
use gem_hopper::consts::*;
use gem_hopper::platform::FrameClock;
use gem_hopper::renderer::{Canvas, render_frame};
use gem_hopper::resources::Resources;
use gem_hopper::sim::{GameEvent, GameState, GameStatus, Key, Rect, TickInput, tick};
use gem_hopper::{Difficulty, Settings, image_manifest};

#[derive(Debug, Parser)]
#[command(name = "gem-hopper", about = "Run a headless Gem Hopper session")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(long, default_value_t = 60 * 120)]
    frames: u64,
    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// easy, normal or hard
    #[arg(long)]
    difficulty: Option<String>,
    /// Frames between autopilot key presses
    #[arg(long, default_value_t = 12)]
    hop_every: u64,
    /// Start a fresh game this many times after the session ends
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// Write the effective settings to this file
    #[arg(long)]
    save_settings: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    status: Option<GameStatus>,
    score: u32,
    level: u32,
    lives: u32,
    hops: u32,
    prizes: u32,
    collisions: u32,
    levels_completed: u32,
    restarts: u32,
    sprites_drawn: u64,
    missing_sprites: u64,
    sounds_played: u32,
}

/// Canvas that resolves sprites through the asset cache and counts draws
struct HeadlessCanvas<'a> {
    resources: &'a Resources<(), ()>,
    drawn: u64,
    missing: u64,
}

impl Canvas for HeadlessCanvas<'_> {
    fn draw_sprite(&mut self, url: &str, _pos: Vec2) {
        if self.resources.get(url).is_some() {
            self.drawn += 1;
        } else {
            self.missing += 1;
            log::warn!("sprite {url} not loaded");
        }
    }

    fn stroke_rect(&mut self, _rect: Rect) {}

    fn draw_text(&mut self, text: &str, _pos: Vec2) {
        log::trace!("{text}");
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(name) = &args.difficulty {
        let preset =
            Difficulty::from_str(name).ok_or_else(|| anyhow!("unknown difficulty '{name}'"))?;
        settings.apply_preset(preset);
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    Ok(settings)
}

/// Request every asset and wait for the cache to report ready. The headless
/// host has nothing to fetch, so each request completes immediately.
fn load_assets() -> Result<Resources<(), ()>> {
    let mut resources = Resources::new();
    let images = resources.load(image_manifest());
    let clips = resources.load_audio(audio_manifest());

    let mut ready = resources.ready();
    for url in &images {
        resources.finish_image(url, ());
    }
    for url in &clips {
        resources.finish_audio(url, ());
    }

    let mut cx = TaskContext::from_waker(Waker::noop());
    match Pin::new(&mut ready).poll(&mut cx) {
        Poll::Ready(()) => {
            log::info!("{} images, {} clips ready", images.len(), clips.len());
            Ok(resources)
        }
        Poll::Pending => bail!("{} assets never finished loading", resources.pending()),
    }
}

/// Board row the player would stand on at draw-origin `y`
fn player_row(y: f32) -> i32 {
    ((y + PLAYER_DRAW_Y_OFFSET) / TILE_HEIGHT).round() as i32
}

/// An enemy is about to cross the player's column on `row`
fn row_is_dangerous(state: &GameState, row: i32) -> bool {
    let px = state.player.x();
    state
        .enemies
        .iter()
        .any(|e| e.row == row && e.x() > px - 2.0 * TILE_WIDTH && e.x() < px + TILE_WIDTH)
}

/// Head for the nearest gem, then for the water, waiting out traffic
fn autopilot_key(state: &GameState) -> Option<Key> {
    if state.frozen {
        return None;
    }

    let player = &state.player;
    let target = state
        .prizes
        .iter()
        .filter(|p| p.is_visible)
        .map(|p| p.entity.pos)
        .min_by(|a, b| {
            a.distance(player.entity.pos)
                .total_cmp(&b.distance(player.entity.pos))
        });

    let (dx, dy) = match target {
        Some(t) => (t.x - player.x(), t.y - player.y()),
        None => (0.0, -player.y() - PLAYER_DRAW_Y_OFFSET),
    };

    if dx.abs() > 1.0 {
        return Some(if dx < 0.0 { Key::Left } else { Key::Right });
    }
    if dy.abs() < 1.0 {
        return None;
    }

    let (key, step) = if dy < 0.0 { (Key::Up, -1) } else { (Key::Down, 1) };
    let next_row = player_row(player.y()) + step;
    if row_is_dangerous(state, next_row) {
        None
    } else {
        Some(key)
    }
}

fn run(args: &Args) -> Result<RunSummary> {
    if args.fps == 0 {
        bail!("fps must be > 0");
    }

    let settings = load_settings(args)?;
    if let Some(path) = &args.save_settings {
        settings
            .save(path)
            .with_context(|| format!("saving settings to {}", path.display()))?;
    }
    let resources = load_assets()?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(seed, settings.rules());
    state.debug_overlay = settings.show_bounds;
    state.audio_on = settings.audio_enabled;

    let mut audio = AudioManager::from_settings(LogBackend::default(), &settings);
    if state.audio_on {
        audio.start_music();
    }

    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };
    let mut clock = FrameClock::new();
    let frame_ms = 1000.0 / f64::from(args.fps);
    let mut canvas = HeadlessCanvas {
        resources: &resources,
        drawn: 0,
        missing: 0,
    };

    let mut restart_pending = false;

    for frame in 0..args.frames {
        let dt = clock.delta(frame as f64 * frame_ms);

        let mut input = TickInput {
            restart: std::mem::take(&mut restart_pending),
            ..Default::default()
        };
        if args.hop_every > 0 && frame % args.hop_every == 0 {
            input.keys.extend(autopilot_key(&state));
        }

        tick(&mut state, &input, dt);

        let events = state.drain_events();
        audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::Hop => summary.hops += 1,
                GameEvent::PrizeCollected { .. } => summary.prizes += 1,
                GameEvent::Collision { .. } => summary.collisions += 1,
                GameEvent::LevelComplete => summary.levels_completed += 1,
                _ => {}
            }
        }

        render_frame(&state, &mut canvas);
        summary.frames = frame + 1;

        if state.is_over() {
            log::info!("Session ended at frame {frame}: {:?}", state.status);
            if summary.restarts >= args.restarts {
                break;
            }
            summary.restarts += 1;
            restart_pending = true;
            // The next game starts with a fresh time base
            clock.reset();
        }
    }

    summary.status = Some(state.status);
    summary.score = state.score;
    summary.level = state.level;
    summary.lives = state.lives;
    summary.sprites_drawn = canvas.drawn;
    summary.missing_sprites = canvas.missing;
    summary.sounds_played = audio.backend().plays;
    Ok(summary)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Gem Hopper (headless) starting...");

    let args = Args::parse();
    let summary = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
