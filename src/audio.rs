//! Audio cues driven by simulation events
//!
//! The simulation never touches audio directly. The host drains
//! [`GameEvent`]s each frame and feeds them to an [`AudioManager`], which maps
//! them to clip playback on whatever [`AudioBackend`] the platform provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

pub const BACKGROUND_MUSIC: &str = "audio/background.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hopped one tile
    Jump,
    /// Enemy caught the player
    Collision,
    /// Gem picked up
    GetPrize,
    /// Player reached the water with every gem
    LevelDone,
    /// Last life lost
    LoseGame,
}

impl SoundEffect {
    pub fn clip(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "audio/jump.mp3",
            SoundEffect::Collision => "audio/collision.mp3",
            SoundEffect::GetPrize => "audio/getprize.mp3",
            SoundEffect::LevelDone => "audio/leveldone.mp3",
            SoundEffect::LoseGame => "audio/losegame.mp3",
        }
    }

    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Jump,
        SoundEffect::Collision,
        SoundEffect::GetPrize,
        SoundEffect::LevelDone,
        SoundEffect::LoseGame,
    ];
}

/// Every audio clip the game plays
pub fn audio_manifest() -> Vec<&'static str> {
    let mut urls = vec![BACKGROUND_MUSIC];
    urls.extend(SoundEffect::ALL.iter().map(SoundEffect::clip));
    urls
}

/// Platform playback. Effects restart from the beginning on every play.
pub trait AudioBackend {
    fn play(&mut self, clip: &str, volume: f32, looping: bool);
    fn pause(&mut self, clip: &str);
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Background music on/off is the session's
    /// `audio_on` toggle, delivered as `MusicStarted`/`MusicPaused` events.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect.clip(), vol, false);
    }

    pub fn start_music(&mut self) {
        let vol = self.effective_volume(self.music_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(BACKGROUND_MUSIC, vol, true);
    }

    pub fn pause_music(&mut self) {
        log::debug!("BG audio paused");
        self.backend.pause(BACKGROUND_MUSIC);
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Hop => self.play(SoundEffect::Jump),
            GameEvent::Collision { .. } => self.play(SoundEffect::Collision),
            GameEvent::PrizeCollected { .. } => self.play(SoundEffect::GetPrize),
            GameEvent::LevelComplete => self.play(SoundEffect::LevelDone),
            GameEvent::Lost => self.play(SoundEffect::LoseGame),
            GameEvent::MusicStarted => self.start_music(),
            GameEvent::MusicPaused => self.pause_music(),
            GameEvent::LevelReset { .. }
            | GameEvent::DebugOverlay { .. }
            | GameEvent::CharacterChanged { .. }
            | GameEvent::Won => {}
        }
    }

    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend {
    pub plays: u32,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, clip: &str, volume: f32, looping: bool) {
        self.plays += 1;
        log::debug!("play {clip} at {volume:.2}{}", if looping { " (loop)" } else { "" });
    }

    fn pause(&mut self, clip: &str) {
        log::debug!("pause {clip}");
    }
}
