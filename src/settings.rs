//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rules;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn starting_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Normal => STARTING_LIVES,
            Difficulty::Hard => 3,
        }
    }

    /// Enemy speed range (pixels/s)
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            Difficulty::Easy => (100.0, 150.0),
            Difficulty::Normal => (ENEMY_SPEED_LOW, ENEMY_SPEED_HIGH),
            Difficulty::Hard => (200.0, 280.0),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,

    // === Rules ===
    pub starting_lives: u32,
    /// Reaching this level wins
    pub final_level: u32,
    pub enemy_speed_low: f32,
    pub enemy_speed_high: f32,
    /// Coarse timer period (seconds)
    pub timer_interval: f32,
    /// Timer ticks between reaching the water and the next level
    pub level_countdown: u32,

    // === Audio ===
    pub audio_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Debug ===
    /// Start with the bounding-box overlay on
    pub show_bounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: None,

            starting_lives: STARTING_LIVES,
            final_level: FINAL_LEVEL,
            enemy_speed_low: ENEMY_SPEED_LOW,
            enemy_speed_high: ENEMY_SPEED_HIGH,
            timer_interval: TIMER_INTERVAL,
            level_countdown: LEVEL_COUNTDOWN,

            audio_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            show_bounds: false,
        }
    }
}

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates lives and enemy speeds)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.starting_lives = preset.starting_lives();
        (self.enemy_speed_low, self.enemy_speed_high) = preset.speed_range();
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Session rules with out-of-range values pulled back into range
    pub fn rules(&self) -> Rules {
        let low = self.enemy_speed_low.max(0.0);
        let high = self.enemy_speed_high.max(low);
        Rules {
            starting_lives: self.starting_lives.max(1),
            final_level: self.final_level.max(1),
            enemy_speed_low: low,
            enemy_speed_high: high,
            timer_interval: if self.timer_interval > 0.0 {
                self.timer_interval
            } else {
                TIMER_INTERVAL
            },
            level_countdown: self.level_countdown.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_rules() {
        assert_eq!(Settings::default().rules(), Rules::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "starting_lives": 2, "difficulty": "hard" }"#)
            .expect("valid json");
        assert_eq!(s.starting_lives, 2);
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert_eq!(s.final_level, FINAL_LEVEL);
        assert!(s.audio_enabled);
    }

    #[test]
    fn test_rules_are_sanitised() {
        let s = Settings {
            starting_lives: 0,
            final_level: 0,
            enemy_speed_low: 300.0,
            enemy_speed_high: 100.0,
            timer_interval: -1.0,
            level_countdown: 0,
            ..Settings::default()
        };
        let r = s.rules();
        assert_eq!(r.starting_lives, 1);
        assert_eq!(r.final_level, 1);
        assert_eq!(r.speed_range(), (300.0, 300.0));
        assert_eq!(r.timer_interval, TIMER_INTERVAL);
        assert_eq!(r.level_countdown, 1);
    }

    #[test]
    fn test_preset() {
        let s = Settings::from_preset(Difficulty::Easy);
        assert_eq!(s.starting_lives, 7);
        assert_eq!((s.enemy_speed_low, s.enemy_speed_high), (100.0, 150.0));
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, r#"{{ "seed": 42, "show_bounds": true }}"#).expect("write");
        drop(file);

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded.seed, Some(42));
        assert!(loaded.show_bounds);

        loaded.save(&path).expect("save");
        assert_eq!(Settings::load(&path).expect("reload"), loaded);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        assert!(matches!(Settings::load(&missing), Err(SettingsError::Io(_))));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").expect("write");
        let err = Settings::load(&bad).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings JSON"));
    }
}
