//! Settings — YAML load/save for ~/.chordbeat/settings.yaml.
//!
//! Every field has a default, so a partial file (or none at all) is fine.
//! Command-line flags are applied on top by the binary.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chord::MatchPolicy;
use crate::clock::clamp_bpm;
use crate::midi::MidiConfig;
use crate::session::{MusicConfig, MAX_OCTAVE, MIN_OCTAVE};

/// Directory under the home directory holding settings and logs.
pub const APP_DIR: &str = ".chordbeat";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O: {0}")]
    Io(#[from] io::Error),
    #[error("settings parse: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Metronome tempo.
    #[serde(default = "Settings::default_bpm")]
    pub bpm: f64,
    /// Key, scale and octave for generated chords.
    #[serde(flatten)]
    pub music: MusicConfig,
    #[serde(default)]
    pub match_policy: MatchPolicy,
    /// Metronome click volume, 0.0–1.0.
    #[serde(default = "Settings::default_volume")]
    pub click_volume: f32,
    #[serde(default)]
    pub midi: MidiConfig,
}

impl Settings {
    fn default_bpm() -> f64 {
        60.0
    }

    fn default_volume() -> f32 {
        1.0
    }

    /// Clamp values that have a valid range.
    pub fn normalized(mut self) -> Self {
        self.bpm = clamp_bpm(self.bpm);
        self.music.octave = self.music.octave.clamp(MIN_OCTAVE, MAX_OCTAVE);
        self.click_volume = self.click_volume.clamp(0.0, 1.0);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bpm: Self::default_bpm(),
            music: MusicConfig::default(),
            match_policy: MatchPolicy::default(),
            click_volume: Self::default_volume(),
            midi: MidiConfig::default(),
        }
    }
}

/// ~/.chordbeat, or ./.chordbeat without a home directory.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default path for the settings file.
pub fn default_settings_path() -> PathBuf {
    app_dir().join("settings.yaml")
}

/// Load settings from a YAML file. Returns defaults if the file doesn't exist.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_yaml::from_str(&content)?;
    Ok(settings.normalized())
}

/// Save settings to a YAML file, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
