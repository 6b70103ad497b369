//! Music configuration — key, scale and octave the generator reads from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::theory::{Key, Scale};

/// Lowest octave the front end will step down to.
pub const MIN_OCTAVE: i32 = 0;
/// Highest octave whose diatonic triads all stay within MIDI range (0–127).
pub const MAX_OCTAVE: i32 = 7;

/// Key, scale and octave used for every new target chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default)]
    pub key: Key,
    #[serde(default)]
    pub scale: Scale,
    /// Octave label of the tonic; 4 puts C at 60.
    #[serde(default = "MusicConfig::default_octave")]
    pub octave: i32,
}

impl MusicConfig {
    fn default_octave() -> i32 {
        4
    }

    /// Copy with the key moved up a semitone.
    pub fn with_next_key(self) -> Self {
        Self {
            key: self.key.next(),
            ..self
        }
    }

    /// Copy with the key moved down a semitone.
    pub fn with_prev_key(self) -> Self {
        Self {
            key: self.key.prev(),
            ..self
        }
    }

    /// Copy with the other scale.
    pub fn with_next_scale(self) -> Self {
        Self {
            scale: self.scale.next(),
            ..self
        }
    }

    /// Copy with the octave shifted by `delta`, clamped to the playable range.
    pub fn with_octave_shift(self, delta: i32) -> Self {
        Self {
            octave: (self.octave + delta).clamp(MIN_OCTAVE, MAX_OCTAVE),
            ..self
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            key: Key::C,
            scale: Scale::Major,
            octave: Self::default_octave(),
        }
    }
}

impl fmt::Display for MusicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (oct {})", self.key, self.scale, self.octave)
    }
}
