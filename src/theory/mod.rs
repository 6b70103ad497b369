//! Theory tables — scales, chord qualities, and diatonic harmony.
//!
//! Pure constant data. Three tables are exposed and kept mutually consistent:
//!
//! - [`Scale::offsets`]: seven ascending semitone offsets from the tonic
//! - [`ChordQuality::intervals`]: semitone offsets from a chord root
//! - [`Scale::diatonic_qualities`]: the canonical chord quality per scale degree

pub mod error;
pub mod note;

pub use error::TheoryError;
pub use note::{octave_of, parse_pitch_class, pitch_class_name, pitch_name, NOTE_NAMES};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A performable note. 60 = C4, one step per semitone.
pub type Pitch = i32;

/// Number of degrees in every supported scale.
pub const DEGREES_PER_SCALE: usize = 7;

/// Tonic of the active scale, as a semitone offset from C (0–11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(u8);

impl Key {
    pub const C: Key = Key(0);

    /// Build a key from a semitone offset. Rejects anything outside 0–11.
    pub fn new(semitone: i32) -> Result<Self, TheoryError> {
        if (0..12).contains(&semitone) {
            Ok(Self(semitone as u8))
        } else {
            Err(TheoryError::InvalidKey(semitone.to_string()))
        }
    }

    pub fn semitone(self) -> i32 {
        self.0 as i32
    }

    /// Sharp-spelled name of the tonic.
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Key a semitone up (wraps B → C).
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 12)
    }

    /// Key a semitone down (wraps C → B).
    pub fn prev(self) -> Self {
        Self((self.0 + 11) % 12)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a note name ("F#", "Bb") or a semitone number ("6").
impl FromStr for Key {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Key::new(n);
        }
        parse_pitch_class(s)
            .map(|pc| Key(pc as u8))
            .ok_or_else(|| TheoryError::InvalidKey(s.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}

/// Supported scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Major,
    /// Natural minor (aeolian).
    Minor,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::Major, Scale::Minor];

    /// Semitone offsets of scale degrees 0–6 from the tonic.
    pub fn offsets(self) -> &'static [i32; DEGREES_PER_SCALE] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Canonical triad quality for each scale degree.
    pub fn diatonic_qualities(self) -> &'static [ChordQuality; DEGREES_PER_SCALE] {
        use ChordQuality::*;
        match self {
            Self::Major => &[Major, Minor, Minor, Major, Major, Minor, Dim],
            Self::Minor => &[Minor, Dim, Major, Minor, Minor, Major, Major],
        }
    }

    /// Semitone offset of one degree, or [`TheoryError::InvalidDegree`].
    pub fn offset(self, degree: usize) -> Result<i32, TheoryError> {
        self.offsets()
            .get(degree)
            .copied()
            .ok_or(TheoryError::InvalidDegree {
                degree,
                len: DEGREES_PER_SCALE,
            })
    }

    /// Canonical quality of one degree, or [`TheoryError::InvalidDegree`].
    pub fn diatonic_quality(self, degree: usize) -> Result<ChordQuality, TheoryError> {
        self.diatonic_qualities()
            .get(degree)
            .copied()
            .ok_or(TheoryError::InvalidDegree {
                degree,
                len: DEGREES_PER_SCALE,
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
        }
    }

    /// Cycle to the other scale.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scale {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" | "ionian" => Ok(Self::Major),
            "minor" | "min" | "aeolian" => Ok(Self::Minor),
            other => Err(TheoryError::UnknownScale(other.to_string())),
        }
    }
}

/// Chord qualities the trainer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Dim,
    Maj7,
    Min7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 5] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dim,
        ChordQuality::Maj7,
        ChordQuality::Min7,
    ];

    /// Semitone offsets from the chord root. Always starts with 0.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Dim => &[0, 3, 6],
            Self::Maj7 => &[0, 4, 7, 11],
            Self::Min7 => &[0, 3, 7, 10],
        }
    }

    /// Display name, e.g. "maj7".
    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Dim => "dim",
            Self::Maj7 => "maj7",
            Self::Min7 => "min7",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.name() == s.trim())
            .ok_or_else(|| TheoryError::InvalidQuality(s.to_string()))
    }
}
