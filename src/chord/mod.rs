//! Chords — generation of diatonic targets, naming, and match evaluation.
//!
//! [`generate`] picks a degree from a [`DegreeSource`], looks up the scale's
//! canonical quality for it, and builds the pitches with [`builder::build`].
//! The resulting [`Chord`] is immutable; the session replaces it on advance.

pub mod builder;
pub mod degree;
pub mod matcher;

pub use builder::build;
pub use degree::{DegreeSource, FixedDegrees, RandomDegrees};
pub use matcher::{evaluate, evaluate_with, MatchPolicy};

use crate::session::MusicConfig;
use crate::theory::{pitch_class_name, ChordQuality, Pitch, TheoryError, DEGREES_PER_SCALE};

/// A generated target chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    degree: usize,
    quality: ChordQuality,
    notes: Vec<Pitch>,
}

impl Chord {
    /// Assemble a chord from already-computed parts.
    ///
    /// Prefer [`generate`]; this exists for callers that need a fixed target.
    /// `notes` must spell `quality` from its first pitch.
    pub fn from_parts(degree: usize, quality: ChordQuality, notes: Vec<Pitch>) -> Self {
        debug_assert!(
            spells_quality(&notes, quality),
            "notes {notes:?} do not spell a {quality} chord"
        );
        Self {
            degree,
            quality,
            notes,
        }
    }

    /// Scale degree of the root (0–6).
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Pitches, root first, in interval-table order.
    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    pub fn root(&self) -> Option<Pitch> {
        self.notes.first().copied()
    }
}

/// True when `notes` is the interval table of `quality` stacked on its first pitch.
fn spells_quality(notes: &[Pitch], quality: ChordQuality) -> bool {
    let intervals = quality.intervals();
    notes.len() == intervals.len()
        && notes
            .iter()
            .zip(intervals)
            .all(|(&note, &interval)| note - notes[0] == interval)
}

/// Generate a random diatonic chord for `config`.
///
/// The quality is never chosen independently: it is always the scale's
/// canonical quality for the drawn degree.
pub fn generate(
    config: &MusicConfig,
    source: &mut dyn DegreeSource,
) -> Result<Chord, TheoryError> {
    let degree = source.next_degree(DEGREES_PER_SCALE);
    generate_degree(config, degree)
}

/// Build the diatonic chord on a specific degree.
pub fn generate_degree(config: &MusicConfig, degree: usize) -> Result<Chord, TheoryError> {
    let quality = config.scale.diatonic_quality(degree)?;
    let notes = build(config.key, config.scale, degree, quality, config.octave)?;
    Ok(Chord {
        degree,
        quality,
        notes,
    })
}

/// Human-readable label, e.g. "D minor".
///
/// The root is spelled from the key and scale in `config`, sharps only.
pub fn name(chord: &Chord, config: &MusicConfig) -> String {
    let Ok(offset) = config.scale.offset(chord.degree) else {
        return String::new();
    };
    let root = pitch_class_name(config.key.semitone() + offset);
    format!("{root} {}", chord.quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{Key, Scale};

    fn c_major_config() -> MusicConfig {
        MusicConfig {
            key: Key::C,
            scale: Scale::Major,
            octave: 4,
        }
    }

    #[test]
    fn tonic_of_c_major() {
        let config = c_major_config();
        let chord = generate(&config, &mut FixedDegrees::constant(0)).unwrap();
        assert_eq!(chord.notes(), &[60, 64, 67]);
        assert_eq!(chord.quality(), ChordQuality::Major);
        assert_eq!(name(&chord, &config), "C major");
    }

    #[test]
    fn supertonic_of_c_major() {
        let config = c_major_config();
        let chord = generate(&config, &mut FixedDegrees::constant(1)).unwrap();
        assert_eq!(chord.quality(), ChordQuality::Minor);
        assert_eq!(chord.notes(), &[62, 65, 69]);
        assert_eq!(name(&chord, &config), "D minor");
    }

    #[test]
    fn quality_always_follows_diatonic_table() {
        for scale in Scale::ALL {
            let config = MusicConfig {
                key: Key::new(5).unwrap(),
                scale,
                octave: 3,
            };
            for degree in 0..DEGREES_PER_SCALE {
                let chord = generate(&config, &mut FixedDegrees::constant(degree)).unwrap();
                assert_eq!(chord.degree(), degree);
                assert_eq!(chord.quality(), scale.diatonic_qualities()[degree]);
            }
        }
    }

    #[test]
    fn random_generation_is_diatonic() {
        let config = MusicConfig {
            key: Key::new(2).unwrap(),
            scale: Scale::Minor,
            octave: 4,
        };
        let mut source = RandomDegrees::from_seed(1234);
        for _ in 0..200 {
            let chord = generate(&config, &mut source).unwrap();
            assert_eq!(
                chord.quality(),
                Scale::Minor.diatonic_qualities()[chord.degree()]
            );
            assert_eq!(chord.notes().len(), chord.quality().intervals().len());
        }
    }

    #[test]
    fn names_use_sharps_and_wrap() {
        let config = MusicConfig {
            key: Key::new(10).unwrap(),
            scale: Scale::Major,
            octave: 4,
        };
        let tonic = generate_degree(&config, 0).unwrap();
        assert_eq!(name(&tonic, &config), "A# major");
        // Leading tone of A# major is A.
        let leading = generate_degree(&config, 6).unwrap();
        assert_eq!(name(&leading, &config), "A dim");
    }

    #[test]
    fn minor_scale_names() {
        let config = MusicConfig {
            key: Key::new(9).unwrap(),
            scale: Scale::Minor,
            octave: 4,
        };
        let names: Vec<String> = (0..DEGREES_PER_SCALE)
            .map(|d| name(&generate_degree(&config, d).unwrap(), &config))
            .collect();
        assert_eq!(
            names,
            vec![
                "A minor", "B dim", "C major", "D minor", "E minor", "F major", "G major"
            ]
        );
    }

    #[test]
    fn name_is_a_function_of_chord_and_config() {
        let config = c_major_config();
        let chord = generate_degree(&config, 4).unwrap();
        assert_eq!(name(&chord, &config), name(&chord, &config));
        let g_config = MusicConfig {
            key: Key::new(7).unwrap(),
            ..config
        };
        assert_eq!(name(&chord, &g_config), "D major");
    }

    #[test]
    fn invalid_degree_fails_cleanly() {
        let err = generate_degree(&c_major_config(), 7).unwrap_err();
        assert_eq!(err, TheoryError::InvalidDegree { degree: 7, len: 7 });
    }

    #[test]
    fn hand_built_chord_with_bad_degree_has_empty_name() {
        let chord = Chord::from_parts(12, ChordQuality::Major, vec![60, 64, 67]);
        assert_eq!(name(&chord, &c_major_config()), "");
    }

    #[test]
    fn chord_accessors() {
        let chord = generate_degree(&c_major_config(), 3).unwrap();
        assert_eq!(chord.root(), Some(65));
    }

    #[test]
    fn generated_chords_spell_their_quality() {
        let config = c_major_config();
        for degree in 0..DEGREES_PER_SCALE {
            let chord = generate_degree(&config, degree).unwrap();
            assert!(spells_quality(chord.notes(), chord.quality()));
        }
        assert!(!spells_quality(&[60, 63, 67], ChordQuality::Major));
        assert!(!spells_quality(&[60, 64], ChordQuality::Major));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "do not spell")]
    fn from_parts_rejects_mismatched_notes() {
        Chord::from_parts(0, ChordQuality::Minor, vec![60, 64, 67]);
    }
}
