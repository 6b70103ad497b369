//! Chord builder — absolute pitches for a key/scale/degree/quality/octave.

use crate::theory::{ChordQuality, Key, Pitch, Scale, TheoryError};

/// Build the pitches of a chord.
///
/// `octave` is the octave label of the tonic (C4 = 60), so
/// `root = key + scale offset of degree + (octave + 1) * 12`. The result is the
/// root plus each interval of `quality`, in table order.
///
/// Fails with [`TheoryError::InvalidDegree`] when `degree` is not 0–6 and with
/// [`TheoryError::OctaveOutOfRange`] when the root does not fit a [`Pitch`].
pub fn build(
    key: Key,
    scale: Scale,
    degree: usize,
    quality: ChordQuality,
    octave: i32,
) -> Result<Vec<Pitch>, TheoryError> {
    let offset = scale.offset(degree)?;
    let root = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(key.semitone() + offset))
        .ok_or(TheoryError::OctaveOutOfRange(octave))?;

    quality
        .intervals()
        .iter()
        .map(|&interval| {
            root.checked_add(interval)
                .ok_or(TheoryError::OctaveOutOfRange(octave))
        })
        .collect()
}
