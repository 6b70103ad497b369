//! Note names — pitch to "C4"/"F#3" labels, pitch-class parsing, and the sharp-only name table.

use super::Pitch;

/// Pitch-class names, sharps only. Index = semitones above C.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of a pitch class (any integer; reduced mod 12).
pub fn pitch_class_name(pitch_class: i32) -> &'static str {
    NOTE_NAMES[pitch_class.rem_euclid(12) as usize]
}

/// Octave label of a pitch, with 60 = C4.
pub fn octave_of(pitch: Pitch) -> i32 {
    pitch.div_euclid(12) - 1
}

/// Format a pitch as name + octave, e.g. 60 → "C4", 70 → "A#4".
pub fn pitch_name(pitch: Pitch) -> String {
    format!("{}{}", pitch_class_name(pitch), octave_of(pitch))
}

/// Parse a pitch-class name ("C", "F#", "Bb", "e") into semitones above C.
///
/// Flats are accepted on input and folded onto the sharp spelling.
pub fn parse_pitch_class(name: &str) -> Option<i32> {
    let mut chars = name.trim().chars();
    let base: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let accidental = match chars.next() {
        None => 0,
        Some('#') => 1,
        Some('b') => -1,
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some((base + accidental).rem_euclid(12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c() {
        assert_eq!(pitch_name(60), "C4");
    }

    #[test]
    fn sharps_only_on_output() {
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(70), "A#4");
    }

    #[test]
    fn low_and_negative_octaves() {
        assert_eq!(pitch_name(0), "C-1");
        assert_eq!(pitch_name(11), "B-1");
        assert_eq!(pitch_name(-1), "B-2");
        assert_eq!(octave_of(127), 9);
    }

    #[test]
    fn pitch_class_wraps() {
        assert_eq!(pitch_class_name(12), "C");
        assert_eq!(pitch_class_name(-1), "B");
        assert_eq!(pitch_class_name(26), "D");
    }

    #[test]
    fn parse_pitch_classes() {
        assert_eq!(parse_pitch_class("C"), Some(0));
        assert_eq!(parse_pitch_class("f#"), Some(6));
        assert_eq!(parse_pitch_class("Bb"), Some(10));
        assert_eq!(parse_pitch_class("Cb"), Some(11));
        assert_eq!(parse_pitch_class("H"), None);
        assert_eq!(parse_pitch_class("C##"), None);
        assert_eq!(parse_pitch_class(""), None);
    }

    #[test]
    fn every_midi_note_names_its_own_pitch_class() {
        for pitch in 0..=127 {
            let name = pitch_name(pitch);
            let class = name.trim_end_matches(|c: char| c == '-' || c.is_ascii_digit());
            assert_eq!(parse_pitch_class(class), Some(pitch % 12));
            assert!(name.ends_with(&octave_of(pitch).to_string()));
        }
    }
}
