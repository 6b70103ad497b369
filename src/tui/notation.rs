//! Text notation — the target chord on a treble staff, plus a note list.
//!
//! Pure functions only; the draw code turns the results into styled spans.

use std::collections::BTreeSet;

use crate::chord::Chord;
use crate::theory::note::octave_of;
use crate::theory::{pitch_name, Pitch};

/// Diatonic step of E4, the bottom line of the treble staff.
const BOTTOM_LINE_STEP: i32 = 30;
/// Diatonic step of F5, the top line.
const TOP_LINE_STEP: i32 = 38;

/// Letter index (C=0 … B=6) per pitch class, sharps sharing their natural.
const LETTER_OF_CLASS: [i32; 12] = [0, 0, 1, 1, 2, 3, 3, 4, 4, 5, 5, 6];

/// How a note should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Target note not yet held.
    Pending,
    /// Target note currently held.
    Held,
    /// Held note that is not part of the target.
    Extra,
}

/// One labelled note for the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMark {
    pub pitch: Pitch,
    pub label: String,
    pub kind: MarkKind,
}

/// Target notes in chord order, followed by extra held notes ascending.
pub fn note_marks(target: Option<&Chord>, active: &BTreeSet<Pitch>) -> Vec<NoteMark> {
    let target_notes = target.map(Chord::notes).unwrap_or_default();
    let mut marks: Vec<NoteMark> = target_notes
        .iter()
        .map(|&pitch| NoteMark {
            pitch,
            label: pitch_name(pitch),
            kind: if active.contains(&pitch) {
                MarkKind::Held
            } else {
                MarkKind::Pending
            },
        })
        .collect();

    marks.extend(
        active
            .iter()
            .filter(|p| !target_notes.contains(*p))
            .map(|&pitch| NoteMark {
                pitch,
                label: pitch_name(pitch),
                kind: MarkKind::Extra,
            }),
    );
    marks
}

/// Staff position counted in letter steps, so C4 = 28 and E4 = 30.
pub fn staff_step(pitch: Pitch) -> i32 {
    octave_of(pitch) * 7 + LETTER_OF_CLASS[pitch.rem_euclid(12) as usize]
}

fn is_sharp(pitch: Pitch) -> bool {
    matches!(pitch.rem_euclid(12), 1 | 3 | 6 | 8 | 10)
}

/// Render the target chord on a treble staff, top row first.
///
/// Held notes draw as `●`, pending ones as `○`; sharps get a `#` prefix.
/// Ledger lines are drawn only as far as the outermost note.
pub fn render_staff(target: &[Pitch], active: &BTreeSet<Pitch>) -> Vec<String> {
    let steps: Vec<i32> = target.iter().map(|&p| staff_step(p)).collect();
    let high = steps.iter().copied().max().unwrap_or(TOP_LINE_STEP).max(TOP_LINE_STEP);
    let low = steps.iter().copied().min().unwrap_or(BOTTOM_LINE_STEP).min(BOTTOM_LINE_STEP);

    (low..=high)
        .rev()
        .map(|step| {
            let on_line = (step - BOTTOM_LINE_STEP).rem_euclid(2) == 0;
            let in_staff = (BOTTOM_LINE_STEP..=TOP_LINE_STEP).contains(&step);
            let line = on_line && in_staff;
            let ledger = on_line && !in_staff;

            let here: Vec<Pitch> = target
                .iter()
                .copied()
                .filter(|&p| staff_step(p) == step)
                .collect();

            let head = if here.is_empty() {
                None
            } else if here.iter().any(|p| active.contains(p)) {
                Some('●')
            } else {
                Some('○')
            };
            let accidental = if here.iter().any(|&p| is_sharp(p)) { '#' } else { ' ' };

            let fill = if line { '─' } else { ' ' };
            let side: String = std::iter::repeat(fill).take(6).collect();
            let center = match (head, ledger) {
                (Some(h), true) => format!("{accidental}─{h}─"),
                (Some(h), false) => format!("{accidental}{fill}{h}{fill}"),
                (None, _) if line => "────".to_string(),
                (None, _) => "    ".to_string(),
            };
            format!("{side}{center}{side}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::ChordQuality;

    fn held(notes: &[Pitch]) -> BTreeSet<Pitch> {
        notes.iter().copied().collect()
    }

    fn c_major() -> Chord {
        Chord::from_parts(0, ChordQuality::Major, vec![60, 64, 67])
    }

    #[test]
    fn marks_follow_chord_order() {
        let marks = note_marks(Some(&c_major()), &held(&[64]));
        let labels: Vec<&str> = marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["C4", "E4", "G4"]);
        assert_eq!(marks[0].kind, MarkKind::Pending);
        assert_eq!(marks[1].kind, MarkKind::Held);
    }

    #[test]
    fn extra_notes_listed_after_target() {
        let marks = note_marks(Some(&c_major()), &held(&[72, 60, 61]));
        let extras: Vec<(Pitch, MarkKind)> = marks[3..].iter().map(|m| (m.pitch, m.kind)).collect();
        assert_eq!(extras, vec![(61, MarkKind::Extra), (72, MarkKind::Extra)]);
    }

    #[test]
    fn no_target_lists_only_held() {
        let marks = note_marks(None, &held(&[60]));
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].kind, MarkKind::Extra);
    }

    #[test]
    fn staff_steps() {
        assert_eq!(staff_step(60), 28);
        assert_eq!(staff_step(61), 28);
        assert_eq!(staff_step(64), 30);
        assert_eq!(staff_step(77), 38);
    }

    #[test]
    fn empty_staff_has_five_lines() {
        let rows = render_staff(&[], &BTreeSet::new());
        assert_eq!(rows.len(), 9);
        assert_eq!(rows.iter().filter(|r| r.contains('─')).count(), 5);
    }

    #[test]
    fn middle_c_gets_a_ledger_line() {
        let rows = render_staff(&[60, 64, 67], &BTreeSet::new());
        // F5 down to C4.
        assert_eq!(rows.len(), 11);
        let bottom = rows.last().unwrap();
        assert!(bottom.contains("─○─"));
        assert!(bottom.starts_with("      "));
    }

    #[test]
    fn held_notes_are_filled() {
        let rows = render_staff(&[60, 64, 67], &held(&[64]));
        // E4 is the bottom staff line, one row above C4's ledger and D4's space.
        let e4_row = &rows[rows.len() - 3];
        assert!(e4_row.contains('●'));
        assert!(e4_row.starts_with("──────"));
    }

    #[test]
    fn sharps_are_marked() {
        let rows = render_staff(&[66], &BTreeSet::new());
        let row = rows.iter().find(|r| r.contains('○')).unwrap();
        assert!(row.contains('#'));
    }

    #[test]
    fn rows_have_equal_width() {
        let rows = render_staff(&[55, 59, 62, 66], &held(&[59]));
        let width = rows[0].chars().count();
        assert!(rows.iter().all(|r| r.chars().count() == width));
    }
}
