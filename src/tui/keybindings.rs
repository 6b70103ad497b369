//! Key bindings — maps key events to application actions.
//!
//! The home row doubles as a two-octave piano for playing without a MIDI
//! device. Lower case plays the octave starting at the C at or below the
//! target's root; holding Shift plays the octave above it:
//!
//! ```text
//!  w e   t y u
//! a s d f g h j k
//! C D E F G A B C
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application-level actions triggered by key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Skip to a new target chord now.
    NewChord,
    /// Start/stop the metronome.
    ToggleClock,
    /// Change tempo by the given BPM delta.
    AdjustBpm(i32),
    /// Move the key up (+1) or down (-1) a semitone.
    ShiftKey(i32),
    /// Switch between major and minor.
    ToggleScale,
    /// Move the chord octave up or down.
    ShiftOctave(i32),
    /// Switch between exact and allow-extra matching.
    TogglePolicy,
    /// Toggle a note on the computer-keyboard piano (semitones above the
    /// piano's lowest C, 0..=24).
    PianoKey(i32),
    /// Release every held note.
    ReleaseAll,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Close overlays.
    Escape,
}

/// Shift moves a piano key up by this many semitones.
const OCTAVE: i32 = 12;

/// BPM step for the arrow keys.
pub const BPM_STEP: i32 = 5;

/// Semitones above C for a piano-row key, in the lower octave.
pub fn piano_offset(c: char) -> Option<i32> {
    let offset = match c {
        'a' => 0,
        'w' => 1,
        's' => 2,
        'e' => 3,
        'd' => 4,
        'f' => 5,
        't' => 6,
        'g' => 7,
        'y' => 8,
        'h' => 9,
        'u' => 10,
        'j' => 11,
        'k' => 12,
        _ => return None,
    };
    Some(offset)
}

/// Map a key event to an action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Escape),
        KeyCode::Enter => Some(Action::NewChord),
        KeyCode::Char(' ') => Some(Action::ToggleClock),
        KeyCode::Up => Some(Action::AdjustBpm(BPM_STEP)),
        KeyCode::Down => Some(Action::AdjustBpm(-BPM_STEP)),
        KeyCode::Right => Some(Action::ShiftKey(1)),
        KeyCode::Left => Some(Action::ShiftKey(-1)),
        KeyCode::Tab => Some(Action::ToggleScale),
        KeyCode::Char(']') => Some(Action::ShiftOctave(1)),
        KeyCode::Char('[') => Some(Action::ShiftOctave(-1)),
        KeyCode::Backspace => Some(Action::ReleaseAll),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('m') if !shift => Some(Action::TogglePolicy),
        KeyCode::Char('q') if !shift => Some(Action::Quit),
        KeyCode::Char(c) if c.is_ascii_uppercase() => piano_offset(c.to_ascii_lowercase())
            .map(|offset| Action::PianoKey(offset + OCTAVE)),
        KeyCode::Char(c) if !shift => piano_offset(c).map(Action::PianoKey),
        _ => None,
    }
}

/// Help text lines: (keys, description).
pub fn help_entries() -> &'static [(&'static str, &'static str)] {
    &[
        ("a w s e d f t g y h u j k", "toggle notes C..C"),
        ("Shift + piano key", "same note an octave up"),
        ("Backspace", "release all notes"),
        ("Enter", "new chord now"),
        ("Space", "start/stop metronome"),
        ("Up / Down", "tempo +/- 5 BPM"),
        ("Left / Right", "key down/up a semitone"),
        ("Tab", "major / minor"),
        ("[ / ]", "octave down/up"),
        ("m", "exact / allow-extra matching"),
        ("?", "toggle help"),
        ("q / Ctrl-C", "quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn piano_row_covers_an_octave() {
        let offsets: Vec<i32> = "awsedftgyhujk".chars().filter_map(piano_offset).collect();
        assert_eq!(offsets, (0..=12).collect::<Vec<_>>());
    }

    #[test]
    fn piano_keys_map_to_actions() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(Action::PianoKey(0)));
        assert_eq!(map_key(key(KeyCode::Char('k'))), Some(Action::PianoKey(12)));
    }

    #[test]
    fn shifted_piano_keys_play_upper_octave() {
        let shifted = |c| KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(shifted('A')), Some(Action::PianoKey(12)));
        assert_eq!(map_key(shifted('J')), Some(Action::PianoKey(23)));
        assert_eq!(map_key(shifted('K')), Some(Action::PianoKey(24)));
        // Some terminals report the capital without the modifier.
        assert_eq!(map_key(key(KeyCode::Char('E'))), Some(Action::PianoKey(15)));
        assert_eq!(map_key(shifted('Q')), None);
        assert_eq!(map_key(shifted('?')), Some(Action::ToggleHelp));
    }

    #[test]
    fn quit_bindings() {
        assert_eq!(map_key(ctrl('c')), Some(Action::Quit));
        assert_eq!(map_key(ctrl('q')), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn transport_and_config_bindings() {
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::NewChord));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::ToggleClock));
        assert_eq!(map_key(key(KeyCode::Up)), Some(Action::AdjustBpm(5)));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Action::AdjustBpm(-5)));
        assert_eq!(map_key(key(KeyCode::Left)), Some(Action::ShiftKey(-1)));
        assert_eq!(map_key(key(KeyCode::Tab)), Some(Action::ToggleScale));
        assert_eq!(map_key(key(KeyCode::Char(']'))), Some(Action::ShiftOctave(1)));
        assert_eq!(map_key(key(KeyCode::Char('m'))), Some(Action::TogglePolicy));
    }

    #[test]
    fn unbound_keys_return_none() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::F(5))), None);
        assert_eq!(map_key(ctrl('a')), None);
    }

    #[test]
    fn help_lists_every_binding_group() {
        assert!(help_entries().len() >= 10);
        assert!(help_entries().iter().any(|(k, _)| k.contains("Enter")));
    }
}
