//! MIDI message decoding — raw bytes to note events.

use crate::input::InputEvent;

/// Decode a raw MIDI message into a note event.
///
/// - Note On:  `[0x90 | channel, note, velocity]`; velocity 0 means note-off
/// - Note Off: `[0x80 | channel, note, velocity]`
///
/// Everything else (CC, program change, clock, sysex) is ignored, as are
/// messages on channels other than `channel_filter` when one is set.
pub fn decode_message(msg: &[u8], channel_filter: Option<u8>) -> Option<InputEvent> {
    let (&status_byte, data) = msg.split_first()?;
    let status = status_byte & 0xF0;
    let channel = status_byte & 0x0F;

    if let Some(filter) = channel_filter {
        if channel != filter {
            return None;
        }
    }

    match (status, data) {
        (0x90, &[note, velocity, ..]) if velocity > 0 => Some(InputEvent::NoteOn {
            note: note & 0x7F,
            velocity,
        }),
        (0x90, &[note, 0, ..]) | (0x80, &[note, _, ..]) => {
            Some(InputEvent::NoteOff { note: note & 0x7F })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on() {
        assert_eq!(
            decode_message(&[0x90, 60, 100], None),
            Some(InputEvent::NoteOn {
                note: 60,
                velocity: 100
            })
        );
    }

    #[test]
    fn note_on_velocity_zero_is_note_off() {
        assert_eq!(
            decode_message(&[0x90, 64, 0], None),
            Some(InputEvent::NoteOff { note: 64 })
        );
    }

    #[test]
    fn note_off() {
        assert_eq!(
            decode_message(&[0x83, 67, 40], None),
            Some(InputEvent::NoteOff { note: 67 })
        );
    }

    #[test]
    fn other_channels_decode_without_filter() {
        assert!(matches!(
            decode_message(&[0x9F, 60, 1], None),
            Some(InputEvent::NoteOn { .. })
        ));
    }

    #[test]
    fn channel_filter_passes() {
        assert!(decode_message(&[0x92, 60, 90], Some(2)).is_some());
    }

    #[test]
    fn channel_filter_blocks() {
        assert!(decode_message(&[0x91, 60, 90], Some(0)).is_none());
    }

    #[test]
    fn control_change_ignored() {
        assert!(decode_message(&[0xB0, 1, 64], None).is_none());
    }

    #[test]
    fn program_change_ignored() {
        assert!(decode_message(&[0xC0, 5], None).is_none());
    }

    #[test]
    fn truncated_message_ignored() {
        assert!(decode_message(&[0x90, 60], None).is_none());
        assert!(decode_message(&[0x80], None).is_none());
    }

    #[test]
    fn empty_message_returns_none() {
        assert!(decode_message(&[], None).is_none());
    }

    #[test]
    fn realtime_clock_ignored() {
        assert!(decode_message(&[0xF8], None).is_none());
    }
}
