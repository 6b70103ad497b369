//! Chordbeat — a terminal chord trainer. Play the target chord, advance on the beat.

pub mod audio;
pub mod chord;
pub mod clock;
pub mod input;
pub mod midi;
pub mod session;
pub mod settings;
pub mod theory;
pub mod tui;
