//! MIDI input — the hardware/software transport that feeds note events.

pub mod config;
pub mod input;
pub mod mapping;

pub use config::MidiConfig;
pub use input::{MidiError, MidiInput};
pub use mapping::decode_message;
