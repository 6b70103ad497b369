//! MIDI input — connects to a MIDI device and forwards note events.

use midir::{MidiInput as MidirInput, MidiInputConnection};
use thiserror::Error;

use super::config::MidiConfig;
use super::mapping::decode_message;
use crate::input::InputSender;

/// Failure to open a MIDI input.
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("MIDI init: {0}")]
    Init(String),
    #[error("no MIDI input ports available")]
    NoPorts,
    #[error("MIDI device matching '{0}' not found")]
    DeviceNotFound(String),
    #[error("MIDI connect: {0}")]
    Connect(String),
}

/// Active MIDI input connection. Dropping it closes the port.
pub struct MidiInput {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl MidiInput {
    /// Open the port chosen by [`MidiConfig::select_port`] and forward decoded
    /// note events to `sender` from the midir thread.
    pub fn start(config: &MidiConfig, sender: InputSender) -> Result<Self, MidiError> {
        let midi_in =
            MidirInput::new("chordbeat").map_err(|e| MidiError::Init(e.to_string()))?;

        let ports = midi_in.ports();
        if ports.is_empty() {
            return Err(MidiError::NoPorts);
        }
        let names: Vec<String> = ports
            .iter()
            .map(|p| midi_in.port_name(p).unwrap_or_else(|_| "unknown".to_string()))
            .collect();
        tracing::debug!(?names, "MIDI input ports");

        let index = config.select_port(&names).ok_or_else(|| {
            MidiError::DeviceNotFound(config.device_name.clone().unwrap_or_default())
        })?;
        let port = &ports[index];
        let port_name = names[index].clone();

        let channel_filter = config.channel_filter;
        let connection = midi_in
            .connect(
                port,
                "chordbeat-input",
                move |_timestamp, msg, _| {
                    if let Some(event) = decode_message(msg, channel_filter) {
                        // Receiver gone means the app is shutting down.
                        let _ = sender.send(event);
                    }
                },
                (),
            )
            .map_err(|e| MidiError::Connect(e.to_string()))?;

        tracing::info!(port = %port_name, "MIDI input connected");
        Ok(Self {
            _connection: connection,
            port_name,
        })
    }

    /// Get the connected port name.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// List all available MIDI input device names.
    pub fn list_devices() -> Vec<String> {
        let Ok(midi_in) = MidirInput::new("chordbeat-list") else {
            return Vec::new();
        };
        midi_in
            .ports()
            .iter()
            .filter_map(|p| midi_in.port_name(p).ok())
            .collect()
    }
}
