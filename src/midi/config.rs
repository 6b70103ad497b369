//! MIDI configuration — device selection and channel filtering.

use serde::{Deserialize, Serialize};

/// Which MIDI device to open and which channel to listen on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiConfig {
    /// Preferred MIDI device name (substring match). None = first available.
    #[serde(default)]
    pub device_name: Option<String>,
    /// Only accept messages on this MIDI channel (0-15). None = all channels.
    #[serde(default)]
    pub channel_filter: Option<u8>,
}

impl MidiConfig {
    /// Index of the port to open among `names`: the first whose name contains
    /// `device_name` (case-insensitive), or the first port when no name is set.
    pub fn select_port(&self, names: &[String]) -> Option<usize> {
        match self.device_name.as_deref() {
            None => (!names.is_empty()).then_some(0),
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                names
                    .iter()
                    .position(|name| name.to_lowercase().contains(&wanted))
            }
        }
    }
}
