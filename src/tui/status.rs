//! Status bar — tempo, key, beat counter, match policy, and device state.

use crate::chord::MatchPolicy;
use crate::session::MusicConfig;

/// Status information for the TUI status bar.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub bpm: f64,
    pub music: MusicConfig,
    pub policy: MatchPolicy,
    pub clock_running: bool,
    /// Beats delivered since start.
    pub beats: u64,
    /// Chords solved since start.
    pub solved: u64,
    pub midi_port: Option<String>,
    pub audio_device: Option<String>,
}

impl StatusInfo {
    /// Beat within a 4/4 bar, 1-based.
    pub fn beat_in_bar(&self) -> u64 {
        self.beats % 4 + 1
    }

    pub fn clock_display(&self) -> &str {
        if self.clock_running {
            "RUN"
        } else {
            "HOLD"
        }
    }

    pub fn policy_display(&self) -> &str {
        match self.policy {
            MatchPolicy::Exact => "exact",
            MatchPolicy::AllowExtra => "extra ok",
        }
    }

    /// "MIDI: <port>" or "MIDI: keyboard".
    pub fn input_display(&self) -> String {
        match &self.midi_port {
            Some(port) => format!("MIDI: {}", truncate(port, 16)),
            None => "MIDI: keyboard".to_string(),
        }
    }

    pub fn audio_display(&self) -> String {
        match &self.audio_device {
            Some(device) => truncate(device, 12),
            None => "NO AUDIO".to_string(),
        }
    }
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            bpm: 60.0,
            music: MusicConfig::default(),
            policy: MatchPolicy::Exact,
            clock_running: false,
            beats: 0,
            solved: 0,
            midi_port: None,
            audio_device: None,
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('\u{2026}');
        t
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beat_in_bar_wraps() {
        let mut status = StatusInfo::default();
        assert_eq!(status.beat_in_bar(), 1);
        status.beats = 3;
        assert_eq!(status.beat_in_bar(), 4);
        status.beats = 4;
        assert_eq!(status.beat_in_bar(), 1);
    }

    #[test]
    fn clock_display() {
        let running = StatusInfo {
            clock_running: true,
            ..Default::default()
        };
        assert_eq!(running.clock_display(), "RUN");
        assert_eq!(StatusInfo::default().clock_display(), "HOLD");
    }

    #[test]
    fn policy_display() {
        let lenient = StatusInfo {
            policy: MatchPolicy::AllowExtra,
            ..Default::default()
        };
        assert_eq!(lenient.policy_display(), "extra ok");
        assert_eq!(StatusInfo::default().policy_display(), "exact");
    }

    #[test]
    fn device_labels() {
        let status = StatusInfo {
            midi_port: Some("Arturia KeyStep 37 MIDI 1".into()),
            audio_device: Some("Built-in Output".into()),
            ..Default::default()
        };
        assert_eq!(status.input_display(), "MIDI: Arturia KeyStep\u{2026}");
        assert_eq!(status.audio_display(), "Built-in Ou\u{2026}");
        assert_eq!(StatusInfo::default().input_display(), "MIDI: keyboard");
        assert_eq!(StatusInfo::default().audio_display(), "NO AUDIO");
    }
}
