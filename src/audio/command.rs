//! Messages from the UI thread to the click voice.

/// Click-voice control message. Carried over the ring buffer; never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickCommand {
    /// Start the click from its first sample, cutting off any click in flight.
    Trigger,
    /// Output gain, 0.0 to 1.0.
    SetVolume(f32),
    /// Cut the current click short.
    Silence,
}
