//! Input channel — mpsc bridge carrying note events from transport threads
//! (MIDI callback, keyboard) to the single-threaded event loop.
//!
//! Every event is stamped with the [`Instant`] it was sent, so the loop can
//! interleave notes with metronome beats in the order they really happened.

use std::sync::mpsc;
use std::time::Instant;

/// A discrete performance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down.
    NoteOn { note: u8, velocity: u8 },
    /// A key came up.
    NoteOff { note: u8 },
}

impl InputEvent {
    pub fn note(&self) -> u8 {
        match *self {
            InputEvent::NoteOn { note, .. } | InputEvent::NoteOff { note } => note,
        }
    }
}

/// An event plus its arrival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedInput {
    pub at: Instant,
    pub event: InputEvent,
}

/// Sending half. Each transport thread gets its own clone.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<TimedInput>,
}

impl InputSender {
    /// Send an event stamped with the current time.
    pub fn send(&self, event: InputEvent) -> Result<(), mpsc::SendError<TimedInput>> {
        self.send_at(event, Instant::now())
    }

    /// Send an event that happened at `at`.
    pub fn send_at(
        &self,
        event: InputEvent,
        at: Instant,
    ) -> Result<(), mpsc::SendError<TimedInput>> {
        self.tx.send(TimedInput { at, event })
    }
}

/// Receiving half, owned by the event loop.
pub struct InputReceiver {
    rx: mpsc::Receiver<TimedInput>,
}

impl InputReceiver {
    /// Drain all pending events, oldest first.
    pub fn drain(&self) -> Vec<TimedInput> {
        self.rx.try_iter().collect()
    }
}

/// Create a new input channel pair.
pub fn input_channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, InputReceiver { rx })
}
