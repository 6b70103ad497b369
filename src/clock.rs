//! Beat clock — fixed-period metronome ticks derived from BPM.
//!
//! The clock does not sleep or spawn threads. The event loop polls it with the
//! current [`Instant`] and receives the number of ticks that came due since the
//! last poll. Changing the tempo restarts the schedule from the moment of the
//! change, so only ticks after it use the new period.

use std::time::{Duration, Instant};

/// Slowest tempo the clock accepts.
pub const MIN_BPM: f64 = 20.0;
/// Fastest tempo the clock accepts.
pub const MAX_BPM: f64 = 300.0;

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Wall-clock metronome.
#[derive(Debug, Clone)]
pub struct BeatClock {
    bpm: f64,
    next_tick: Option<Instant>,
}

impl BeatClock {
    /// Create a stopped clock. BPM is clamped to [`MIN_BPM`]..=[`MAX_BPM`].
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm: clamp_bpm(bpm),
            next_tick: None,
        }
    }

    /// Start ticking; the first tick is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.period());
    }

    /// Stop scheduling ticks.
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn state(&self) -> ClockState {
        if self.next_tick.is_some() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Set a new tempo. A running clock reschedules its next tick one new
    /// period after `now`.
    pub fn set_bpm(&mut self, bpm: f64, now: Instant) {
        self.bpm = clamp_bpm(bpm);
        if self.next_tick.is_some() {
            self.start(now);
        }
    }

    /// Time between ticks: `60 / bpm` seconds.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.bpm)
    }

    /// Number of ticks due at `now`. Each is delivered exactly once.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_tick else {
            return 0;
        };
        let period = self.period();
        let mut due = 0;
        while next <= now {
            due += 1;
            next += period;
        }
        self.next_tick = Some(next);
        due
    }

}

/// Clamp a tempo into the supported range. NaN falls back to the minimum.
pub fn clamp_bpm(bpm: f64) -> f64 {
    if bpm.is_nan() {
        return MIN_BPM;
    }
    bpm.clamp(MIN_BPM, MAX_BPM)
}
