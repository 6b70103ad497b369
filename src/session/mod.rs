//! Session controller — owns the target chord, held notes, and completion flag.
//!
//! Every operation is synchronous and runs to completion; callers feed note
//! and beat events in arrival order. The controller never pushes renders:
//! the display layer queries [`SessionController::target`] and
//! [`SessionController::active_notes`] after each event.
//!
//! Lifecycle of a target:
//!
//! 1. [`advance`](SessionController::advance) generates a fresh chord and
//!    clears held notes.
//! 2. Note-ons re-run the matcher; once it matches, `completed` latches true.
//! 3. The next [`on_beat_tick`](SessionController::on_beat_tick) sees the
//!    latch and advances. Releasing notes before the beat does not unlatch.

pub mod config;

pub use config::{MusicConfig, MAX_OCTAVE, MIN_OCTAVE};

use std::collections::BTreeSet;

use crate::chord::{self, evaluate_with, Chord, DegreeSource, MatchPolicy, RandomDegrees};
use crate::theory::{Pitch, TheoryError};

/// Snapshot of what the performer is working on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub target: Option<Chord>,
    pub active_notes: BTreeSet<Pitch>,
    pub completed: bool,
}

/// Result of a beat tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatOutcome {
    /// The solved chord was replaced by a new target.
    Advanced,
    /// Target still unsolved (or no target yet); nothing changed.
    Waiting,
}

/// Drives the chord-training loop.
pub struct SessionController {
    config: MusicConfig,
    policy: MatchPolicy,
    state: SessionState,
    degrees: Box<dyn DegreeSource + Send>,
    /// Incremented every time a new target is installed.
    generation: u64,
}

impl SessionController {
    /// Create a controller with no target yet. Call [`advance`](Self::advance) to start.
    pub fn new(config: MusicConfig, degrees: Box<dyn DegreeSource + Send>) -> Self {
        Self {
            config,
            policy: MatchPolicy::Exact,
            state: SessionState::default(),
            degrees,
            generation: 0,
        }
    }

    /// Controller drawing degrees from a seeded ChaCha stream.
    pub fn seeded(config: MusicConfig, seed: u64) -> Self {
        Self::new(config, Box::new(RandomDegrees::from_seed(seed)))
    }

    /// Builder-style match policy override.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the target with a freshly generated chord.
    ///
    /// Clears held notes and the completion flag. On a theory-table failure
    /// the previous state is left untouched.
    pub fn advance(&mut self) -> Result<&Chord, TheoryError> {
        let chord = match chord::generate(&self.config, self.degrees.as_mut()) {
            Ok(chord) => chord,
            Err(e) => {
                tracing::error!(config = %self.config, "chord generation failed: {e}");
                return Err(e);
            }
        };

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            name = %chord::name(&chord, &self.config),
            notes = ?chord.notes(),
            "new target"
        );

        self.state.active_notes.clear();
        self.state.completed = false;
        Ok(&*self.state.target.insert(chord))
    }

    /// A note started sounding. Returns the completion flag afterwards.
    pub fn on_note_on(&mut self, pitch: Pitch) -> bool {
        self.state.active_notes.insert(pitch);
        self.reevaluate();
        self.state.completed
    }

    /// A note stopped sounding. Unknown pitches are ignored.
    pub fn on_note_off(&mut self, pitch: Pitch) {
        self.state.active_notes.remove(&pitch);
        self.reevaluate();
    }

    /// A metronome beat. Advances only if the current target was solved.
    pub fn on_beat_tick(&mut self) -> BeatOutcome {
        if !self.state.completed {
            return BeatOutcome::Waiting;
        }
        match self.advance() {
            Ok(_) => BeatOutcome::Advanced,
            Err(_) => BeatOutcome::Waiting,
        }
    }

    /// Swap in a new key/scale/octave. The current target is kept; the next
    /// advance uses the new configuration.
    pub fn on_config_change(&mut self, config: MusicConfig) {
        tracing::debug!(from = %self.config, to = %config, "config change");
        self.config = config;
    }

    fn reevaluate(&mut self) {
        // Latches: once solved, stays solved until the next advance.
        if evaluate_with(
            self.policy,
            self.state.target.as_ref(),
            &self.state.active_notes,
        ) {
            if !self.state.completed {
                tracing::debug!(generation = self.generation, "target matched");
            }
            self.state.completed = true;
        }
    }

    pub fn target(&self) -> Option<&Chord> {
        self.state.target.as_ref()
    }

    pub fn active_notes(&self) -> &BTreeSet<Pitch> {
        &self.state.active_notes
    }

    pub fn completed(&self) -> bool {
        self.state.completed
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &MusicConfig {
        &self.config
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MatchPolicy) {
        self.policy = policy;
    }

    /// How many targets have been installed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Display name of the current target, or "" before the first advance.
    pub fn target_name(&self) -> String {
        self.state
            .target
            .as_ref()
            .map(|chord| chord::name(chord, &self.config))
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
