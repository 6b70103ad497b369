//! Match evaluation — does the set of held pitches spell the target chord?

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Chord;
use crate::theory::Pitch;

/// How strictly held notes are compared against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Held notes must equal the target notes as a set. No extras.
    #[default]
    Exact,
    /// Every target note must be held; extra held notes are ignored.
    AllowExtra,
}

/// Exact-match evaluation: true iff `active` equals the target's notes as a set.
///
/// An absent target never matches.
pub fn evaluate(target: Option<&Chord>, active: &BTreeSet<Pitch>) -> bool {
    evaluate_with(MatchPolicy::Exact, target, active)
}

/// Evaluate under an explicit [`MatchPolicy`].
pub fn evaluate_with(
    policy: MatchPolicy,
    target: Option<&Chord>,
    active: &BTreeSet<Pitch>,
) -> bool {
    let Some(target) = target else {
        return false;
    };

    let wanted: BTreeSet<Pitch> = target.notes().iter().copied().collect();
    if wanted.is_empty() {
        return false;
    }
    if !wanted.is_subset(active) {
        return false;
    }

    match policy {
        MatchPolicy::Exact => active.len() == wanted.len(),
        MatchPolicy::AllowExtra => true,
    }
}
