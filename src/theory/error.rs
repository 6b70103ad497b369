//! Errors raised by theory-table lookups.

use thiserror::Error;

/// A lookup into one of the fixed theory tables failed.
///
/// Every table index used by the generator comes from the tables themselves,
/// so seeing one of these at runtime means a caller passed hand-built input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("scale degree {degree} out of range (scale has {len} degrees)")]
    InvalidDegree { degree: usize, len: usize },
    #[error("unknown chord quality '{0}'")]
    InvalidQuality(String),
    #[error("unknown scale '{0}'")]
    UnknownScale(String),
    #[error("invalid key '{0}' (expected a note name or 0-11)")]
    InvalidKey(String),
    #[error("octave {0} is outside the representable pitch range")]
    OctaveOutOfRange(i32),
}
