//! The timing-synthesis capability consumed by the 0.5.0 migration.

use thiserror::Error;

use crate::parse::types::AccentPhrase;

#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The synthesis engine rejected the request or is unavailable.
    #[error("Timing synthesis failed: {0}")]
    Engine(String),

    /// The engine answered with a different phrase/mora layout.
    #[error("Timing synthesis returned {found} at {location}, expected {expected}")]
    ShapeMismatch {
        location: String,
        expected: usize,
        found: usize,
    },
}

/// Computes authoritative phoneme timings for a speaker's accent phrases.
///
/// The result must have the same phrase count and per-phrase mora count as
/// the input.
pub trait TimingSynthesizer {
    fn synthesize_timings(
        &mut self,
        accent_phrases: &[AccentPhrase],
        speaker: i32,
    ) -> Result<Vec<AccentPhrase>, SynthesisError>;
}

impl<F> TimingSynthesizer for F
where
    F: FnMut(&[AccentPhrase], i32) -> Result<Vec<AccentPhrase>, SynthesisError>,
{
    fn synthesize_timings(
        &mut self,
        accent_phrases: &[AccentPhrase],
        speaker: i32,
    ) -> Result<Vec<AccentPhrase>, SynthesisError> {
        self(accent_phrases, speaker)
    }
}
