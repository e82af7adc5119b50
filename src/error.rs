//! Error types for pixel-automata.

use thiserror::Error;

/// Errors that can abort a configuration change or a simulation step.
///
/// Unknown rule names are deliberately absent: toggling one is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A supplied column or buffer does not match the field geometry.
    /// Raised before any state is touched.
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Element count the field requires.
        expected: usize,
        /// Element count that was supplied.
        actual: usize,
    },

    /// Frame rate outside the accepted 1..=60 range.
    #[error("invalid speed: {0} fps (expected 1..=60)")]
    InvalidSpeed(u32),

    /// Grid edge of zero or larger than [`crate::config::MAX_GRID_SIZE`].
    #[error("invalid grid size: {0}")]
    InvalidSize(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutomatonError>;
