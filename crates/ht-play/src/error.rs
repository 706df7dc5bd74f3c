//! Error types for interactive play.

use thiserror::Error;

/// Result type for play operations.
pub type PlayResult<T> = Result<T, PlayError>;

/// Errors that end an interactive session.
///
/// Narrator failures, bad dice notation, and failed saves are reported to
/// the player and do not surface here.
#[derive(Debug, Error)]
pub enum PlayError {
    /// Reading input or writing output failed.
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before a required answer was given.
    #[error("input closed before character creation finished")]
    InputClosed,

    /// A rules error that could not be recovered.
    #[error(transparent)]
    Mechanics(#[from] ht_mechanics::MechError),
}
