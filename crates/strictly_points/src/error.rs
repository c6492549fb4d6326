//! Error types for game setup.
//!
//! Gameplay itself never fails: clicks on a stopped board are ignored and a
//! wrong click is the `Lost` transition. Only starting a game can error.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Marker count or configuration constants are unusable.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// Rejection sampling ran out of attempts before placing every marker.
    #[display("Could not place {count} markers within {attempts} attempts")]
    PlacementExhausted {
        /// Markers requested.
        count: u32,
        /// Candidate draws spent.
        attempts: u32,
    },
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error category.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`GameErrorKind::InvalidConfiguration`] error.
    #[track_caller]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::InvalidConfiguration(message.into()))
    }

    /// Returns the error category.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// True if this is an invalid configuration error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self.kind, GameErrorKind::InvalidConfiguration(_))
    }
}
