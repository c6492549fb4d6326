//! Strictly Points - pure game logic for a click-in-order marker game.
//!
//! Numbered markers are scattered over a square board without overlapping.
//! The player clicks them in ascending order; each correct click starts a
//! short decay countdown after which the marker leaves the board. Clearing
//! the board wins, any out-of-order click loses.
//!
//! # Architecture
//!
//! - **Placement**: rejection sampling of separated marker positions
//! - **Session**: the state machine owning markers, score and turn pointer
//! - **Scheduler**: virtual-time queue for decay steps and autoplay clicks
//! - **Invariants**: properties checked after every transition in debug builds
//!
//! The session has no rendering dependencies. Hosts call its transitions and
//! read back a [`GameSnapshot`] after each one.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_points::{GameConfig, GameSession, GameStatus};
//!
//! # fn example() -> Result<(), strictly_points::GameError> {
//! let mut session = GameSession::seeded(GameConfig::default(), 7)?;
//! session.start(3)?;
//! for number in 1..=3 {
//!     session.click(number);
//! }
//! session.advance(Duration::from_secs(5));
//! assert_eq!(session.status(), GameStatus::Won);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod invariants;
mod placement;
mod scheduler;
mod session;
mod snapshot;
mod types;

// Crate-level exports - Configuration
pub use config::{
    AUTOPLAY_DELAY_MS, BOARD_SIZE, DECAY_DURATION_MS, DECAY_STEP_MS, DEFAULT_MARKER_COUNT,
    GameConfig, MAX_PLACEMENT_ATTEMPTS, MIN_SEPARATION, POINT_SIZE, RELIABLE_MARKER_COUNT,
    TICK_INTERVAL_MS,
};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Invariants
pub use invariants::{
    ContiguousNumbering, DecayBounded, Invariant, InvariantSet, InvariantViolation,
    ScoreTracksProgress, SessionInvariants,
};

// Crate-level exports - Placement
pub use placement::{generate, is_colliding};

// Crate-level exports - Scheduling
pub use scheduler::{Scheduler, TimerId};

// Crate-level exports - Session
pub use session::GameSession;
pub use snapshot::{GameSnapshot, MarkerView};

// Crate-level exports - Domain types
pub use types::{GameStatus, Marker, MarkerCount, MarkerState, Point};
