//! Game constants shared by the generator, the session and the renderer.

use crate::error::GameError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the square board, in board units.
pub const BOARD_SIZE: f64 = 500.0;

/// Side length of a marker, in board units.
pub const POINT_SIZE: f64 = 50.0;

/// Minimum center-to-center distance between two markers.
pub const MIN_SEPARATION: f64 = POINT_SIZE + 10.0;

/// How long a clicked marker stays on the board.
pub const DECAY_DURATION_MS: u64 = 3000;

/// Countdown decrement per decay step.
pub const DECAY_STEP_MS: u64 = 10;

/// Delay before autoplay clicks the next marker.
pub const AUTOPLAY_DELAY_MS: u64 = 500;

/// Interval of the presentation clock.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Marker count offered before the player picks one.
pub const DEFAULT_MARKER_COUNT: u32 = 5;

/// Candidate draws allowed per game before placement gives up.
///
/// On the default board this fits up to [`RELIABLE_MARKER_COUNT`] markers
/// for practically every seed. Around 45 a noticeable share of seeds run
/// out, and 50 almost never fit.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

/// Largest marker count that reliably fits the default board.
pub const RELIABLE_MARKER_COUNT: u32 = 40;

/// Startup-time game configuration.
///
/// Every field defaults to the module constant of the same name, so a
/// partially filled settings table deserializes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    board_size: f64,
    /// Marker side length.
    marker_size: f64,
    /// Minimum distance between marker positions.
    min_separation: f64,
    /// Decay countdown length in milliseconds.
    decay_duration_ms: u64,
    /// Decay step interval in milliseconds.
    decay_step_ms: u64,
    /// Autoplay click delay in milliseconds.
    autoplay_delay_ms: u64,
    /// Presentation clock interval in milliseconds.
    tick_interval_ms: u64,
    /// Count pre-filled in the host's input.
    default_marker_count: u32,
    /// Placement attempt budget.
    max_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            marker_size: POINT_SIZE,
            min_separation: MIN_SEPARATION,
            decay_duration_ms: DECAY_DURATION_MS,
            decay_step_ms: DECAY_STEP_MS,
            autoplay_delay_ms: AUTOPLAY_DELAY_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            default_marker_count: DEFAULT_MARKER_COUNT,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// True when the board geometry matches the defaults, where
    /// [`RELIABLE_MARKER_COUNT`] applies.
    pub fn is_default_board(&self) -> bool {
        self.board_size == BOARD_SIZE
            && self.marker_size == POINT_SIZE
            && self.min_separation == MIN_SEPARATION
    }

    /// Upper bound for either coordinate of a marker position.
    pub fn max_coordinate(&self) -> f64 {
        self.board_size - self.marker_size
    }

    /// Checks that the constants describe a playable board.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first offending field.
    #[instrument]
    pub fn validate(&self) -> Result<(), GameError> {
        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(GameError::invalid_configuration(format!(
                "marker_size must be positive, got {}",
                self.marker_size
            )));
        }
        if !self.board_size.is_finite() || self.board_size <= self.marker_size {
            return Err(GameError::invalid_configuration(format!(
                "board_size {} must exceed marker_size {}",
                self.board_size, self.marker_size
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(GameError::invalid_configuration(format!(
                "min_separation must be non-negative, got {}",
                self.min_separation
            )));
        }
        if self.decay_duration_ms == 0 {
            return Err(GameError::invalid_configuration(
                "decay_duration_ms must be positive",
            ));
        }
        if self.decay_step_ms == 0 {
            return Err(GameError::invalid_configuration(
                "decay_step_ms must be positive",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::invalid_configuration(
                "tick_interval_ms must be positive",
            ));
        }
        if self.default_marker_count < 2 {
            return Err(GameError::invalid_configuration(format!(
                "default_marker_count must be at least 2, got {}",
                self.default_marker_count
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(GameError::invalid_configuration(
                "max_placement_attempts must be positive",
            ));
        }
        Ok(())
    }
}
