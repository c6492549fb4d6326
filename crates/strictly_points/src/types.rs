//! Core domain types for the marker game.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A position on the board, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Lifecycle of a single marker.
///
/// A marker is either waiting to be clicked or counting down to removal.
/// Removed markers are not represented; they leave the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerState {
    /// Not yet clicked.
    Pending,
    /// Clicked; removed once `remaining_ms` reaches zero.
    Decaying {
        /// Milliseconds left before removal.
        remaining_ms: u64,
    },
}

/// A numbered target on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    number: u32,
    position: Point,
    state: MarkerState,
}

impl Marker {
    /// Creates an unclicked marker.
    pub fn new(number: u32, position: Point) -> Self {
        Self {
            number,
            position,
            state: MarkerState::Pending,
        }
    }

    /// Rank of this marker (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Top-left corner of the marker.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MarkerState {
        self.state
    }

    /// True once the marker has been clicked.
    pub fn is_clicked(&self) -> bool {
        matches!(self.state, MarkerState::Decaying { .. })
    }

    /// Remaining countdown, present only for clicked markers.
    pub fn remaining_decay_ms(&self) -> Option<u64> {
        match self.state {
            MarkerState::Pending => None,
            MarkerState::Decaying { remaining_ms } => Some(remaining_ms),
        }
    }

    pub(crate) fn set_state(&mut self, state: MarkerState) {
        self.state = state;
    }
}

/// Phase of a game session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameStatus {
    /// No game on the board.
    #[default]
    Idle,
    /// Markers are being cleared.
    InProgress,
    /// Every marker was clicked in order and has decayed.
    Won,
    /// A marker was clicked out of order.
    Lost,
}

impl GameStatus {
    /// True for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    /// Headline shown above the board.
    #[instrument]
    pub fn headline(self) -> &'static str {
        match self {
            GameStatus::Won => "ALL CLEAR",
            GameStatus::Lost => "GAME OVER",
            GameStatus::Idle | GameStatus::InProgress => "LET'S PLAY",
        }
    }
}

/// A validated number of markers (at least two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerCount(u32);

impl MarkerCount {
    /// Smallest playable count.
    pub const MIN: u32 = 2;

    /// Returns the count.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for MarkerCount {
    type Error = GameError;

    #[track_caller]
    fn try_from(count: i64) -> Result<Self, Self::Error> {
        if count < i64::from(Self::MIN) {
            return Err(GameError::invalid_configuration(format!(
                "marker count must be an integer of at least {}, got {}",
                Self::MIN,
                count
            )));
        }
        u32::try_from(count)
            .map(MarkerCount)
            .map_err(|_| GameError::invalid_configuration(format!("marker count {count} is too large")))
    }
}

impl FromStr for MarkerCount {
    type Err = GameError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let count: i64 = trimmed.parse().map_err(|_| {
            GameError::invalid_configuration(format!(
                "marker count must be an integer of at least {}, got {:?}",
                Self::MIN,
                trimmed
            ))
        })?;
        Self::try_from(count)
    }
}

impl std::fmt::Display for MarkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_marker_starts_pending() {
        let marker = Marker::new(1, Point::new(10.0, 20.0));
        assert!(!marker.is_clicked());
        assert_eq!(marker.remaining_decay_ms(), None);
    }

    #[test]
    fn test_marker_count_bounds() {
        assert_eq!(MarkerCount::try_from(2_i64).map(MarkerCount::get).ok(), Some(2));
        assert!(MarkerCount::try_from(1_i64).is_err());
        assert!(MarkerCount::try_from(0_i64).is_err());
        assert!(MarkerCount::try_from(-3_i64).is_err());
        assert!(MarkerCount::try_from(i64::MAX).is_err());
    }

    #[test]
    fn test_marker_count_from_text() {
        assert_eq!(" 7 ".parse::<MarkerCount>().map(MarkerCount::get).ok(), Some(7));
        assert!("x".parse::<MarkerCount>().is_err());
        assert!("2.5".parse::<MarkerCount>().is_err());
        assert!("".parse::<MarkerCount>().is_err());
        assert!("1".parse::<MarkerCount>().is_err());
    }

    #[test]
    fn test_headlines() {
        assert_eq!(GameStatus::Won.headline(), "ALL CLEAR");
        assert_eq!(GameStatus::Lost.headline(), "GAME OVER");
        assert_eq!(GameStatus::Idle.headline(), "LET'S PLAY");
        assert!(!GameStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_exactly_two_terminal_states() {
        use strum::IntoEnumIterator;
        let terminal: Vec<GameStatus> = GameStatus::iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![GameStatus::Won, GameStatus::Lost]);
        assert_eq!(GameStatus::default(), GameStatus::Idle);
        assert_eq!(GameStatus::InProgress.to_string(), "InProgress");
    }
}
