//! Read-only views of a session for rendering.

use crate::types::{GameStatus, Marker};
use serde::{Deserialize, Serialize};

/// One marker as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    /// Rank of the marker.
    pub number: u32,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Whether the marker has been clicked.
    pub clicked: bool,
    /// Countdown before removal, present only once clicked.
    pub remaining_decay_ms: Option<u64>,
}

impl From<&Marker> for MarkerView {
    fn from(marker: &Marker) -> Self {
        let position = marker.position();
        Self {
            number: marker.number(),
            x: position.x,
            y: position.y,
            clicked: marker.is_clicked(),
            remaining_decay_ms: marker.remaining_decay_ms(),
        }
    }
}

impl MarkerView {
    /// Countdown in seconds with two decimals, as shown on a clicked marker.
    pub fn countdown_label(&self) -> Option<String> {
        self.remaining_decay_ms
            .map(|ms| format!("{:.2}", ms as f64 / 1000.0))
    }
}

/// Owned copy of the session state taken after a transition.
///
/// Mutating a snapshot never touches the session it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Correct clicks so far.
    pub score: u32,
    /// Seconds on the presentation clock.
    pub elapsed_time: f64,
    /// Rank that must be clicked next.
    pub next_expected: u32,
    /// Markers still on the board, ordered by rank.
    pub markers: Vec<MarkerView>,
    /// Whether the session accepts clicks and ticks.
    pub running: bool,
    /// Whether the autoplay driver is enabled.
    pub autoplay: bool,
    /// Phase of the session.
    pub outcome: GameStatus,
    /// Number of markers the current game started with (0 when idle).
    pub marker_count: u32,
}

impl GameSnapshot {
    /// Label for the "Next" line: the rank to click, or `Finished`.
    pub fn next_label(&self) -> String {
        if self.next_expected <= self.marker_count && !self.outcome.is_terminal() {
            self.next_expected.to_string()
        } else {
            "Finished".to_string()
        }
    }

    /// Elapsed time formatted with one decimal.
    pub fn time_label(&self) -> String {
        format!("{:.1}s", self.elapsed_time)
    }

    /// Finds a marker view by rank.
    pub fn marker(&self, number: u32) -> Option<&MarkerView> {
        self.markers.iter().find(|m| m.number == number)
    }
}
