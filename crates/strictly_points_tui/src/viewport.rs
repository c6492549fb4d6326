//! Mapping between board coordinates and terminal cells.

use ratatui::layout::Rect;
use strictly_points::{GameConfig, MarkerView};

/// The terminal rectangle the board is drawn into, plus the scale to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardViewport {
    area: Rect,
    board_size: f64,
    marker_size: f64,
}

impl BoardViewport {
    /// Creates a viewport for `area` using the board geometry from `config`.
    pub fn new(area: Rect, config: &GameConfig) -> Self {
        Self {
            area,
            board_size: *config.board_size(),
            marker_size: *config.marker_size(),
        }
    }

    /// Terminal area covered by the board.
    pub fn area(&self) -> Rect {
        self.area
    }

    fn to_col(&self, x: f64) -> u16 {
        let offset = (x / self.board_size * f64::from(self.area.width)).floor();
        self.area.x + (offset.max(0.0) as u16).min(self.area.width.saturating_sub(1))
    }

    fn to_row(&self, y: f64) -> u16 {
        let offset = (y / self.board_size * f64::from(self.area.height)).floor();
        self.area.y + (offset.max(0.0) as u16).min(self.area.height.saturating_sub(1))
    }

    /// Cell rectangle a marker occupies, clipped to the board.
    ///
    /// Markers are at least wide enough for their number and one row tall.
    pub fn marker_rect(&self, marker: &MarkerView) -> Rect {
        let scaled_width = (self.marker_size / self.board_size * f64::from(self.area.width)).ceil() as u16;
        let scaled_height = (self.marker_size / self.board_size * f64::from(self.area.height)).ceil() as u16;
        let label_width = marker.number.to_string().len() as u16 + 2;

        let x = self.to_col(marker.x);
        let y = self.to_row(marker.y);
        let right = self.area.x + self.area.width;
        let bottom = self.area.y + self.area.height;

        Rect::new(
            x,
            y,
            scaled_width.max(label_width).min(right - x),
            scaled_height.max(1).min(bottom - y),
        )
    }

    /// Rank of the topmost marker under a terminal cell.
    ///
    /// Markers are drawn in rank order, so later ranks sit on top.
    pub fn marker_at(&self, column: u16, row: u16, markers: &[MarkerView]) -> Option<u32> {
        markers
            .iter()
            .rev()
            .find(|marker| {
                let rect = self.marker_rect(marker);
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|marker| marker.number)
    }
}
