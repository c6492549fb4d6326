//! Application state and input handling.

use crate::settings::Settings;
use crate::viewport::BoardViewport;
use crossterm::event::KeyCode;
use std::time::Duration;
use strictly_points::{
    GameError, GameErrorKind, GameSession, GameSnapshot, GameStatus, RELIABLE_MARKER_COUNT,
};
use tracing::{debug, info, instrument, warn};

/// Longest count or marker number the input fields accept.
const MAX_INPUT_DIGITS: usize = 4;

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: GameSession,
    default_count: u32,
    count_input: String,
    marker_input: String,
    status_message: String,
    viewport: Option<BoardViewport>,
    should_quit: bool,
}

impl App {
    /// Creates a new application around an idle session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the game settings are unusable.
    #[instrument(skip(settings))]
    pub fn new(settings: &Settings, seed: Option<u64>) -> Result<Self, GameError> {
        let config = *settings.game();
        let session = match seed {
            Some(seed) => GameSession::seeded(config, seed)?,
            None => GameSession::with_config(config)?,
        };
        let default_count = *config.default_marker_count();

        Ok(Self {
            session,
            default_count,
            count_input: default_count.to_string(),
            marker_input: String::new(),
            status_message: "Enter a marker count and press Enter to play.".to_string(),
            viewport: None,
            should_quit: false,
        })
    }

    /// Replaces the pre-filled marker count.
    pub fn set_count_input(&mut self, count: u32) {
        self.count_input = count.to_string();
    }

    /// Enables or disables autoplay.
    pub fn set_autoplay(&mut self, enabled: bool) {
        self.session.set_autoplay(enabled);
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Renderable copy of the session.
    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    /// Text of the marker count input.
    pub fn count_input(&self) -> &str {
        &self.count_input
    }

    /// Marker number typed so far.
    pub fn marker_input(&self) -> &str {
        &self.marker_input
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the count input may be edited.
    pub fn count_editable(&self) -> bool {
        self.session.status() == GameStatus::Idle
    }

    /// Remembers where the board was drawn, for mouse hit testing.
    pub fn set_viewport(&mut self, viewport: Option<BoardViewport>) {
        self.viewport = viewport;
    }

    /// Advances both clocks by the wall time since the last frame.
    pub fn on_frame(&mut self, elapsed: Duration) {
        let before = self.session.status();
        self.session.tick(elapsed.as_secs_f64());
        self.session.advance(elapsed);
        self.note_outcome(before);
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('a') => {
                let enabled = !self.session.autoplay();
                self.session.set_autoplay(enabled);
                self.status_message = format!("Auto Play {}", if enabled { "ON" } else { "OFF" });
            }
            _ => match self.session.status() {
                GameStatus::Idle => self.handle_idle_key(key),
                GameStatus::InProgress => self.handle_playing_key(key),
                GameStatus::Won | GameStatus::Lost => self.handle_finished_key(key),
            },
        }
    }

    /// Handles a left click at a terminal cell.
    #[instrument(skip(self))]
    pub fn handle_mouse_click(&mut self, column: u16, row: u16) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let snapshot = self.session.snapshot();
        if let Some(number) = viewport.marker_at(column, row, &snapshot.markers) {
            debug!(number, "Marker clicked");
            self.click(number);
        }
    }

    fn handle_idle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.count_input.len() < MAX_INPUT_DIGITS {
                    self.count_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.count_input.pop();
            }
            KeyCode::Enter | KeyCode::Char('p') => self.start(),
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.marker_input.len() < MAX_INPUT_DIGITS {
                    self.marker_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.marker_input.pop();
            }
            KeyCode::Enter => {
                let typed = std::mem::take(&mut self.marker_input);
                match typed.parse::<u32>() {
                    Ok(number) => self.click(number),
                    Err(_) => debug!(typed, "Nothing to click"),
                }
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn handle_finished_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('r')) {
            self.restart();
        }
    }

    fn start(&mut self) {
        match self.session.start_with_input(&self.count_input) {
            Ok(()) => {
                info!(count = %self.count_input, "Game started");
                self.marker_input.clear();
                self.status_message = "Click the markers in order.".to_string();
            }
            Err(e) => {
                warn!(error = %e, "Could not start game");
                self.status_message = self.start_failure_message(&e);
            }
        }
    }

    fn start_failure_message(&self, error: &GameError) -> String {
        match error.kind() {
            GameErrorKind::PlacementExhausted { count, .. }
                if self.session.config().is_default_board() =>
            {
                format!(
                    "{count} markers do not fit on the board. Try {RELIABLE_MARKER_COUNT} or fewer."
                )
            }
            GameErrorKind::PlacementExhausted { count, .. } => {
                format!("{count} markers do not fit on the board. Try fewer.")
            }
            GameErrorKind::InvalidConfiguration(_) => error.kind().to_string(),
        }
    }

    fn restart(&mut self) {
        self.session.reset();
        self.count_input = self.default_count.to_string();
        self.marker_input.clear();
        self.status_message = "Game reset. Press Enter to play.".to_string();
    }

    fn click(&mut self, number: u32) {
        let before = self.session.status();
        self.session.click(number);
        self.note_outcome(before);
    }

    fn note_outcome(&mut self, before: GameStatus) {
        let after = self.session.status();
        if before == after {
            return;
        }
        match after {
            GameStatus::Won => {
                self.status_message = "All clear! Press Enter to play again.".to_string();
            }
            GameStatus::Lost => {
                self.status_message = "Wrong marker! Press Enter to play again.".to_string();
            }
            GameStatus::Idle | GameStatus::InProgress => {}
        }
    }
}
