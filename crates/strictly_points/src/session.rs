//! The game session state machine.
//!
//! A session owns every piece of mutable game state: markers, score, the
//! presentation clock, the turn pointer and a virtual-time [`Scheduler`] for
//! decay countdowns and autoplay clicks. Hosts drive it with [`tick`] for the
//! on-screen clock and [`advance`] for scheduled work.
//!
//! [`tick`]: GameSession::tick
//! [`advance`]: GameSession::advance

use crate::config::GameConfig;
use crate::error::GameError;
use crate::invariants::assert_invariants;
use crate::placement;
use crate::scheduler::{Scheduler, TimerId};
use crate::snapshot::{GameSnapshot, MarkerView};
use crate::types::{GameStatus, Marker, MarkerCount, MarkerState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Work queued on the session timeline.
///
/// Every task remembers the epoch it was created in; a task from an earlier
/// game is dropped instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// One countdown step for a clicked marker.
    DecayStep { epoch: u64, number: u32 },
    /// Deferred autoplay click.
    AutoClick { epoch: u64, number: u32 },
}

impl Task {
    fn epoch(self) -> u64 {
        match self {
            Task::DecayStep { epoch, .. } | Task::AutoClick { epoch, .. } => epoch,
        }
    }
}

/// A single-player game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    scheduler: Scheduler<Task>,
    epoch: u64,
    score: u32,
    elapsed_time: f64,
    next_expected: u32,
    marker_count: u32,
    markers: BTreeMap<u32, Marker>,
    running: bool,
    autoplay: bool,
    status: GameStatus,
    pending_autoplay: Option<(TimerId, u32)>,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Creates an idle session with default constants and an entropy-seeded RNG.
    #[instrument]
    pub fn new() -> Self {
        Self::from_parts(GameConfig::default(), StdRng::from_entropy())
    }

    /// Creates an idle session with custom constants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the constants fail validation.
    #[instrument]
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::from_parts(config, StdRng::from_entropy()))
    }

    /// Creates an idle session whose marker layouts are reproducible.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the constants fail validation.
    #[instrument]
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::from_parts(config, StdRng::seed_from_u64(seed)))
    }

    fn from_parts(config: GameConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            scheduler: Scheduler::new(),
            epoch: 0,
            score: 0,
            elapsed_time: 0.0,
            next_expected: 1,
            marker_count: 0,
            markers: BTreeMap::new(),
            running: false,
            autoplay: false,
            status: GameStatus::Idle,
            pending_autoplay: None,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Host-facing transitions
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Starts a new game with `count` markers, replacing any current game.
    ///
    /// The autoplay flag carries over from the previous game.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `count` is below 2 and
    /// `PlacementExhausted` if the board cannot fit the markers. The session
    /// is left untouched in both cases.
    #[instrument(skip(self))]
    pub fn start(&mut self, count: i64) -> Result<(), GameError> {
        let count = MarkerCount::try_from(count).inspect_err(|e| {
            warn!(error = %e, "Rejected marker count");
        })?;
        self.start_count(count)
    }

    /// Starts a new game from raw user input such as `"5"`.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start); non-integer text is `InvalidConfiguration`.
    #[instrument(skip(self))]
    pub fn start_with_input(&mut self, input: &str) -> Result<(), GameError> {
        let count: MarkerCount = input.parse().inspect_err(|e: &GameError| {
            warn!(error = %e, "Rejected marker count input");
        })?;
        self.start_count(count)
    }

    /// Starts a new game with an already validated count.
    ///
    /// # Errors
    ///
    /// Returns `PlacementExhausted` if the board cannot fit the markers.
    #[instrument(skip(self), fields(count = count.get()))]
    pub fn start_count(&mut self, count: MarkerCount) -> Result<(), GameError> {
        let positions = placement::generate(count, &self.config, &mut self.rng)?;

        self.cancel_all();
        self.epoch += 1;
        self.markers = (1..)
            .zip(positions)
            .map(|(number, position)| (number, Marker::new(number, position)))
            .collect();
        self.marker_count = count.get();
        self.score = 0;
        self.elapsed_time = 0.0;
        self.next_expected = 1;
        self.running = true;
        self.status = GameStatus::InProgress;

        info!(epoch = self.epoch, autoplay = self.autoplay, "Game started");
        self.after_transition();
        Ok(())
    }

    /// Destroys the current game and returns to idle defaults.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cancel_all();
        self.epoch += 1;
        self.markers.clear();
        self.marker_count = 0;
        self.score = 0;
        self.elapsed_time = 0.0;
        self.next_expected = 1;
        self.running = false;
        self.autoplay = false;
        self.status = GameStatus::Idle;

        info!(epoch = self.epoch, "Session reset");
        self.after_transition();
    }

    /// Advances the presentation clock. Ignored unless the game is running.
    pub fn tick(&mut self, delta_seconds: f64) {
        if !self.running {
            return;
        }
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            warn!(delta_seconds, "Ignoring invalid clock delta");
            return;
        }
        self.elapsed_time += delta_seconds;
    }

    /// Resolves a click on the marker ranked `number`.
    ///
    /// Ignored when the game is not running. Any rank other than
    /// `next_expected` loses the game.
    #[instrument(skip(self), fields(next_expected = self.next_expected))]
    pub fn click(&mut self, number: u32) {
        if !self.running {
            debug!("Click on stopped board ignored");
            return;
        }

        if number != self.next_expected {
            info!(number, score = self.score, "Clicked out of order");
            self.status = GameStatus::Lost;
            self.stop();
            self.after_transition();
            return;
        }

        let decay = *self.config.decay_duration_ms();
        let step = Duration::from_millis(*self.config.decay_step_ms());
        let Some(marker) = self.markers.get_mut(&number) else {
            warn!(number, "No marker left to click");
            return;
        };
        marker.set_state(MarkerState::Decaying { remaining_ms: decay });

        self.score += 1;
        self.next_expected += 1;
        self.scheduler.schedule_after(
            step,
            Task::DecayStep {
                epoch: self.epoch,
                number,
            },
        );

        debug!(number, score = self.score, "Correct click");
        self.after_transition();
    }

    /// Turns the autoplay driver on or off.
    #[instrument(skip(self))]
    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.autoplay == enabled {
            return;
        }
        self.autoplay = enabled;
        info!(enabled, "Autoplay toggled");
        self.after_transition();
    }

    /// Moves the session timeline forward, firing decay steps and autoplay
    /// clicks that come due.
    pub fn advance(&mut self, delta: Duration) {
        let until = self.scheduler.now().saturating_add(delta);
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(until);
    }

    /// Takes an owned, read-only view of the session.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            score: self.score,
            elapsed_time: self.elapsed_time,
            next_expected: self.next_expected,
            markers: self.markers.values().map(MarkerView::from).collect(),
            running: self.running,
            autoplay: self.autoplay,
            outcome: self.status,
            marker_count: self.marker_count,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Constants this session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Correct clicks so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds on the presentation clock.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Rank that must be clicked next.
    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    /// Number of markers the current game started with.
    pub fn marker_count(&self) -> u32 {
        self.marker_count
    }

    /// Whether clicks and ticks are accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the autoplay driver is enabled.
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Current phase.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Markers still on the board, ordered by rank.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Looks up a marker by rank.
    pub fn marker(&self, number: u32) -> Option<&Marker> {
        self.markers.get(&number)
    }

    /// Current virtual time of the session timeline.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of decay steps and autoplay clicks waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}

// ─────────────────────────────────────────────────────────────
//  Scheduled work
// ─────────────────────────────────────────────────────────────

impl GameSession {
    fn dispatch(&mut self, task: Task) {
        if task.epoch() != self.epoch {
            debug!(?task, current = self.epoch, "Dropping task from a previous game");
            return;
        }
        match task {
            Task::DecayStep { number, .. } => self.decay_step(number),
            Task::AutoClick { number, .. } => self.auto_click(number),
        }
    }

    fn decay_step(&mut self, number: u32) {
        let step_ms = *self.config.decay_step_ms();
        let Some(marker) = self.markers.get_mut(&number) else {
            debug!(number, "Decay step for a removed marker");
            return;
        };
        let MarkerState::Decaying { remaining_ms } = marker.state() else {
            debug!(number, "Decay step for an unclicked marker");
            return;
        };

        let remaining_ms = remaining_ms.saturating_sub(step_ms);
        if remaining_ms > 0 {
            marker.set_state(MarkerState::Decaying { remaining_ms });
            self.scheduler.schedule_after(
                Duration::from_millis(step_ms),
                Task::DecayStep {
                    epoch: self.epoch,
                    number,
                },
            );
            return;
        }

        self.markers.remove(&number);
        debug!(number, left = self.markers.len(), "Marker decayed");

        if self.markers.is_empty() {
            self.stop();
            self.evaluate_win();
        }
        self.after_transition();
    }

    fn auto_click(&mut self, number: u32) {
        match self.pending_autoplay {
            Some((_, target)) if target == number => {
                self.pending_autoplay = None;
                debug!(number, "Autoplay click");
                self.click(number);
            }
            _ => debug!(number, "Autoplay click no longer wanted"),
        }
    }

    /// Wins when the board emptied, the game stopped and something was scored.
    fn evaluate_win(&mut self) {
        if self.markers.is_empty()
            && !self.running
            && self.status != GameStatus::Lost
            && self.score > 0
        {
            self.status = GameStatus::Won;
            info!(score = self.score, elapsed = self.elapsed_time, "All markers cleared");
        }
    }

    /// Keeps at most one autoplay click queued, aimed at `next_expected`.
    fn sync_autoplay(&mut self) {
        let wanted = (self.autoplay && self.running)
            .then_some(self.next_expected)
            .filter(|number| {
                self.markers
                    .get(number)
                    .is_some_and(|marker| !marker.is_clicked())
            });

        if let (Some((_, target)), Some(number)) = (self.pending_autoplay, wanted)
            && target == number
        {
            return;
        }

        if let Some((id, _)) = self.pending_autoplay.take() {
            self.scheduler.cancel(id);
        }
        if let Some(number) = wanted {
            let delay = Duration::from_millis(*self.config.autoplay_delay_ms());
            let id = self.scheduler.schedule_after(
                delay,
                Task::AutoClick {
                    epoch: self.epoch,
                    number,
                },
            );
            self.pending_autoplay = Some((id, number));
        }
    }

    fn stop(&mut self) {
        self.running = false;
        self.cancel_all();
    }

    fn cancel_all(&mut self) {
        self.scheduler.clear();
        self.pending_autoplay = None;
    }

    fn after_transition(&mut self) {
        self.sync_autoplay();
        assert_invariants(self);
    }
}
