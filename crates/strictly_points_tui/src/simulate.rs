//! Headless autoplay runs.

use crate::settings::Settings;
use std::time::Duration;
use strictly_points::{GameError, GameSession, GameSnapshot};
use tracing::{info, instrument, warn};

/// Plays one game with autoplay on, stepping virtual time by the tick interval.
///
/// Stops at the first terminal state or once `max_time` of game time has
/// passed, and returns the final snapshot either way.
///
/// # Errors
///
/// Returns the session's error if the settings or the count are unusable.
#[instrument(skip(settings))]
pub fn run_simulation(
    settings: &Settings,
    count: Option<u32>,
    seed: Option<u64>,
    max_time: Duration,
) -> Result<GameSnapshot, GameError> {
    let config = *settings.game();
    let mut session = match seed {
        Some(seed) => GameSession::seeded(config, seed)?,
        None => GameSession::with_config(config)?,
    };
    let count = count.unwrap_or(*config.default_marker_count());

    session.set_autoplay(true);
    session.start(i64::from(count))?;

    let step = Duration::from_millis(*config.tick_interval_ms());
    let mut spent = Duration::ZERO;
    while !session.status().is_terminal() && spent < max_time {
        session.tick(step.as_secs_f64());
        session.advance(step);
        spent += step;
    }

    let snapshot = session.snapshot();
    if snapshot.outcome.is_terminal() {
        info!(outcome = %snapshot.outcome, score = snapshot.score, elapsed = snapshot.elapsed_time, "Simulation finished");
    } else {
        warn!(score = snapshot.score, "Simulation hit the time limit");
    }
    Ok(snapshot)
}
