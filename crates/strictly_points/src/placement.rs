//! Marker placement by rejection sampling.
//!
//! Candidates are drawn uniformly on each axis and accepted only if they
//! keep the minimum separation to every marker already placed.

use crate::config::GameConfig;
use crate::error::{GameError, GameErrorKind};
use crate::types::{MarkerCount, Point};
use rand::Rng;
use tracing::{debug, instrument, warn};

/// Returns true if `candidate` sits closer than `min_distance` to any placed point.
pub fn is_colliding(candidate: &Point, placed: &[Point], min_distance: f64) -> bool {
    placed
        .iter()
        .any(|existing| candidate.distance(existing) < min_distance)
}

/// Generates `count` pairwise-separated positions within the board.
///
/// Every coordinate lies in `0..board_size - marker_size`, and every pair of
/// positions is at least `min_separation` apart.
///
/// # Errors
///
/// Returns `PlacementExhausted` once `max_placement_attempts` candidates have
/// been drawn without placing every marker.
#[instrument(skip_all, fields(count = count.get()))]
pub fn generate<R: Rng + ?Sized>(
    count: MarkerCount,
    config: &GameConfig,
    rng: &mut R,
) -> Result<Vec<Point>, GameError> {
    let max = config.max_coordinate();
    let min_separation = *config.min_separation();
    let budget = *config.max_placement_attempts();
    let target = count.get() as usize;

    let mut placed: Vec<Point> = Vec::with_capacity(target);
    let mut attempts: u32 = 0;

    while placed.len() < target {
        if attempts >= budget {
            warn!(placed = placed.len(), attempts, "Placement budget exhausted");
            return Err(GameError::new(GameErrorKind::PlacementExhausted {
                count: count.get(),
                attempts,
            }));
        }
        attempts += 1;

        let candidate = Point::new(rng.gen_range(0.0..max), rng.gen_range(0.0..max));
        if !is_colliding(&candidate, &placed, min_separation) {
            placed.push(candidate);
        }
    }

    debug!(attempts, "Placed all markers");
    Ok(placed)
}
