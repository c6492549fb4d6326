//! Tests for headless simulation.

use std::time::Duration;
use strictly_points::GameStatus;
use strictly_points_tui::{Settings, run_simulation};

#[test]
fn test_seeded_simulations_match() {
    let settings = Settings::default();
    let a = run_simulation(&settings, Some(6), Some(99), Duration::from_secs(60)).expect("runs");
    let b = run_simulation(&settings, Some(6), Some(99), Duration::from_secs(60)).expect("runs");
    assert_eq!(a, b);
    assert_eq!(a.outcome, GameStatus::Won);
}

#[test]
fn test_default_count_from_settings() {
    let snapshot = run_simulation(&Settings::default(), None, Some(5), Duration::from_secs(60))
        .expect("runs");
    assert_eq!(snapshot.marker_count, 5);
    assert_eq!(snapshot.score, 5);

    let json = serde_json::to_string(&snapshot).expect("serializable");
    assert!(json.contains("\"outcome\":\"Won\""));
}
