//! Tests for game session transitions.

use std::time::Duration;
use strictly_points::{GameConfig, GameErrorKind, GameSession, GameStatus};

fn session(seed: u64) -> GameSession {
    GameSession::seeded(GameConfig::default(), seed).expect("default config is valid")
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn test_start_initializes_board() {
    let mut s = session(1);
    s.start(5).expect("valid count");

    let snap = s.snapshot();
    assert_eq!(snap.outcome, GameStatus::InProgress);
    assert!(snap.running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.next_expected, 1);
    assert_eq!(snap.elapsed_time, 0.0);
    assert_eq!(snap.marker_count, 5);
    let numbers: Vec<u32> = snap.markers.iter().map(|m| m.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert!(snap.markers.iter().all(|m| !m.clicked && m.remaining_decay_ms.is_none()));
}

#[test]
fn test_invalid_counts_leave_state_unchanged() {
    let mut s = session(2);
    s.start(4).expect("valid count");
    s.click(1);
    s.tick(0.5);
    let before = s.snapshot();

    for bad in [1_i64, 0, -3] {
        let err = s.start(bad).unwrap_err();
        assert!(err.is_invalid_configuration(), "count {bad} should be rejected");
        assert_eq!(s.snapshot(), before);
    }

    for bad in ["x", "1", "", "2.5"] {
        let err = s.start_with_input(bad).unwrap_err();
        assert!(err.is_invalid_configuration(), "input {bad:?} should be rejected");
        assert_eq!(s.snapshot(), before);
    }
}

#[test]
fn test_invalid_count_from_idle_stays_idle() {
    let mut s = session(3);
    assert!(s.start(1).is_err());
    assert_eq!(s.status(), GameStatus::Idle);
    assert_eq!(s.markers().count(), 0);
}

#[test]
fn test_start_with_input_accepts_padded_number() {
    let mut s = session(4);
    s.start_with_input(" 6 ").expect("valid input");
    assert_eq!(s.marker_count(), 6);
}

#[test]
fn test_in_order_clicks_score_every_marker() {
    let mut s = session(5);
    s.start(6).expect("valid count");

    for number in 1..=6 {
        s.click(number);
        assert_eq!(s.score(), number);
        assert_eq!(s.next_expected(), number + 1);
        assert_ne!(s.status(), GameStatus::Lost);
    }
    assert!(s.markers().all(|m| m.is_clicked()));
}

#[test]
fn test_out_of_order_click_loses() {
    let mut s = session(6);
    s.start(5).expect("valid count");

    s.click(2);

    assert_eq!(s.status(), GameStatus::Lost);
    assert!(!s.is_running());
    assert_eq!(s.score(), 0);
    assert_eq!(s.markers().count(), 5);

    s.click(1);
    assert_eq!(s.score(), 0);
    assert_eq!(s.status(), GameStatus::Lost);
}

#[test]
fn test_clicking_decaying_marker_loses() {
    let mut s = session(7);
    s.start(3).expect("valid count");
    s.click(1);
    s.click(1);
    assert_eq!(s.status(), GameStatus::Lost);
    assert_eq!(s.score(), 1);
}

#[test]
fn test_loss_freezes_decay_and_never_wins() {
    let mut s = session(8);
    s.start(3).expect("valid count");
    s.click(1);
    s.advance(millis(1000));
    s.click(3);
    let frozen = s.marker(1).and_then(|m| m.remaining_decay_ms());
    assert_eq!(frozen, Some(2000));

    s.advance(millis(10_000));
    assert_eq!(s.status(), GameStatus::Lost);
    assert_eq!(s.marker(1).and_then(|m| m.remaining_decay_ms()), frozen);
    assert_eq!(s.pending_tasks(), 0);
}

#[test]
fn test_decay_counts_down_then_removes() {
    let mut s = session(9);
    s.start(2).expect("valid count");
    s.click(1);
    assert_eq!(s.marker(1).and_then(|m| m.remaining_decay_ms()), Some(3000));

    let mut last = 3000;
    for _ in 0..299 {
        s.advance(millis(10));
        let remaining = s
            .marker(1)
            .and_then(|m| m.remaining_decay_ms())
            .expect("still decaying");
        assert!(remaining < last);
        assert!(remaining > 0);
        last = remaining;
    }
    assert_eq!(last, 10);

    s.advance(millis(10));
    assert!(s.marker(1).is_none());
    assert!(s.is_running());
}

#[test]
fn test_huge_advance_resolves_board() {
    let mut s = session(4);
    s.start(2).expect("valid count");
    s.click(1);
    s.advance(millis(10));
    s.advance(Duration::MAX);

    assert!(s.marker(1).is_none());
    assert_eq!(s.status(), GameStatus::InProgress);
    assert_eq!(s.now(), Duration::MAX);

    s.click(2);
    s.advance(millis(10));
    assert!(s.markers().next().is_none());
    assert_eq!(s.status(), GameStatus::Won);
}

#[test]
fn test_huge_advance_without_clicks_changes_nothing() {
    let mut s = session(4);
    s.start(3).expect("valid count");
    s.advance(Duration::MAX);
    s.advance(Duration::MAX);

    assert_eq!(s.status(), GameStatus::InProgress);
    assert_eq!(s.markers().count(), 3);
    assert_eq!(s.score(), 0);
}

#[test]
fn test_decay_not_removed_early_with_coarse_advance() {
    let mut s = session(10);
    s.start(2).expect("valid count");
    s.click(1);
    s.advance(millis(2999));
    assert!(s.marker(1).is_some());
    s.advance(millis(1));
    assert!(s.marker(1).is_none());
}

#[test]
fn test_full_run_wins_after_decay() {
    let mut s = session(11);
    s.start(5).expect("valid count");
    for number in 1..=5 {
        s.click(number);
        s.advance(millis(200));
    }

    assert_eq!(s.status(), GameStatus::InProgress);
    assert!(s.is_running());

    s.advance(millis(3000));

    let snap = s.snapshot();
    assert_eq!(snap.outcome, GameStatus::Won);
    assert_eq!(snap.score, 5);
    assert!(snap.markers.is_empty());
    assert!(!snap.running);
    assert_eq!(snap.next_label(), "Finished");
}

#[test]
fn test_reset_returns_to_idle_defaults() {
    let mut s = session(12);
    s.set_autoplay(true);
    s.start(4).expect("valid count");
    s.click(1);
    s.tick(1.0);

    s.reset();

    let snap = s.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.elapsed_time, 0.0);
    assert_eq!(snap.next_expected, 1);
    assert!(snap.markers.is_empty());
    assert!(!snap.running);
    assert!(!snap.autoplay);
    assert_eq!(snap.outcome, GameStatus::Idle);
    assert_eq!(s.pending_tasks(), 0);

    s.advance(millis(10_000));
    assert_eq!(s.snapshot(), snap);
}

#[test]
fn test_old_timers_do_not_touch_new_game() {
    let mut s = session(13);
    s.start(3).expect("valid count");
    s.click(1);
    s.click(2);
    s.advance(millis(1000));

    s.reset();
    s.start(3).expect("valid count");
    s.advance(millis(5000));

    assert_eq!(s.markers().count(), 3);
    assert!(s.markers().all(|m| !m.is_clicked()));
    assert_eq!(s.status(), GameStatus::InProgress);
}

#[test]
fn test_restart_without_reset_discards_old_decay() {
    let mut s = session(14);
    s.start(3).expect("valid count");
    s.click(1);

    s.start(2).expect("valid count");
    s.advance(millis(5000));

    assert_eq!(s.markers().count(), 2);
    assert_eq!(s.score(), 0);
}

#[test]
fn test_tick_only_while_running() {
    let mut s = session(15);
    s.tick(1.0);
    assert_eq!(s.elapsed_time(), 0.0);

    s.start(3).expect("valid count");
    s.tick(0.25);
    s.tick(0.5);
    assert!((s.elapsed_time() - 0.75).abs() < 1e-9);

    s.tick(-1.0);
    s.tick(f64::NAN);
    assert!((s.elapsed_time() - 0.75).abs() < 1e-9);

    s.click(3);
    s.tick(1.0);
    assert!((s.elapsed_time() - 0.75).abs() < 1e-9);
}

#[test]
fn test_tick_leaves_markers_alone() {
    let mut s = session(16);
    s.start(3).expect("valid count");
    s.click(1);
    s.tick(10.0);
    assert_eq!(s.marker(1).and_then(|m| m.remaining_decay_ms()), Some(3000));
}

#[test]
fn test_click_while_idle_is_ignored() {
    let mut s = session(17);
    s.click(1);
    assert_eq!(s.status(), GameStatus::Idle);
    assert_eq!(s.score(), 0);
}

#[test]
fn test_snapshot_is_detached() {
    let mut s = session(18);
    s.start(3).expect("valid count");

    let mut snap = s.snapshot();
    snap.score = 42;
    snap.markers.clear();
    snap.running = false;

    let fresh = s.snapshot();
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.markers.len(), 3);
    assert!(fresh.running);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut s = session(19);
    s.start(2).expect("valid count");
    s.click(1);
    let json = serde_json::to_value(s.snapshot()).expect("serializable");
    assert_eq!(json["score"], 1);
    assert_eq!(json["outcome"], "InProgress");
    assert_eq!(json["markers"][0]["remaining_decay_ms"], 3000);
    assert!(json["markers"][1]["remaining_decay_ms"].is_null());
}

#[test]
fn test_overcrowded_board_reports_exhaustion() {
    let config = GameConfig::default().with_max_placement_attempts(2_000);
    let mut s = GameSession::seeded(config, 20).expect("valid config");

    let err = s.start(400).unwrap_err();

    assert!(matches!(
        err.kind,
        GameErrorKind::PlacementExhausted { count: 400, .. }
    ));
    assert_eq!(s.status(), GameStatus::Idle);
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig::default().with_board_size(10.0);
    assert!(GameSession::with_config(config).is_err());
}
