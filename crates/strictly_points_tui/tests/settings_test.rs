//! Tests for settings file loading.

use std::io::Write;
use std::path::Path;
use strictly_points_tui::Settings;

fn write_settings(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write settings");
    file
}

#[test]
fn test_partial_settings_fill_defaults() {
    let file = write_settings(
        r#"
[game]
board_size = 800.0
decay_duration_ms = 1500

[ui]
log_file = "game.log"
"#,
    );

    let settings = Settings::from_file(file.path()).expect("valid settings");

    assert_eq!(*settings.game().board_size(), 800.0);
    assert_eq!(*settings.game().decay_duration_ms(), 1500);
    assert_eq!(*settings.game().marker_size(), 50.0);
    assert_eq!(*settings.game().autoplay_delay_ms(), 500);
    assert_eq!(settings.ui().log_file(), Path::new("game.log"));
}

#[test]
fn test_empty_file_is_all_defaults() {
    let file = write_settings("");
    let settings = Settings::from_file(file.path()).expect("valid settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_malformed_settings_rejected() {
    let file = write_settings("[game]\nboard_size = \"big\"\n");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse settings"));
}

#[test]
fn test_unplayable_geometry_rejected() {
    let file = write_settings("[game]\nboard_size = 40.0\n");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Invalid game settings"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.toml");
    let err = Settings::load(Some(missing.as_path())).unwrap_err();
    assert!(err.message.starts_with("Failed to read settings file"));
}
