//! Startup settings loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_points::GameConfig;
use tracing::{debug, info, instrument};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_PATH: &str = "strictly_points.toml";

/// Terminal host options.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// File that receives logs while the terminal UI owns the screen.
    log_file: PathBuf,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("strictly_points.log"),
        }
    }
}

/// Everything the host reads once at startup.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game constants.
    game: GameConfig,
    /// Terminal host options.
    ui: UiSettings,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse settings: {}", e))
        })?;

        settings
            .game
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid game settings: {}", e.kind())))?;

        info!(board_size = settings.game.board_size(), "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads an explicit settings file, or the default one if it exists.
    ///
    /// Without an explicit path and without a default file, built-in
    /// defaults are used.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("No settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
