//! Terminal host for Strictly Points.
//!
//! Everything here is presentation glue around [`strictly_points`]: settings
//! loading, the command line, an interactive terminal renderer and a
//! headless autoplay simulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod settings;
mod simulate;
mod terminal;
mod ui;
mod viewport;

// Crate-level exports - Application state
pub use app::App;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Settings
pub use settings::{ConfigError, DEFAULT_SETTINGS_PATH, Settings, UiSettings};

// Crate-level exports - Runners
pub use simulate::run_simulation;
pub use terminal::{PlayOptions, run_tui};

// Crate-level exports - Rendering helpers
pub use viewport::BoardViewport;
