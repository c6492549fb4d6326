//! Command-line interface for strictly_points.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Points - click the numbered markers in order before they fade
#[derive(Parser, Debug)]
#[command(name = "strictly_points")]
#[command(about = "Click numbered markers in ascending order", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file (defaults to ./strictly_points.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Marker count pre-filled in the input
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Start with autoplay enabled
        #[arg(long)]
        autoplay: bool,

        /// Seed for reproducible marker layouts
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a headless autoplay game and print the final state as JSON
    Simulate {
        /// Number of markers
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Seed for reproducible marker layouts
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after this many seconds of game time
        #[arg(long, default_value = "120")]
        max_seconds: u64,
    },
}
