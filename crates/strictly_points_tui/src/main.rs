//! Strictly Points - terminal game and headless simulator.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use strictly_points_tui::{Cli, Command, PlayOptions, Settings, run_simulation, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            count,
            autoplay,
            seed,
        } => {
            // Log to file so the TUI owns the screen
            let log_file = std::fs::File::create(settings.ui().log_file())?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false)
                .init();

            run_tui(
                &settings,
                PlayOptions {
                    count,
                    autoplay,
                    seed,
                },
            )
        }
        Command::Simulate {
            count,
            seed,
            max_seconds,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            info!(?count, ?seed, max_seconds, "Running headless simulation");
            let snapshot =
                run_simulation(&settings, count, seed, Duration::from_secs(max_seconds))?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}
