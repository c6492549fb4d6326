//! Interactive terminal game loop.

use crate::app::App;
use crate::settings::Settings;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// Options for an interactive session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Pre-filled marker count.
    pub count: Option<u32>,
    /// Start with autoplay enabled.
    pub autoplay: bool,
    /// Seed for reproducible layouts.
    pub seed: Option<u64>,
}

/// Runs the terminal game until the user quits.
#[instrument(skip(settings))]
pub fn run_tui(settings: &Settings, options: PlayOptions) -> Result<()> {
    let mut app = App::new(settings, options.seed)?;
    if let Some(count) = options.count {
        app.set_count_input(count);
    }
    app.set_autoplay(options.autoplay);

    info!("Starting Strictly Points TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_interval = Duration::from_millis(*settings.game().tick_interval_ms());
    let res = run_loop(&mut terminal, &mut app, frame_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    frame_interval: Duration,
) -> Result<()> {
    let mut last_frame = Instant::now();

    while !app.should_quit() {
        let mut viewport = None;
        terminal.draw(|frame| viewport = Some(ui::draw(frame, app)))?;
        app.set_viewport(viewport);

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.handle_mouse_click(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.on_frame(now - last_frame);
        last_frame = now;
    }

    Ok(())
}
