//! Stateless UI rendering from a game snapshot.

use crate::app::App;
use crate::viewport::BoardViewport;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_points::{GameSnapshot, GameStatus, MarkerView};

/// Draws the whole screen and returns where the board landed.
pub fn draw(frame: &mut Frame, app: &App) -> BoardViewport {
    let snapshot = app.snapshot();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Info
            Constraint::Min(10),   // Board
            Constraint::Length(1), // Next
            Constraint::Length(3), // Status
        ])
        .split(area);

    draw_title(frame, chunks[0], snapshot.outcome);
    draw_info(frame, chunks[1], app, &snapshot);

    let block = Block::default().borders(Borders::ALL).title("Board");
    let board_area = block.inner(chunks[2]);
    frame.render_widget(block, chunks[2]);
    let viewport = BoardViewport::new(board_area, app.session().config());
    for marker in &snapshot.markers {
        draw_marker(frame, &viewport, marker);
    }

    let next = Paragraph::new(format!("Next: {}", snapshot.next_label()))
        .alignment(Alignment::Center);
    frame.render_widget(next, chunks[3]);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(controls_hint(&snapshot)));
    frame.render_widget(status, chunks[4]);

    viewport
}

fn draw_title(frame: &mut Frame, area: ratatui::layout::Rect, outcome: GameStatus) {
    let color = match outcome {
        GameStatus::Won => Color::Green,
        GameStatus::Lost => Color::Red,
        GameStatus::Idle | GameStatus::InProgress => Color::Cyan,
    };
    let title = Paragraph::new(outcome.headline())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_info(frame: &mut Frame, area: ratatui::layout::Rect, app: &App, snapshot: &GameSnapshot) {
    let input_style = if app.count_editable() {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::raw("Points: "),
        Span::styled(app.count_input().to_string(), input_style),
        Span::raw(format!("   Time: {}", snapshot.time_label())),
        Span::raw(format!(
            "   Auto Play: {}",
            if snapshot.autoplay { "ON" } else { "OFF" }
        )),
    ];
    if !app.marker_input().is_empty() {
        spans.push(Span::styled(
            format!("   Click #{}", app.marker_input()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let info = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(info, area);
}

fn draw_marker(frame: &mut Frame, viewport: &BoardViewport, marker: &MarkerView) {
    let rect = viewport.marker_rect(marker);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let style = if marker.clicked {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(marker.number.to_string())];
    if let Some(countdown) = marker.countdown_label() {
        lines.push(Line::from(countdown));
    }

    let widget = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(widget, rect);
}

fn controls_hint(snapshot: &GameSnapshot) -> &'static str {
    match snapshot.outcome {
        GameStatus::Idle => " Enter: Play  a: Auto Play  q: Quit ",
        GameStatus::InProgress => " click or type a number + Enter  r: Restart  a: Auto Play  q: Quit ",
        GameStatus::Won | GameStatus::Lost => " Enter: Play Again  q: Quit ",
    }
}
