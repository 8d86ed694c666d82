//! Layout components (content column, status bar)

use crate::app::App;
use crate::platform::ACTION_PREFIX;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the document column gets on large terminals
pub const MAX_CONTENT_WIDTH: u16 = 100;

/// Create the main layout: a centered content column above the status bar
pub fn create_layout(area: Rect) -> Rect {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = chunks[0];
    let width = content_width(content.width);
    Rect {
        x: content.x + (content.width - width) / 2,
        width,
        ..content
    }
}

/// Width of the content column for a terminal of the given width
pub fn content_width(terminal_width: u16) -> u16 {
    terminal_width.min(MAX_CONTENT_WIDTH)
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Export in progress
    if app.is_exporting() {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(" ○ ", Style::default().fg(Color::Green)));
    }

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    // Error count
    let error_count = app.state.snapshot.errors.len();
    if error_count > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{error_count} campos con errores"),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = format!(" {ACTION_PREFIX}Q:salir ");
    let quit_len = quit_hint.chars().count() as u16;

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_len),
        y: area.height.saturating_sub(1),
        width: quit_len.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    let p = ACTION_PREFIX;
    match view {
        View::Form => {
            format!("Tab:sig  ←/→:opción  Espacio:marcar  {p}P:vista previa  {p}E:PDF  {p}S:enviar  {p}N:nuevo")
        }
        View::Preview => format!("j/k:desplazar  d/u:página  {p}E:PDF  Esc:volver"),
    }
}
