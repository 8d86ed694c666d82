//! Form rendering module
//!
//! - `field_renderer`: per-kind field renderers
//! - the editable form view, scrolled to keep the focused field visible

mod field_renderer;

pub use field_renderer::{render_field, FieldProps};

use super::document::{DocumentLayout, SurveyDocument};
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the editable survey form
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    let snapshot = &app.state.snapshot;
    let document = SurveyDocument {
        response: &snapshot.response,
        errors: &snapshot.errors,
        cursor: Some(&app.state.cursor),
        show_actions: app.controls.is_visible(),
        width: inner.width,
    };
    let layout = document.layout();
    let scroll = focus_scroll(&layout, app, inner.height);

    frame.render_widget(
        Paragraph::new(layout.lines).block(block).scroll((scroll, 0)),
        area,
    );
}

/// Offset that puts the focused rows in the upper third of the viewport
fn focus_scroll(layout: &DocumentLayout, app: &App, viewport: u16) -> u16 {
    scroll_for(
        layout.focus_rows(&app.state.cursor).map(|rows| rows.start),
        layout.height(),
        viewport as usize,
    )
}

pub(crate) fn scroll_for(focus_row: Option<usize>, content: usize, viewport: usize) -> u16 {
    let max_scroll = content.saturating_sub(viewport);
    let wanted = focus_row
        .map(|row| row.saturating_sub(viewport / 3))
        .unwrap_or(0);
    u16::try_from(wanted.min(max_scroll)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_document_does_not_scroll() {
        assert_eq!(scroll_for(Some(3), 200, 30), 0);
        assert_eq!(scroll_for(None, 200, 30), 0);
    }

    #[test]
    fn test_focus_is_kept_in_upper_third() {
        assert_eq!(scroll_for(Some(100), 200, 30), 90);
    }

    #[test]
    fn test_scroll_stops_at_end() {
        assert_eq!(scroll_for(Some(199), 200, 30), 170);
        assert_eq!(scroll_for(Some(10), 20, 30), 0);
    }
}
