//! Print preview: the read-only document in print style

use super::document::SurveyDocument;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the print preview
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Vista Previa ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);

    let snapshot = &app.state.snapshot;
    let layout = SurveyDocument::print(&snapshot.response, &snapshot.errors, inner.width).layout();
    let scroll = clamp_scroll(app.state.preview_scroll, layout.height(), inner.height);

    frame.render_widget(
        Paragraph::new(layout.lines).block(block).scroll((scroll, 0)),
        area,
    );
}

/// Keep the last page of the preview anchored at the bottom
pub fn clamp_scroll(scroll: u16, content: usize, viewport: u16) -> u16 {
    let max_scroll = content.saturating_sub(viewport as usize);
    scroll.min(u16::try_from(max_scroll).unwrap_or(u16::MAX))
}
