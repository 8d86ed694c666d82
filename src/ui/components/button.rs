//! Button component for TUI

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Inline bracketed button, e.g. `[ Enviar Formulario ]`
pub fn action_button_spans(content: &str, is_selected: bool) -> Vec<Span<'static>> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    vec![
        Span::styled("[", border_style),
        Span::styled(format!(" {content} "), text_style),
        Span::styled("]", border_style),
    ]
}
