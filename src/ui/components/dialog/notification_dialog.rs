//! Notification dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::{Notification, NotificationKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the notification overlay centered on the screen
pub fn render_notification_dialog(frame: &mut Frame, notification: &Notification) {
    let (title, color) = match notification.kind {
        NotificationKind::Error => ("Error", Color::Red),
        NotificationKind::Info => ("Aviso", Color::Green),
    };
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Presione "),
        Span::styled("Enter", key),
        Span::raw(" o "),
        Span::styled("Esc", key),
        Span::raw(" para cerrar"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: color,
            border_color: color,
            message: &notification.message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
