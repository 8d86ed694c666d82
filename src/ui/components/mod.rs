//! Reusable UI components

mod button;
mod dialog;

pub use button::action_button_spans;
pub use dialog::render_notification_dialog;
