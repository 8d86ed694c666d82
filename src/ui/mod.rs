//! UI module for rendering the TUI

mod components;
mod container;
mod document;
mod forms;
mod layout;
mod preview;
mod text;

pub use container::{ControlsVisibility, FormContainer};
pub use document::SurveyDocument;
pub use layout::content_width;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    match &app.state.current_view {
        View::Form => forms::draw_form(frame, main_area, app),
        View::Preview => preview::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    if let Some(notification) = app.state.current_notification() {
        components::render_notification_dialog(frame, notification);
    }
}
