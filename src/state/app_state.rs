//! Application state definitions

use super::forms::{FormCursor, FormSnapshot};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    /// Read-only print-style rendering of the whole form
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Modal message the user must dismiss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// View-side state: what the render layer draws from
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_view: View,
    /// Latest snapshot received from the form store
    pub snapshot: FormSnapshot,
    pub cursor: FormCursor,
    pub preview_scroll: u16,
    /// Notification queue; the front one is displayed
    notifications: VecDeque<Notification>,
}

impl AppState {
    pub fn new(snapshot: FormSnapshot) -> Self {
        Self {
            current_view: View::Form,
            snapshot,
            cursor: FormCursor::new(),
            preview_scroll: 0,
            notifications: VecDeque::new(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message.into());
    }

    fn push(&mut self, kind: NotificationKind, message: String) {
        self.notifications.push_back(Notification { kind, message });
    }

    /// Notification currently on screen
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    pub fn open_preview(&mut self) {
        self.current_view = View::Preview;
        self.preview_scroll = 0;
    }

    pub fn close_preview(&mut self) {
        self.current_view = View::Form;
    }
}
