//! The full survey document: title, sections, fields and action bar
//!
//! Laid out once into lines, then either scrolled on screen or rendered whole
//! into an off-screen buffer for export.

use super::forms::{render_field, FieldProps};
use crate::state::catalog::{FORM_SUBTITLE, FORM_TITLE, SECTIONS};
use crate::state::{ErrorMap, FieldName, FormAction, FormCursor, SurveyResponse};
use crate::ui::components::action_button_spans;
use crate::ui::text::wrap_text;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::BTreeMap;

/// Narrowest width the document can be laid out at
pub const MIN_DOCUMENT_WIDTH: u16 = 40;

/// Rows a field occupies in the laid-out document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRows {
    pub start: usize,
    pub len: usize,
}

/// Result of laying out the document at a fixed width
#[derive(Debug, Default)]
pub struct DocumentLayout {
    pub lines: Vec<Line<'static>>,
    pub field_rows: BTreeMap<FieldName, FieldRows>,
    /// Row of the action bar, absent when the controls are hidden
    pub actions_row: Option<usize>,
}

impl DocumentLayout {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Row range the cursor currently points at
    pub fn focus_rows(&self, cursor: &FormCursor) -> Option<FieldRows> {
        match cursor.field() {
            Some(name) => self.field_rows.get(&name).copied(),
            None => self.actions_row.map(|start| FieldRows { start, len: 1 }),
        }
    }
}

/// Survey document widget
pub struct SurveyDocument<'a> {
    pub response: &'a SurveyResponse,
    pub errors: &'a ErrorMap,
    /// Focus highlight; `None` renders in print style
    pub cursor: Option<&'a FormCursor>,
    pub show_actions: bool,
    pub width: u16,
}

impl<'a> SurveyDocument<'a> {
    /// Print-style document with no focus highlight and no action bar
    pub fn print(response: &'a SurveyResponse, errors: &'a ErrorMap, width: u16) -> Self {
        Self {
            response,
            errors,
            cursor: None,
            show_actions: false,
            width,
        }
    }

    pub fn layout(&self) -> DocumentLayout {
        let width = self.width.max(MIN_DOCUMENT_WIDTH);
        let mut layout = DocumentLayout::default();
        let lines = &mut layout.lines;

        let title_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        for text in wrap_text(FORM_TITLE, width as usize) {
            lines.push(Line::styled(text, title_style).alignment(Alignment::Center));
        }
        for text in wrap_text(FORM_SUBTITLE, width as usize) {
            lines.push(
                Line::styled(text, Style::default().fg(Color::Gray)).alignment(Alignment::Center),
            );
        }
        lines.push(Line::from(""));

        for section in SECTIONS {
            lines.push(Line::styled(
                section.title.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                "─".repeat(width as usize),
                Style::default().fg(Color::DarkGray),
            ));

            for &name in section.fields {
                let focused = self.cursor.and_then(FormCursor::field) == Some(name);
                let props = FieldProps {
                    name,
                    error: self.errors.get(&name).map(String::as_str),
                    focused,
                    option_cursor: self
                        .cursor
                        .filter(|_| focused)
                        .map(|cursor| cursor.option_index),
                    width,
                };
                let field_lines = render_field(props, self.response.value(name));
                layout.field_rows.insert(
                    name,
                    FieldRows {
                        start: lines.len(),
                        len: field_lines.len(),
                    },
                );
                lines.extend(field_lines);
                lines.push(Line::from(""));
            }
        }

        if self.show_actions {
            let selected = self
                .cursor
                .filter(|cursor| cursor.is_on_actions())
                .map(|cursor| cursor.selected_action);
            let mut spans = Vec::new();
            for action in FormAction::ALL {
                if !spans.is_empty() {
                    spans.push(Span::raw("  "));
                }
                spans.extend(action_button_spans(action.label(), selected == Some(action)));
            }
            layout.actions_row = Some(lines.len());
            lines.push(Line::from(spans).alignment(Alignment::Center));
        }

        layout
    }

    /// Render the whole document into a buffer exactly as tall as its content
    pub fn to_buffer(&self) -> Buffer {
        let layout = self.layout();
        let width = self.width.max(MIN_DOCUMENT_WIDTH);
        let height = u16::try_from(layout.height()).unwrap_or(u16::MAX);
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        Paragraph::new(layout.lines).render(area, &mut buffer);
        buffer
    }
}
