//! Focus navigation across the survey fields and the action bar

use crate::state::survey::FieldName;

/// Buttons of the form's action bar, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    Preview,
    Export,
    #[default]
    Submit,
}

impl FormAction {
    pub const ALL: [FormAction; 3] = [Self::Preview, Self::Export, Self::Submit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Preview => "Vista Previa",
            Self::Export => "Exportar a PDF",
            Self::Submit => "Enviar Formulario",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Preview => Self::Export,
            Self::Export => Self::Submit,
            Self::Submit => Self::Preview,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Preview => Self::Submit,
            Self::Export => Self::Preview,
            Self::Submit => Self::Export,
        }
    }
}

/// What currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldName),
    Actions(FormAction),
}

/// Keyboard focus state of the form
#[derive(Debug, Clone, Default)]
pub struct FormCursor {
    /// 0..FieldName::ALL.len() are fields, the last slot is the action bar
    active_index: usize,
    /// Highlighted option inside a checkbox group
    pub option_index: usize,
    pub selected_action: FormAction,
}

impl FormCursor {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_count() -> usize {
        FieldName::ALL.len() + 1
    }

    pub fn focus(&self) -> Focus {
        match FieldName::ALL.get(self.active_index) {
            Some(name) => Focus::Field(*name),
            None => Focus::Actions(self.selected_action),
        }
    }

    /// Focused field, `None` when the action bar has focus
    pub fn field(&self) -> Option<FieldName> {
        match self.focus() {
            Focus::Field(name) => Some(name),
            Focus::Actions(_) => None,
        }
    }

    pub fn is_on_actions(&self) -> bool {
        matches!(self.focus(), Focus::Actions(_))
    }

    pub fn next_field(&mut self) {
        self.set_active((self.active_index + 1) % Self::slot_count());
    }

    pub fn prev_field(&mut self) {
        let count = Self::slot_count();
        self.set_active((self.active_index + count - 1) % count);
    }

    pub fn focus_field(&mut self, name: FieldName) {
        self.set_active(name.index());
    }

    pub fn focus_actions(&mut self) {
        self.set_active(FieldName::ALL.len());
    }

    fn set_active(&mut self, index: usize) {
        self.active_index = index.min(Self::slot_count() - 1);
        self.option_index = 0;
    }

    /// Move the option highlight inside a checkbox group, clamped to the option count
    pub fn next_option(&mut self, option_count: usize) {
        if option_count > 0 {
            self.option_index = (self.option_index + 1).min(option_count - 1);
        }
    }

    pub fn prev_option(&mut self) {
        self.option_index = self.option_index.saturating_sub(1);
    }
}
