//! Change events emitted by the render layer and per-kind input editing

use crate::state::catalog::FieldKind;
use crate::state::survey::FieldName;

/// Change notification carrying the field name and the new value or toggled option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Replace a scalar value
    Set { name: FieldName, value: String },
    /// Toggle one option of a multi-select field
    Toggle { name: FieldName, value: String },
}

impl FieldEvent {
    pub fn set(name: FieldName, value: impl Into<String>) -> Self {
        Self::Set {
            name,
            value: value.into(),
        }
    }

    pub fn toggle(name: FieldName, value: impl Into<String>) -> Self {
        Self::Toggle {
            name,
            value: value.into(),
        }
    }

    /// The field this event targets
    pub fn name(&self) -> FieldName {
        match self {
            Self::Set { name, .. } | Self::Toggle { name, .. } => *name,
        }
    }
}

/// Maximum length of the date input (`YYYY-MM-DD`)
const DATE_LEN: usize = 10;

/// Append a typed character to a scalar value, honoring the field's input constraints.
/// Returns `None` when the character is not accepted.
pub fn push_char(kind: FieldKind, current: &str, c: char) -> Option<String> {
    let accepted = match kind {
        FieldKind::Text | FieldKind::LongText { .. } => !c.is_control(),
        FieldKind::Number => c.is_ascii_digit(),
        FieldKind::Date => {
            (c.is_ascii_digit() || c == '-') && current.chars().count() < DATE_LEN
        }
        FieldKind::Choice(_) | FieldKind::MultiSelect { .. } => false,
    };
    accepted.then(|| {
        let mut value = current.to_string();
        value.push(c);
        value
    })
}

/// Insert a line break into a multi-line value
pub fn push_newline(kind: FieldKind, current: &str) -> Option<String> {
    matches!(kind, FieldKind::LongText { .. }).then(|| format!("{current}\n"))
}

/// Remove the last character of a scalar value. `None` when there is nothing to remove.
pub fn pop_char(kind: FieldKind, current: &str) -> Option<String> {
    if matches!(kind, FieldKind::Choice(_) | FieldKind::MultiSelect { .. }) || current.is_empty() {
        return None;
    }
    let mut value = current.to_string();
    value.pop();
    Some(value)
}

/// Next (or previous) option value of a single-select field, starting from unset
pub fn cycle_choice(kind: FieldKind, current: &str, forward: bool) -> Option<String> {
    let FieldKind::Choice(options) = kind else {
        return None;
    };
    if options.is_empty() {
        return None;
    }
    let position = options.iter().position(|o| o.value == current);
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => options.len() - 1,
        (Some(i), true) => (i + 1) % options.len(),
        (Some(0), false) => options.len() - 1,
        (Some(i), false) => i - 1,
    };
    Some(options[next].value.to_string())
}
