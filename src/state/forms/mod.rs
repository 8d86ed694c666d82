//! Form domain layer
//!
//! Owns the survey response, its errors, the change events the render layer
//! emits, and keyboard focus over the fields.

mod cursor;
mod field;
mod form_state;

pub use cursor::{Focus, FormAction, FormCursor};
pub use field::{cycle_choice, pop_char, push_char, push_newline, FieldEvent};
pub use form_state::{FormSnapshot, FormStore};
