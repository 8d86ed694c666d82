//! Application state module

mod app_state;
pub mod catalog;
mod checklist;
mod forms;
mod submission;
mod survey;
pub mod validation;

pub use app_state::*;
pub use forms::*;
pub use submission::*;
pub use survey::*;
