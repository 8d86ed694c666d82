//! Export render target: the survey document at a fixed width

use super::document::{SurveyDocument, MIN_DOCUMENT_WIDTH};
use crate::state::FormSnapshot;
use ratatui::buffer::Buffer;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared visibility flag of the action bar
#[derive(Debug, Clone)]
pub struct ControlsVisibility(Arc<AtomicBool>);

impl ControlsVisibility {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_visible(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Hide the controls until the returned guard is dropped
    pub fn hide(&self) -> HiddenControls {
        self.0.store(false, Ordering::SeqCst);
        HiddenControls(Arc::clone(&self.0))
    }
}

impl Default for ControlsVisibility {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the controls on drop
#[must_use = "controls become visible again when the guard is dropped"]
#[derive(Debug)]
pub struct HiddenControls(Arc<AtomicBool>);

impl Drop for HiddenControls {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Root container of the rendered form
#[derive(Debug, Clone)]
pub struct FormContainer {
    snapshot: FormSnapshot,
    width: u16,
    controls: ControlsVisibility,
}

impl FormContainer {
    /// Mount the container at the given width.
    ///
    /// Returns `None` when there is no room to lay the document out, e.g.
    /// before the terminal reported its size.
    pub fn mount(snapshot: FormSnapshot, width: u16, controls: ControlsVisibility) -> Option<Self> {
        if width < MIN_DOCUMENT_WIDTH {
            return None;
        }
        Some(Self {
            snapshot,
            width,
            controls,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    /// Render the full document as it currently looks
    pub fn render(&self) -> Buffer {
        SurveyDocument {
            response: &self.snapshot.response,
            errors: &self.snapshot.errors,
            cursor: None,
            show_actions: self.controls.is_visible(),
            width: self.width,
        }
        .to_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldName, FormStore};

    fn has_text(buffer: &Buffer, needle: &str) -> bool {
        (0..buffer.area.height).any(|y| {
            let row: String = (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            row.contains(needle)
        })
    }

    mod visibility {
        use super::*;

        #[test]
        fn test_guard_restores_on_drop() {
            let controls = ControlsVisibility::new();
            {
                let _hidden = controls.hide();
                assert!(!controls.is_visible());
            }
            assert!(controls.is_visible());
        }

        #[test]
        fn test_clones_share_the_flag() {
            let controls = ControlsVisibility::new();
            let other = controls.clone();
            let hidden = controls.hide();
            assert!(!other.is_visible());
            drop(hidden);
            assert!(other.is_visible());
        }
    }

    mod container {
        use super::*;

        #[test]
        fn test_too_narrow_is_not_mounted() {
            let snapshot = FormStore::new().snapshot();
            assert!(FormContainer::mount(snapshot.clone(), 0, ControlsVisibility::new()).is_none());
            assert!(FormContainer::mount(snapshot, 80, ControlsVisibility::new()).is_some());
        }

        #[test]
        fn test_render_omits_hidden_controls() {
            let controls = ControlsVisibility::new();
            let container =
                FormContainer::mount(FormStore::new().snapshot(), 80, controls.clone()).unwrap();

            assert!(has_text(&container.render(), "Exportar a PDF"));
            let _hidden = controls.hide();
            assert!(!has_text(&container.render(), "Exportar a PDF"));
        }

        #[test]
        fn test_render_keeps_long_single_line_values() {
            let mut store = FormStore::new();
            let address = format!("{} FINALDELTEXTO", "Calle San Martin y pasaje del barrio".repeat(2));
            assert!(address.chars().count() > 78);
            store.set_field(FieldName::Direccion, address).unwrap();

            let container =
                FormContainer::mount(store.snapshot(), 78, ControlsVisibility::new()).unwrap();

            assert!(has_text(&container.render(), "FINALDELTEXTO"));
        }
    }
}
