//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the form's action shortcuts
/// - macOS: SUPER (Cmd key) or CONTROL
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIERS: KeyModifiers = KeyModifiers::SUPER.union(KeyModifiers::CONTROL);

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL;

/// Whether a key event carries the action modifier
pub fn is_action(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(ACTION_MODIFIERS)
}

#[cfg(target_os = "macos")]
pub const ACTION_PREFIX: &str = "Cmd+";

#[cfg(not(target_os = "macos"))]
pub const ACTION_PREFIX: &str = "^";
