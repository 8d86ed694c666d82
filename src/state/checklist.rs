//! Checkbox-group toggle logic for multi-select fields

/// What a toggle did to the selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The value was appended and the oldest selection was dropped to stay within the limit
    AddedEvicting(String),
}

/// Toggle `value` in `selection`.
///
/// A present value is removed, keeping the order of the rest. An absent value
/// is appended; if that pushes the list past `max_count`, the oldest entry
/// (index 0) is evicted. The new selection always wins. `None` or `Some(0)`
/// means unbounded.
pub fn toggle_member(
    selection: &mut Vec<String>,
    value: &str,
    max_count: Option<usize>,
) -> ToggleOutcome {
    if selection.iter().any(|item| item == value) {
        selection.retain(|item| item != value);
        return ToggleOutcome::Removed;
    }

    selection.push(value.to_string());

    match max_count.filter(|max| *max > 0) {
        Some(max) if selection.len() > max => ToggleOutcome::AddedEvicting(selection.remove(0)),
        _ => ToggleOutcome::Added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_appends_absent_value() {
        let mut selection = list(&["talleres"]);
        let outcome = toggle_member(&mut selection, "deportes", None);
        assert_eq!(outcome, ToggleOutcome::Added);
        assert_eq!(selection, list(&["talleres", "deportes"]));
    }

    #[test]
    fn test_removes_present_value_preserving_order() {
        let mut selection = list(&["a", "b", "c"]);
        let outcome = toggle_member(&mut selection, "b", Some(3));
        assert_eq!(outcome, ToggleOutcome::Removed);
        assert_eq!(selection, list(&["a", "c"]));
    }

    #[test]
    fn test_double_toggle_of_last_value_restores_list() {
        let original = list(&["inseguridad", "desempleo"]);
        let mut selection = original.clone();
        toggle_member(&mut selection, "desempleo", Some(3));
        toggle_member(&mut selection, "desempleo", Some(3));
        assert_eq!(selection, original);
    }

    #[test]
    fn test_double_toggle_of_new_value_restores_list() {
        let original = list(&["a", "b"]);
        let mut selection = original.clone();
        toggle_member(&mut selection, "c", None);
        toggle_member(&mut selection, "c", None);
        assert_eq!(selection, original);
    }

    #[test]
    fn test_fourth_value_evicts_oldest() {
        let mut selection = list(&["inseguridad", "desempleo", "falta_alumbrado"]);
        let outcome = toggle_member(&mut selection, "otro", Some(3));
        assert_eq!(
            outcome,
            ToggleOutcome::AddedEvicting("inseguridad".to_string())
        );
        assert_eq!(selection, list(&["desempleo", "falta_alumbrado", "otro"]));
    }

    #[test]
    fn test_limit_of_two() {
        let mut selection = Vec::new();
        for value in ["a", "b", "c", "d"] {
            toggle_member(&mut selection, value, Some(2));
            assert!(selection.len() <= 2);
        }
        assert_eq!(selection, list(&["c", "d"]));
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let mut selection = Vec::new();
        for value in ["a", "b", "c", "d", "e"] {
            assert_eq!(
                toggle_member(&mut selection, value, Some(0)),
                ToggleOutcome::Added
            );
        }
        assert_eq!(selection.len(), 5);
    }
}
