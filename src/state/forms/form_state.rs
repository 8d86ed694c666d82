//! Form state store: owns the survey response and its error map

use super::field::FieldEvent;
use crate::state::checklist::{toggle_member, ToggleOutcome};
use crate::state::survey::{ErrorMap, FieldName, SurveyResponse};
use thiserror::Error;
use tokio::sync::watch;

/// Errors raised when a mutation targets a field of the wrong shape
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("field `{0}` holds a selection list; toggle its options instead")]
    NotScalar(FieldName),
    #[error("field `{0}` holds a single value; set it instead")]
    NotList(FieldName),
}

/// Immutable view published to subscribers after every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub response: SurveyResponse,
    pub errors: ErrorMap,
    /// Increases by one with every published change
    pub revision: u64,
}

impl FormSnapshot {
    /// Error message currently shown for a field
    #[cfg(test)]
    pub fn error(&self, name: FieldName) -> Option<&str> {
        self.errors.get(&name).map(String::as_str)
    }
}

/// Single owner of the response and error map for one editing session
#[derive(Debug)]
pub struct FormStore {
    response: SurveyResponse,
    errors: ErrorMap,
    revision: u64,
    publisher: watch::Sender<FormSnapshot>,
}

impl FormStore {
    /// Blank form dated today
    pub fn new() -> Self {
        Self::with_response(SurveyResponse::new())
    }

    pub fn with_response(response: SurveyResponse) -> Self {
        let errors = ErrorMap::new();
        let (publisher, _) = watch::channel(FormSnapshot {
            response: response.clone(),
            errors: errors.clone(),
            revision: 0,
        });
        Self {
            response,
            errors,
            revision: 0,
            publisher,
        }
    }

    pub fn response(&self) -> &SurveyResponse {
        &self.response
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    #[cfg(test)]
    pub fn error(&self, name: FieldName) -> Option<&str> {
        self.errors.get(&name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current state as an owned snapshot
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            response: self.response.clone(),
            errors: self.errors.clone(),
            revision: self.revision,
        }
    }

    /// Receive a fresh snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.publisher.subscribe()
    }

    /// Replace a scalar value. Any error shown for the field is dropped without re-validating.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) -> Result<(), StoreError> {
        let slot = self
            .response
            .text_mut(name)
            .ok_or(StoreError::NotScalar(name))?;
        *slot = value.into();
        self.errors.remove(&name);
        self.publish();
        Ok(())
    }

    /// Toggle one option of a multi-select field, evicting the oldest selection past `max_count`
    pub fn toggle_list_member(
        &mut self,
        name: FieldName,
        value: &str,
        max_count: Option<usize>,
    ) -> Result<ToggleOutcome, StoreError> {
        let selection = self
            .response
            .list_mut(name)
            .ok_or(StoreError::NotList(name))?;
        let outcome = toggle_member(selection, value, max_count);
        if let ToggleOutcome::AddedEvicting(evicted) = &outcome {
            tracing::debug!("{name}: selecting {value} dropped {evicted}");
        }
        self.errors.remove(&name);
        self.publish();
        Ok(outcome)
    }

    /// Apply a change event from the render layer, using the field's configured limit
    pub fn apply(&mut self, event: FieldEvent) -> Result<(), StoreError> {
        match event {
            FieldEvent::Set { name, value } => self.set_field(name, value),
            FieldEvent::Toggle { name, value } => self
                .toggle_list_member(name, &value, name.max_selections())
                .map(|_| ()),
        }
    }

    /// Replace the whole error map, typically with a fresh validation result
    pub fn replace_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
        self.publish();
    }

    /// Start a new blank survey dated today
    pub fn reset(&mut self) {
        self.response = SurveyResponse::new();
        self.errors.clear();
        self.publish();
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.publisher.send_replace(self.snapshot());
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validation::validate;
    use pretty_assertions::assert_eq;

    fn store() -> FormStore {
        FormStore::with_response(SurveyResponse::dated("2026-10-17"))
    }

    mod set_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_replaces_value() {
            let mut store = store();
            store.set_field(FieldName::Lote, "12").unwrap();
            assert_eq!(store.response().lote, "12");
        }

        #[test]
        fn test_rejects_list_field() {
            let mut store = store();
            assert_eq!(
                store.set_field(FieldName::UsosSum, "otro"),
                Err(StoreError::NotScalar(FieldName::UsosSum))
            );
        }

        #[test]
        fn test_clears_error_even_when_still_invalid() {
            let mut store = store();
            store.replace_errors(validate(store.response()));
            assert!(store.error(FieldName::Lote).is_some());

            store.set_field(FieldName::Lote, "   ").unwrap();

            assert!(store.error(FieldName::Lote).is_none());
            assert!(store.error(FieldName::Direccion).is_some());
            // The error comes back on the next full validation
            store.replace_errors(validate(store.response()));
            assert!(store.error(FieldName::Lote).is_some());
        }

        #[test]
        fn test_every_field_edit_clears_its_error() {
            for name in FieldName::ALL {
                let mut store = store();
                let mut errors = ErrorMap::new();
                errors.insert(name, "error".to_string());
                store.replace_errors(errors);

                let event = if name.is_list() {
                    FieldEvent::toggle(name, "otro")
                } else {
                    FieldEvent::set(name, "x")
                };
                store.apply(event).unwrap();

                assert!(store.errors().is_empty(), "{name} kept its error");
            }
        }
    }

    mod toggle_list_member {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejects_scalar_field() {
            let mut store = store();
            assert_eq!(
                store.toggle_list_member(FieldName::Gas, "red", None),
                Err(StoreError::NotList(FieldName::Gas))
            );
        }

        #[test]
        fn test_fifo_eviction_through_apply() {
            let mut store = store();
            for value in ["inseguridad", "desempleo", "falta_alumbrado", "otro"] {
                store
                    .apply(FieldEvent::toggle(FieldName::ProblemasBarrio, value))
                    .unwrap();
            }
            assert_eq!(
                store.response().problemas_barrio,
                vec!["desempleo", "falta_alumbrado", "otro"]
            );
        }

        #[test]
        fn test_unbounded_participacion() {
            let mut store = store();
            for option in FieldName::Participacion.options() {
                store
                    .apply(FieldEvent::toggle(FieldName::Participacion, option.value))
                    .unwrap();
            }
            assert_eq!(
                store.response().participacion.len(),
                FieldName::Participacion.options().len()
            );
        }

        #[test]
        fn test_double_toggle_restores_list() {
            let mut store = store();
            store
                .apply(FieldEvent::toggle(FieldName::UsosSum, "centro_salud"))
                .unwrap();
            let before = store.response().usos_sum.clone();
            store
                .apply(FieldEvent::toggle(FieldName::UsosSum, "otro"))
                .unwrap();
            store
                .apply(FieldEvent::toggle(FieldName::UsosSum, "otro"))
                .unwrap();
            assert_eq!(store.response().usos_sum, before);
        }
    }

    mod subscription {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_subscriber_sees_each_mutation() {
            let mut store = store();
            let mut rx = store.subscribe();
            assert!(!rx.has_changed().unwrap());

            store.set_field(FieldName::Encuestador, "Marta").unwrap();

            assert!(rx.has_changed().unwrap());
            let snapshot = rx.borrow_and_update().clone();
            assert_eq!(snapshot.response.encuestador, "Marta");
            assert_eq!(snapshot.revision, 1);
            assert!(!rx.has_changed().unwrap());
        }

        #[test]
        fn test_snapshot_carries_errors() {
            let mut store = store();
            let rx = store.subscribe();
            store.replace_errors(validate(store.response()));
            assert_eq!(rx.borrow().errors.len(), 11);
            assert_eq!(
                rx.borrow().error(FieldName::Lote),
                Some("El número de lote es requerido.")
            );
        }

        #[test]
        fn test_mutation_without_subscribers_does_not_fail() {
            let mut store = store();
            store.set_field(FieldName::Lote, "1").unwrap();
            assert_eq!(store.revision(), 1);
        }
    }

    #[test]
    fn test_reset_returns_to_blank() {
        let mut store = store();
        store.set_field(FieldName::Lote, "9").unwrap();
        store.replace_errors(validate(store.response()));
        store.reset();
        assert!(store.errors().is_empty());
        assert_eq!(store.response().lote, "");
        assert_eq!(store.response().fecha.len(), 10);
    }
}
