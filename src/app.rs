//! Application state and core logic

use crate::config::SurveyConfig;
use crate::export::{
    BufferRasterizer, DocumentAssembler, ExportError, ExportOutcome, ExportPipeline,
    PrintPdfAssembler, Rasterizer, EXPORT_FILE_NAME,
};
use crate::platform::is_action;
use crate::state::catalog::{FieldKind, FORM_TITLE};
use crate::state::{
    cycle_choice, pop_char, push_char, push_newline, AppState, FieldEvent, FieldName, Focus,
    FormAction, FormCursor, FormSnapshot, FormStore, LogSink, SubmissionHandler, SubmitOutcome, View,
};
use crate::ui::{content_width, ControlsVisibility, FormContainer, SurveyDocument};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Shown when submission is blocked by validation errors
pub const SUBMIT_BLOCKED: &str =
    "Por favor, corrija los errores marcados en el formulario antes de enviar.";
/// Shown when the sink accepted the response
pub const SUBMIT_ACCEPTED: &str = "¡Formulario enviado! Revise el registro para ver los datos.";

/// Rows scrolled by a preview page step
const PREVIEW_PAGE: u16 = 10;

type ExportResult = Result<ExportOutcome, ExportError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    store: FormStore,
    snapshots: watch::Receiver<FormSnapshot>,
    submission: SubmissionHandler,
    export: ExportPipeline,
    export_tx: mpsc::UnboundedSender<ExportResult>,
    export_rx: mpsc::UnboundedReceiver<ExportResult>,
    /// Visibility of the action bar, hidden while an export captures the form
    pub controls: ControlsVisibility,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app with the default sink and PDF capabilities
    pub fn new(config: &SurveyConfig) -> Self {
        let rasterizer: Arc<dyn Rasterizer> = Arc::new(BufferRasterizer);
        let assembler: Arc<dyn DocumentAssembler> =
            Arc::new(PrintPdfAssembler::new(config.export_dir(), FORM_TITLE));
        Self::with_parts(
            FormStore::new(),
            SubmissionHandler::new(Box::new(LogSink)),
            ExportPipeline::new(Some(rasterizer), Some(assembler)),
        )
    }

    pub fn with_parts(
        store: FormStore,
        submission: SubmissionHandler,
        export: ExportPipeline,
    ) -> Self {
        let snapshots = store.subscribe();
        let state = AppState::new(store.snapshot());
        let (export_tx, export_rx) = mpsc::unbounded_channel();

        Self {
            state,
            store,
            snapshots,
            submission,
            export,
            export_tx,
            export_rx,
            controls: ControlsVisibility::new(),
            terminal_size: None,
            status_message: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_busy()
    }

    /// Pull the latest published snapshot into the view state
    pub fn sync_view(&mut self) {
        if self.snapshots.has_changed().unwrap_or(false) {
            self.state.snapshot = self.snapshots.borrow_and_update().clone();
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Notification dialog is modal
        if self.state.current_notification().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notification();
            }
            return Ok(());
        }

        self.status_message = None;

        if is_action(key.modifiers) {
            match key.code {
                KeyCode::Char('p') => self.toggle_preview(),
                KeyCode::Char('e') => self.start_export(),
                KeyCode::Char('s') => self.submit().await,
                KeyCode::Char('n') => self.new_survey(),
                KeyCode::Char('q') => self.quit(),
                _ => {}
            }
        } else {
            match self.state.current_view {
                View::Form => self.handle_form_key(key).await,
                View::Preview => self.handle_preview_key(key),
            }
        }

        self.sync_view();
        Ok(())
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match self.state.cursor.focus() {
            Focus::Actions(action) => self.handle_actions_key(key, action).await,
            Focus::Field(name) => self.handle_field_key(key, name),
        }
    }

    async fn handle_actions_key(&mut self, key: KeyEvent, action: FormAction) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.cursor.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.cursor.prev_field(),
            KeyCode::Left | KeyCode::Char('h') => self.state.cursor.selected_action = action.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.state.cursor.selected_action = action.next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.trigger(action).await,
            _ => {}
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent, name: FieldName) {
        let kind = name.kind();
        let option_count = name.options().len();

        match (key.code, kind) {
            (KeyCode::Tab, _) => self.state.cursor.next_field(),
            (KeyCode::BackTab, _) => self.state.cursor.prev_field(),

            // Up/Down walk through checkbox options before leaving the group
            (KeyCode::Down, FieldKind::MultiSelect { .. })
                if self.state.cursor.option_index + 1 < option_count =>
            {
                self.state.cursor.next_option(option_count)
            }
            (KeyCode::Up, FieldKind::MultiSelect { .. }) if self.state.cursor.option_index > 0 => {
                self.state.cursor.prev_option()
            }
            (KeyCode::Down, _) => self.state.cursor.next_field(),
            (KeyCode::Up, _) => self.state.cursor.prev_field(),

            (KeyCode::Char(' '), FieldKind::MultiSelect { options, .. }) => {
                if let Some(option) = options.get(self.state.cursor.option_index) {
                    self.apply(FieldEvent::toggle(name, option.value));
                }
            }
            (KeyCode::Left | KeyCode::Right, FieldKind::Choice(_)) => {
                let forward = key.code == KeyCode::Right;
                let current = self.current_text(name);
                if let Some(value) = cycle_choice(kind, &current, forward) {
                    self.apply(FieldEvent::set(name, value));
                }
            }
            (KeyCode::Char(' '), FieldKind::Choice(_)) => {
                let current = self.current_text(name);
                if let Some(value) = cycle_choice(kind, &current, true) {
                    self.apply(FieldEvent::set(name, value));
                }
            }
            (KeyCode::Delete, FieldKind::Choice(_)) => self.apply(FieldEvent::set(name, "")),

            (KeyCode::Enter, FieldKind::LongText { .. }) => {
                let current = self.current_text(name);
                if let Some(value) = push_newline(kind, &current) {
                    self.apply(FieldEvent::set(name, value));
                }
            }
            (KeyCode::Enter, _) => self.state.cursor.next_field(),
            (KeyCode::Backspace, _) => {
                let current = self.current_text(name);
                if let Some(value) = pop_char(kind, &current) {
                    self.apply(FieldEvent::set(name, value));
                }
            }
            (KeyCode::Char(c), _) => {
                let current = self.current_text(name);
                if let Some(value) = push_char(kind, &current, c) {
                    self.apply(FieldEvent::set(name, value));
                }
            }
            (KeyCode::Esc, _) => self.state.cursor.focus_actions(),
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, key: KeyEvent) {
        let max_scroll = self.preview_max_scroll();
        let scroll = self.state.preview_scroll;
        self.state.preview_scroll = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state.close_preview();
                scroll
            }
            KeyCode::Down | KeyCode::Char('j') => scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => scroll.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char('d') => scroll.saturating_add(PREVIEW_PAGE),
            KeyCode::PageUp | KeyCode::Char('u') => scroll.saturating_sub(PREVIEW_PAGE),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => max_scroll,
            _ => scroll,
        }
        .min(max_scroll);
    }

    /// Furthest the preview can scroll at the current terminal size
    fn preview_max_scroll(&self) -> u16 {
        let Some((height, width)) = self.terminal_size else {
            return 0;
        };
        // borders and status bar
        let viewport = height.saturating_sub(3) as usize;
        let snapshot = &self.state.snapshot;
        let document = SurveyDocument::print(
            &snapshot.response,
            &snapshot.errors,
            content_width(width).saturating_sub(2),
        );
        let content = document.layout().height();
        u16::try_from(content.saturating_sub(viewport)).unwrap_or(u16::MAX)
    }

    async fn trigger(&mut self, action: FormAction) {
        match action {
            FormAction::Preview => self.state.open_preview(),
            FormAction::Export => self.start_export(),
            FormAction::Submit => self.submit().await,
        }
    }

    /// Discard the current answers and start over on the first field
    fn new_survey(&mut self) {
        self.store.reset();
        self.state.cursor = FormCursor::new();
        self.state.close_preview();
        self.status_message = Some("Nuevo formulario".to_string());
    }

    fn toggle_preview(&mut self) {
        match self.state.current_view {
            View::Form => self.state.open_preview(),
            View::Preview => self.state.close_preview(),
        }
    }

    fn current_text(&self, name: FieldName) -> String {
        self.store.response().text(name).unwrap_or_default().to_string()
    }

    fn apply(&mut self, event: FieldEvent) {
        let name = event.name();
        if let Err(e) = self.store.apply(event) {
            tracing::warn!("ignored change to {name}: {e}");
        }
    }

    /// Validate and hand the response to the submission sink
    async fn submit(&mut self) {
        match self.submission.submit(&mut self.store).await {
            Ok(SubmitOutcome::Rejected { .. }) => {
                if let Some(&first) = self.store.errors().keys().min_by_key(|name| name.index()) {
                    self.state.cursor.focus_field(first);
                }
                self.state.push_error(SUBMIT_BLOCKED);
            }
            Ok(SubmitOutcome::Accepted(receipt)) => {
                self.state.push_info(SUBMIT_ACCEPTED);
                self.status_message = Some(format!(
                    "Recibo {} ({} enviados en esta sesión)",
                    receipt.id,
                    self.submission.accepted()
                ));
            }
            Err(e) => {
                tracing::error!("submission failed: {e:#}");
                self.state
                    .push_error(format!("No se pudo enviar el formulario: {e}"));
            }
        }
        self.sync_view();
    }

    /// Mount the export container at the width the form is shown at
    fn mount_container(&self) -> Option<FormContainer> {
        let (_, width) = self.terminal_size?;
        FormContainer::mount(
            self.state.snapshot.clone(),
            content_width(width).saturating_sub(2),
            self.controls.clone(),
        )
    }

    /// Run an export in the background; the outcome arrives via `poll_export`
    pub fn start_export(&mut self) {
        if self.export.is_busy() {
            tracing::debug!("export already running");
            return;
        }
        self.sync_view();
        let container = self.mount_container();
        let pipeline = self.export.clone();
        let tx = self.export_tx.clone();

        self.status_message = Some(format!("Generando {EXPORT_FILE_NAME}..."));
        tokio::spawn(async move {
            let result = pipeline.export(container).await;
            // receiver lives as long as the app
            let _ = tx.send(result);
        });
    }

    /// Apply the outcome of finished exports
    pub fn poll_export(&mut self) {
        while let Ok(result) = self.export_rx.try_recv() {
            self.finish_export(result);
        }
    }

    fn finish_export(&mut self, result: ExportResult) {
        match result {
            Ok(ExportOutcome::Saved { path, pages }) => {
                self.status_message = Some(format!(
                    "PDF guardado en {} ({pages} página{})",
                    path.display(),
                    if pages == 1 { "" } else { "s" }
                ));
            }
            Ok(ExportOutcome::Busy) => {}
            Ok(ExportOutcome::NoContainer) => self.status_message = None,
            Err(e) => {
                tracing::error!("export failed: {e}");
                self.status_message = None;
                self.state.push_error(e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MockSubmissionSink, NotificationKind, Receipt};
    use crossterm::event::KeyModifiers;

    fn app_with(
        rasterizer: Option<Arc<dyn Rasterizer>>,
        assembler: Option<Arc<dyn DocumentAssembler>>,
    ) -> App {
        App::with_parts(
            FormStore::new(),
            SubmissionHandler::new(Box::new(LogSink)),
            ExportPipeline::new(rasterizer, assembler),
        )
    }

    fn test_app() -> App {
        let mut app = app_with(None, None);
        app.terminal_size = Some((40, 100));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_updates_snapshot() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::Encuestador);

            type_text(&mut app, "Ana").await;

            assert_eq!(app.state.snapshot.response.encuestador, "Ana");
            assert_eq!(app.state.snapshot.revision, 3);
        }

        #[tokio::test]
        async fn test_number_field_rejects_letters() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::AnosResidencia);

            type_text(&mut app, "1a2").await;

            assert_eq!(app.state.snapshot.response.anos_residencia, "12");
        }

        #[tokio::test]
        async fn test_backspace_removes_last_char() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::Lote);
            type_text(&mut app, "14").await;

            app.handle_key(key(KeyCode::Backspace)).await.unwrap();

            assert_eq!(app.state.snapshot.response.lote, "1");
        }

        #[tokio::test]
        async fn test_enter_adds_newline_in_long_text() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::ListadoIntegrantes);
            type_text(&mut app, "Ana").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            type_text(&mut app, "Luis").await;

            assert_eq!(app.state.snapshot.response.listado_integrantes, "Ana\nLuis");
            assert_eq!(app.state.cursor.field(), Some(FieldName::ListadoIntegrantes));
        }

        #[tokio::test]
        async fn test_choice_cycles_with_arrows() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::Gas);

            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(app.state.snapshot.response.gas, "red");
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            assert_eq!(app.state.snapshot.response.gas, "lena");
        }

        #[tokio::test]
        async fn test_space_toggles_highlighted_option() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::ProblemasBarrio);
            app.handle_key(key(KeyCode::Down)).await.unwrap();

            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            let second = FieldName::ProblemasBarrio.options()[1].value;
            assert_eq!(app.state.snapshot.response.problemas_barrio, vec![second]);

            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(app.state.snapshot.response.problemas_barrio.is_empty());
        }

        #[tokio::test]
        async fn test_checkbox_limit_evicts_oldest() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::UsosSum);
            let options = FieldName::UsosSum.options();

            for _ in 0..3 {
                app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
                app.handle_key(key(KeyCode::Down)).await.unwrap();
            }

            assert_eq!(
                app.state.snapshot.response.usos_sum,
                vec![options[1].value, options[2].value]
            );
        }
    }

    mod navigation {
        use super::*;

        #[tokio::test]
        async fn test_tab_moves_between_fields() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.cursor.field(), Some(FieldName::ALL[1]));
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert_eq!(app.state.cursor.field(), Some(FieldName::ALL[0]));
        }

        #[tokio::test]
        async fn test_down_leaves_checkbox_group_after_last_option() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::UsosSum);
            let count = FieldName::UsosSum.options().len();

            for _ in 0..count {
                app.handle_key(key(KeyCode::Down)).await.unwrap();
            }

            assert_ne!(app.state.cursor.field(), Some(FieldName::UsosSum));
        }

        #[tokio::test]
        async fn test_action_bar_selection() {
            let mut app = test_app();
            app.state.cursor.focus_actions();
            assert_eq!(app.state.cursor.selected_action, FormAction::Submit);

            app.handle_key(key(KeyCode::Left)).await.unwrap();
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.current_view, View::Preview);
        }

        #[tokio::test]
        async fn test_preview_toggle_and_scroll() {
            let mut app = test_app();
            app.handle_key(ctrl('p')).await.unwrap();
            assert_eq!(app.state.current_view, View::Preview);

            app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
            assert_eq!(app.state.preview_scroll, 1);
            app.handle_key(key(KeyCode::Char('G'))).await.unwrap();
            assert_eq!(app.state.preview_scroll, app.preview_max_scroll());
            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            assert_eq!(app.state.preview_scroll, app.preview_max_scroll());

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_view, View::Form);
        }

        #[tokio::test]
        async fn test_ctrl_n_starts_a_blank_survey() {
            let mut app = test_app();
            app.state.cursor.focus_field(FieldName::Encuestador);
            type_text(&mut app, "Ana").await;

            app.handle_key(ctrl('n')).await.unwrap();

            assert_eq!(app.state.cursor.field(), Some(FieldName::ALL[0]));
            assert_eq!(
                app.state.snapshot.response.text(FieldName::Encuestador),
                Some("")
            );
        }

        #[tokio::test]
        async fn test_ctrl_q_quits() {
            let mut app = test_app();
            app.handle_key(ctrl('q')).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_blank_submit_shows_errors_and_focuses_first() {
            let mut app = test_app();

            app.handle_key(ctrl('s')).await.unwrap();

            let notification = app.state.current_notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Error);
            assert_eq!(notification.message, SUBMIT_BLOCKED);
            assert_eq!(app.state.snapshot.errors.len(), 11);
            assert_eq!(app.state.cursor.field(), Some(FieldName::Encuestador));
        }

        #[tokio::test]
        async fn test_editing_clears_field_error() {
            let mut app = test_app();
            app.handle_key(ctrl('s')).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.current_notification().is_none());

            type_text(&mut app, "x").await;

            assert!(app.state.snapshot.error(FieldName::Encuestador).is_none());
            assert_eq!(app.state.snapshot.errors.len(), 10);
        }

        #[tokio::test]
        async fn test_keys_are_ignored_while_notification_shown() {
            let mut app = test_app();
            app.handle_key(ctrl('s')).await.unwrap();

            type_text(&mut app, "abc").await;

            assert!(app.state.snapshot.response.encuestador.is_empty());
        }

        #[tokio::test]
        async fn test_valid_submit_is_acknowledged() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_deliver()
                .times(1)
                .returning(|_| Ok(Receipt::new()));
            let store =
                FormStore::with_response(crate::state::validation::complete_response());
            let mut app = App::with_parts(
                store,
                SubmissionHandler::new(Box::new(sink)),
                ExportPipeline::new(None, None),
            );

            app.handle_key(ctrl('s')).await.unwrap();

            let notification = app.state.current_notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Info);
            assert_eq!(notification.message, SUBMIT_ACCEPTED);
            assert!(app.state.snapshot.errors.is_empty());
            let status = app.status_message.as_deref().unwrap();
            assert!(status.starts_with("Recibo "));
            assert!(status.ends_with("(1 enviados en esta sesión)"));
        }

        #[tokio::test]
        async fn test_sink_failure_is_reported() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_deliver()
                .returning(|_| Err(anyhow::anyhow!("sin conexión")));
            let store =
                FormStore::with_response(crate::state::validation::complete_response());
            let mut app = App::with_parts(
                store,
                SubmissionHandler::new(Box::new(sink)),
                ExportPipeline::new(None, None),
            );

            app.handle_key(ctrl('s')).await.unwrap();

            let notification = app.state.current_notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Error);
            assert!(notification.message.contains("sin conexión"));
        }
    }

    mod export {
        use super::*;

        async fn run_export(app: &mut App) {
            app.start_export();
            let result = app.export_rx.recv().await.unwrap();
            app.finish_export(result);
        }

        #[tokio::test]
        async fn test_missing_capability_notifies_user() {
            let mut app = test_app();

            run_export(&mut app).await;

            let notification = app.state.current_notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Error);
            assert!(notification.message.starts_with("La librería para generar PDF"));
            assert!(app.controls.is_visible());
            assert!(!app.is_exporting());
        }

        #[tokio::test]
        async fn test_unsized_terminal_has_no_container() {
            let mut app = app_with(None, None);

            run_export(&mut app).await;

            assert!(app.state.current_notification().is_none());
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_saved_export_reports_path() {
            let dir = tempfile::tempdir().unwrap();
            let mut app = app_with(
                Some(Arc::new(BufferRasterizer)),
                Some(Arc::new(PrintPdfAssembler::new(dir.path(), FORM_TITLE))),
            );
            app.terminal_size = Some((40, 100));

            run_export(&mut app).await;

            assert!(app.state.current_notification().is_none());
            let status = app.status_message.clone().unwrap();
            assert!(status.starts_with("PDF guardado en"));
            assert!(dir.path().join(crate::export::EXPORT_FILE_NAME).exists());
            assert!(app.controls.is_visible());
        }
    }
}
