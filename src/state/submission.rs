//! Submission handling: validate, then block or hand the response to a sink

use super::forms::FormStore;
use super::survey::SurveyResponse;
use super::validation::validate;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Acknowledgment returned by a sink for an accepted response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub id: Uuid,
    pub received_at: DateTime<Local>,
}

impl Receipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Local::now(),
        }
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for accepted survey responses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver a validated response
    async fn deliver(&self, response: &SurveyResponse) -> Result<Receipt>;
}

/// Reports the response as a structured JSON dump in the log
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(&self, response: &SurveyResponse) -> Result<Receipt> {
        let payload = serde_json::to_string_pretty(response)?;
        let receipt = Receipt::new();
        tracing::info!(receipt = %receipt.id, "Form data submitted:\n{payload}");
        Ok(receipt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitted,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the error map was published to the store
    Rejected { error_count: usize },
    /// The sink accepted the response
    Accepted(Receipt),
}

/// Two-state submission machine; returns to `Idle` after every attempt
pub struct SubmissionHandler {
    state: SubmissionState,
    sink: Box<dyn SubmissionSink>,
    accepted: u64,
}

impl SubmissionHandler {
    pub fn new(sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            state: SubmissionState::Idle,
            sink,
            accepted: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Number of responses accepted this session
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Validate the store's response and, if valid, deliver it to the sink.
    ///
    /// A sink failure is returned as an error; the form stays editable either way.
    pub async fn submit(&mut self, store: &mut FormStore) -> Result<SubmitOutcome> {
        let errors = validate(store.response());
        if !errors.is_empty() {
            let error_count = errors.len();
            tracing::debug!("submission blocked by {error_count} field errors");
            store.replace_errors(errors);
            return Ok(SubmitOutcome::Rejected { error_count });
        }

        store.replace_errors(Default::default());
        self.state = SubmissionState::Submitted;
        tracing::debug!("{:?}: delivering survey to sink", self.state);
        let delivered = self.sink.deliver(store.response()).await;
        self.state = SubmissionState::Idle;

        let receipt = delivered?;
        self.accepted += 1;
        tracing::info!("survey accepted ({})", receipt.id);
        Ok(SubmitOutcome::Accepted(receipt))
    }
}
