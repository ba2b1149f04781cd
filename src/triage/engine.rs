use std::sync::Arc;

use uuid::Uuid;

use super::parser::parse_triage_response;
use super::prompt::build_triage_prompt;
use super::report::{TriageReport, TriageRequest};
use super::TriageError;
use crate::completion::CompletionClient;

/// Runs one triage request end to end:
/// validate request → build prompt → completion call → parse → disclaimer.
///
/// The completion client is injected so tests can substitute a double; the
/// engine holds no other state and every request is independent.
pub struct TriageEngine {
    client: Arc<dyn CompletionClient>,
}

impl TriageEngine {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Provider label of the underlying completion client.
    pub fn provider(&self) -> String {
        self.client.provider()
    }

    /// Whether the underlying completion client is ready to attempt calls.
    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub async fn run(
        &self,
        request_id: Uuid,
        request: &TriageRequest,
    ) -> Result<TriageReport, TriageError> {
        // Step 1: required request fields
        let Some((patient_id, transcript)) = request.required_fields() else {
            return Err(TriageError::InvalidRequest);
        };

        // Step 2: build the prompt
        let prompt =
            build_triage_prompt(patient_id, transcript, request.age, request.sex.as_deref());

        tracing::info!(
            request_id = %request_id,
            patient_id = %patient_id,
            transcript_chars = transcript.len(),
            "Requesting completion"
        );

        // Step 3: completion call; no retry, failures surface to the caller
        let raw = self.client.complete(&prompt).await?;

        // Step 4: parse + validate, retaining the raw text on failure
        let mut report = match parse_triage_response(&raw) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(
                    request_id = %request_id,
                    error = %err,
                    raw = %raw,
                    "Model output could not be validated"
                );
                return Err(err);
            }
        };

        // Step 5: every served report carries the canonical disclaimer
        report.ensure_disclaimer();

        tracing::info!(
            request_id = %request_id,
            urgency = report.urgency.as_str(),
            "Triage report ready"
        );
        Ok(report)
    }
}
