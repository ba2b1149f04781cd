//! Triage endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::AppContext;
use crate::triage::report::{TriageReport, TriageRequest};

/// `POST /triage` — generate a structured triage report from a transcript.
///
/// The body is extracted tolerantly: a malformed body surfaces as a
/// generation failure (500), while a well-formed body missing
/// `patientId` or `transcript` is a validation error (400).
pub async fn generate(
    State(ctx): State<AppContext>,
    body: Result<Json<TriageRequest>, JsonRejection>,
) -> Result<Json<TriageReport>, ApiError> {
    let Json(request) = body?;

    let request_id = Uuid::new_v4();
    let report = ctx.engine.run(request_id, &request).await?;

    // Fire and forget; delivery failures are logged by the notifier
    let notifier = ctx.notifier.clone();
    let sent_report = report.clone();
    tokio::spawn(async move { notifier.notify(&sent_report).await });

    Ok(Json(report))
}
