//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::AppContext;

#[derive(Serialize)]
pub struct CompletionStatus {
    pub provider: String,
    pub configured: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub completion: CompletionStatus,
    pub started_at: String,
    pub uptime_secs: u64,
}

/// `GET /health` — liveness plus completion-client readiness.
///
/// `completion.configured` is `false` when no API key is set; the
/// service still answers but `/triage` will fail until one is provided.
pub async fn check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        completion: CompletionStatus {
            provider: ctx.engine.provider(),
            configured: ctx.engine.is_configured(),
        },
        started_at: ctx.started_at.to_rfc3339(),
        uptime_secs: ctx.uptime_secs(),
    })
}
