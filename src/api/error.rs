//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::triage::TriageError;

/// Error response body. `raw` carries the unusable model output on 502
/// responses; `details` carries the underlying failure on 500s.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields: patientId, transcript")]
    MissingFields,
    #[error("Model did not return JSON")]
    ModelNotJson { raw: String },
    #[error("Model output invalid JSON matching schema")]
    ModelSchemaMismatch { raw: String },
    #[error("Triage generation failed: {0}")]
    Generation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Missing required fields: patientId, transcript".to_string(),
                    raw: None,
                    details: None,
                },
            ),
            ApiError::ModelNotJson { raw } => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: "Model did not return JSON".to_string(),
                    raw: Some(raw),
                    details: None,
                },
            ),
            ApiError::ModelSchemaMismatch { raw } => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: "Model output invalid JSON matching schema".to_string(),
                    raw: Some(raw),
                    details: None,
                },
            ),
            ApiError::Generation(details) => {
                tracing::error!(details = %details, "Triage generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Triage generation failed".to_string(),
                        raw: None,
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::InvalidRequest => ApiError::MissingFields,
            TriageError::NoJson { raw } => ApiError::ModelNotJson { raw },
            TriageError::InvalidReport { raw, .. } => ApiError::ModelSchemaMismatch { raw },
            upstream @ TriageError::Upstream(_) => ApiError::Generation(upstream.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Generation(rejection.body_text())
    }
}
