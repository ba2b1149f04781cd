//! Triage service router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Handlers use `State<AppContext>` (provided via `with_state`).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::AppContext;

/// Build the triage API router.
pub fn triage_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/triage", post(endpoints::triage::generate))
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB (transcripts are text)
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::completion::{
        CompletionClient, CompletionError, GeminiClient, MockCompletionClient,
    };
    use crate::config::{EmailSettings, GeminiSettings};
    use crate::notify::DoctorNotifier;
    use crate::triage::engine::TriageEngine;

    /// Completion client whose calls always fail with a connection error.
    struct UnreachableClient;

    #[async_trait]
    impl CompletionClient for UnreachableClient {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            Err(CompletionError::Connection("http://127.0.0.1:9".into()))
        }

        fn provider(&self) -> String {
            "unreachable".to_string()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    fn email_settings() -> EmailSettings {
        EmailSettings {
            doctor_email: None,
            from_email: "noreply@pretriage.local".into(),
            from_name: "Pretriage".into(),
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_tls: true,
        }
    }

    fn context_with_client(client: Arc<dyn CompletionClient>) -> AppContext {
        AppContext::new(
            Arc::new(TriageEngine::new(client)),
            Arc::new(DoctorNotifier::new(email_settings())),
        )
    }

    fn mock_context(response: &str) -> AppContext {
        context_with_client(Arc::new(MockCompletionClient::new(response)))
    }

    fn make_request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: axum::http::Response<axum::body::Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn full_report_json() -> &'static str {
        r#"{"patientId":"p1","age":34,"sex":"female","symptoms":[{"name":"fever","onset":"3 days ago","severity":"moderate"}],"urgency":"medium","redFlags":[],"possibleConditions":[{"name":"influenza","confidence":0.6}],"recommendedAction":"see GP within 24h","summaryForDoctor":"34yo female, 3 days of fever","followUps":["hydrate"],"disclaimers":["This is not medical advice"]}"#
    }

    #[tokio::test]
    async fn triage_returns_validated_report() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"fever for three days"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let expected: serde_json::Value = serde_json::from_str(full_report_json()).unwrap();
        // The served body is exactly the validated report, no extra fields
        assert_eq!(json, expected);
    }

    #[tokio::test]
    async fn triage_minimal_report_round_trips_exactly() {
        let stub = r#"{"urgency":"medium","recommendedAction":"see GP","summaryForDoctor":"3-day fever, sore throat","disclaimers":["This is not medical advice"]}"#;
        let app = triage_router(mock_context(stub));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"fever 3 days, sore throat"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Absent optional fields are omitted, not serialized as null
        let json = response_json(response).await;
        let expected: serde_json::Value = serde_json::from_str(stub).unwrap();
        assert_eq!(json, expected);
    }

    #[tokio::test]
    async fn triage_missing_patient_id_returns_400() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request("POST", "/triage", Some(r#"{"transcript":"cough"}"#));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Missing required fields: patientId, transcript");
    }

    #[tokio::test]
    async fn triage_blank_transcript_returns_400() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"   "}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn triage_malformed_body_returns_500() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request("POST", "/triage", Some("{not json"));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Triage generation failed");
        assert!(json["details"].is_string());
    }

    #[tokio::test]
    async fn triage_prose_response_returns_502_with_raw() {
        let app = triage_router(mock_context("Sorry, I cannot help with that."));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"cough"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Model did not return JSON");
        assert_eq!(json["raw"], "Sorry, I cannot help with that.");
    }

    #[tokio::test]
    async fn triage_recovers_object_embedded_in_prose() {
        let raw = r#"Sure! {"urgency":"low","recommendedAction":"rest","summaryForDoctor":"ok","disclaimers":["x"]} Thanks!"#;
        let app = triage_router(mock_context(raw));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"tired"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["urgency"], "low");
        assert_eq!(
            json["disclaimers"],
            serde_json::json!(["x", "This is not medical advice"])
        );
    }

    #[tokio::test]
    async fn triage_invalid_schema_returns_502() {
        let raw = r#"{"urgency":"critical","recommendedAction":"x","summaryForDoctor":"y","disclaimers":[]}"#;
        let app = triage_router(mock_context(raw));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"cough"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Model output invalid JSON matching schema");
        assert_eq!(json["raw"], raw);
    }

    #[tokio::test]
    async fn triage_upstream_failure_returns_500() {
        let app = triage_router(context_with_client(Arc::new(UnreachableClient)));

        let req = make_request(
            "POST",
            "/triage",
            Some(r#"{"patientId":"p1","transcript":"cough"}"#),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Triage generation failed");
        assert_eq!(
            json["details"],
            "Completion request failed: Completion service unreachable at http://127.0.0.1:9"
        );
    }

    #[tokio::test]
    async fn health_response_shape() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request("GET", "/health", None);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(!json["version"].as_str().unwrap().is_empty());
        assert_eq!(json["completion"]["provider"], "mock");
        assert_eq!(json["completion"]["configured"], true);
        assert!(json["started_at"].is_string());
        assert!(json["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn health_reports_unconfigured_gemini() {
        let client = Arc::new(GeminiClient::from_settings(&GeminiSettings {
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            timeout_secs: 45,
        }));
        let app = triage_router(context_with_client(client));

        let req = make_request("GET", "/health", None);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["completion"]["configured"], false);
        assert_eq!(json["completion"]["provider"], "gemini/gemini-2.0-flash");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request("GET", "/nonexistent", None);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_on_triage_returns_405() {
        let app = triage_router(mock_context(full_report_json()));

        let req = make_request("GET", "/triage", None);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
