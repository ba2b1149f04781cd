//! Shared state for the triage API.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::completion::GeminiClient;
use crate::config::Settings;
use crate::notify::DoctorNotifier;
use crate::triage::engine::TriageEngine;

/// Shared context for all API routes, injected via `State`.
#[derive(Clone)]
pub struct AppContext {
    pub engine: Arc<TriageEngine>,
    pub notifier: Arc<DoctorNotifier>,
    pub started_at: DateTime<Utc>,
}

impl AppContext {
    pub fn new(engine: Arc<TriageEngine>, notifier: Arc<DoctorNotifier>) -> Self {
        Self {
            engine,
            notifier,
            started_at: Utc::now(),
        }
    }

    /// Wire the production Gemini client and SMTP notifier from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let client = Arc::new(GeminiClient::from_settings(&settings.gemini));
        Self::new(
            Arc::new(TriageEngine::new(client)),
            Arc::new(DoctorNotifier::new(settings.email.clone())),
        )
    }

    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
