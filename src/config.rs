use std::env;
use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Pretriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port when `BIND_ADDR` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "pretriage=info".to_string()
}

/// Runtime settings, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub gemini: GeminiSettings,
    pub email: EmailSettings,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            bind_addr: bind_addr_from_env(),
            gemini: GeminiSettings::from_env(),
            email: EmailSettings::from_env(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
}

fn bind_addr_from_env() -> SocketAddr {
    match env::var("BIND_ADDR") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(addr = %raw, "Invalid BIND_ADDR, falling back to default");
            default_bind_addr()
        }),
        Err(_) => default_bind_addr(),
    }
}

/// Completion-service settings. Empty `model`/`endpoint` values mean
/// "use the client's default"; an empty `api_key` leaves the service
/// unconfigured (calls fail, the process still starts).
#[derive(Debug, Clone, Default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: env::var("GEMINI_MODEL").unwrap_or_default(),
            endpoint: env::var("GEMINI_ENDPOINT").unwrap_or_default(),
            timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(45),
        }
    }
}

/// Doctor-notification settings. Missing `doctor_email` or `smtp_host`
/// turns the notifier into a warn-and-skip no-op.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub doctor_email: Option<String>,
    pub from_email: String,
    pub from_name: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_tls: bool,
}

impl EmailSettings {
    pub fn from_env() -> Self {
        Self {
            doctor_email: env::var("DOCTOR_EMAIL").ok(),
            from_email: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@pretriage.local".to_string()),
            from_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| APP_NAME.to_string()),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: env::var("SMTP_USERNAME").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_tls: env::var("SMTP_TLS_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Both a recipient and a mail host are needed before anything sends.
    pub fn is_configured(&self) -> bool {
        self.doctor_email.is_some() && self.smtp_host.is_some()
    }
}
