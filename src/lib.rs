pub mod api; // HTTP surface: POST /triage, GET /health
pub mod completion; // Generative text-completion clients (Gemini)
pub mod config;
pub mod notify; // Doctor notification emails
pub mod triage; // Prompt → completion → validated report pipeline

use tracing_subscriber::EnvFilter;

pub async fn run() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Pretriage starting v{}", config::APP_VERSION);

    let settings = config::Settings::from_env();
    let ctx = api::AppContext::from_settings(&settings);

    if !ctx.engine.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; /triage will fail until a key is configured");
    }
    if !settings.email.is_configured() {
        tracing::warn!("DOCTOR_EMAIL or SMTP_HOST is not set; doctor notifications are disabled");
    }

    api::server::serve(ctx, settings.bind_addr)
        .await
        .expect("error while running Pretriage");
}
