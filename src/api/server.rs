//! Triage server lifecycle.
//!
//! Binds the configured address, mounts `triage_router()`, and serves
//! until a shutdown signal arrives.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::router::triage_router;
use crate::api::types::AppContext;

/// Bind `addr` and serve the triage API until ctrl-c.
pub async fn serve(ctx: AppContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_listener(listener, ctx).await
}

/// Serve on an already-bound listener.
///
/// Factored out from `serve` so tests can bind an ephemeral port and
/// read the address back before the server starts.
pub async fn serve_with_listener(listener: TcpListener, ctx: AppContext) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Triage server listening");

    let app = triage_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "Failed to listen for shutdown signal"),
    }
}
