//! Triage HTTP API.
//!
//! Exposes the triage engine over HTTP: `POST /triage` runs a request
//! end to end, `GET /health` reports liveness and completion-client
//! readiness. The router is composable — `triage_router()` returns a
//! `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::triage_router;
pub use types::AppContext;
