//! Liveness sidecar: an always-200 HTTP responder for uptime probes.
//!
//! Runs on its own tokio task and shares nothing with message dispatch.

use axum::{Router, routing::any};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::HealthError;

/// Body returned for every probe.
pub const HEALTH_BODY: &str = "OK";

/// Router with a single responder on `/`.
pub fn health_routes() -> Router {
    Router::new().route("/", any(health))
}

async fn health() -> &'static str {
    HEALTH_BODY
}

/// Bind `0.0.0.0:{port}`.
pub async fn bind(port: u16) -> Result<TcpListener, HealthError> {
    TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| HealthError::Bind { port, source })
}

/// Serve probes on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener) -> Result<(), HealthError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Health server started");
    }
    axum::serve(listener, health_routes()).await?;
    Ok(())
}

/// Bind and serve on a background task. The handle resolves only if the
/// server fails to bind or stops.
pub fn spawn_health_server(port: u16) -> JoinHandle<Result<(), HealthError>> {
    tokio::spawn(async move { serve(bind(port).await?).await })
}
