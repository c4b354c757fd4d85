//! Liveness endpoint for external process-health checks.

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Body of `GET /`
pub const LIVENESS_TEXT: &str = "Super Bot is running!";

/// Routes served by the liveness server
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

async fn home() -> &'static str {
    LIVENESS_TEXT
}

async fn health() -> &'static str {
    "OK"
}

/// Serve the liveness routes on `0.0.0.0:port` until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(port: u16, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Liveness endpoint listening on port {port}");

    axum::serve(listener, router())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Liveness endpoint stopped.");
    Ok(())
}
