//! Web surface: one page, one consult endpoint, one health check.
//!
//! Routes:
//! - `GET /`            : single-page recorder/uploader
//! - `POST /api/consult`: multipart `audio` / `image` → JSON result
//! - `GET /health`      : liveness probe

pub mod consult;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::pipeline::SessionOrchestrator;

pub use consult::{AudioPayload, ConsultResponse};

/// Largest accepted multipart body (recording + photo).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

const INDEX_HTML: &str = include_str!("page.html");

/// Build the router around a shared orchestrator.
pub fn router(orchestrator: Arc<SessionOrchestrator>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/consult", post(consult::consult_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(orchestrator)
}

/// Bind the configured host (name or IP literal) and port.
pub async fn bind(config: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    Ok(listener)
}

/// Bind to the configured address and serve until the process exits.
pub async fn start_server(
    config: &ServerConfig,
    orchestrator: Arc<SessionOrchestrator>,
) -> anyhow::Result<()> {
    let listener = bind(config).await?;
    let addr = listener.local_addr()?;

    log::info!("Starting AI Doctor application...");
    log::info!("Server will be available at: http://{addr}");

    axum::serve(listener, router(orchestrator)).await?;
    Ok(())
}

/// GET /: the single-page interface.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health: simple HTTP health check.
async fn health_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serve `app` on an ephemeral local port and return its base URL.
#[cfg(test)]
pub(crate) async fn spawn_test_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
