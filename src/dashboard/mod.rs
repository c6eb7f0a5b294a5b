//! Dashboard: Axum web server for the trend board.
//!
//! Serves a JSON API, the static assets directory and a self-contained
//! HTML page that renders both. CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::get,
    Router,
};
use std::future::Future;
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use routes::AppState;

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Build the Axum router with all routes and middleware.
///
/// `assets_dir` is mounted under `/assets`; missing files there are plain 404s.
pub fn build_router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/board", get(routes::get_board))
        .route("/api/fixtures", get(routes::get_fixtures))
        .route("/api/bet", get(routes::get_bet))
        .route("/api/dates", get(routes::get_dates))
        .route("/health", get(routes::health))
        // Dashboard HTML
        .route("/", get(serve_dashboard))
        .nest_service("/assets", ServeDir::new(assets_dir.as_ref()))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(
    state: AppState,
    addr: &str,
    assets_dir: impl AsRef<Path>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state, assets_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard address {addr}"))?;
    info!(addr, "Dashboard server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")?;

    info!("Dashboard server stopped");
    Ok(())
}

/// Serve the embedded HTML dashboard.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
