//! Archive module - read-only web view of the daily chat logs.
//!
//! - `GET /` redirects to the newest day
//! - `GET /<YYYY-MM-DD>.log` renders one day with Prev/Next links
//!
//! The filesystem is the only thing shared with the log writer.

mod listing;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use listing::{list_logs, locate};
use render::{render_chatlog, render_page};

/// Shared archive state.
#[derive(Clone)]
pub struct ArchiveState {
    log_dir: Arc<PathBuf>,
}

/// Build the archive router serving files from `log_dir`.
pub fn router(log_dir: impl Into<PathBuf>) -> Router {
    let state = ArchiveState {
        log_dir: Arc::new(log_dir.into()),
    };

    Router::new()
        .route("/", get(latest))
        .route("/:name", get(show))
        .with_state(state)
}

/// Serve the archive until the listener fails.
pub async fn serve(listener: TcpListener, log_dir: PathBuf) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Archive listening on http://{}", addr);
    }
    axum::serve(listener, router(log_dir)).await
}

/// Redirect to the most recent day.
async fn latest(State(state): State<ArchiveState>) -> Response {
    let files = match list_logs(&state.log_dir).await {
        Ok(files) => files,
        Err(e) => return internal_error(e),
    };

    match files.last() {
        Some(newest) => Redirect::temporary(&format!("/{}", newest)).into_response(),
        None => not_found(),
    }
}

/// Render one day.
async fn show(State(state): State<ArchiveState>, Path(name): Path<String>) -> Response {
    let files = match list_logs(&state.log_dir).await {
        Ok(files) => files,
        Err(e) => return internal_error(e),
    };

    let Some(found) = locate(&files, &name) else {
        debug!("Archive miss: {}", name);
        return not_found();
    };

    let raw = match tokio::fs::read(state.log_dir.join(found.name)).await {
        Ok(raw) => raw,
        Err(e) => return internal_error(e),
    };

    let chatlog = render_chatlog(&String::from_utf8_lossy(&raw));
    Html(render_page(found.name, found.prev, found.next, &chatlog)).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

fn internal_error(e: std::io::Error) -> Response {
    warn!("Archive read failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
