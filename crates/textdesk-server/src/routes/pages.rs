//! HTML pages served from the static directory, and the 404 fallback.

use std::path::Path;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::server::AppState;

/// Home page file name.
pub const INDEX_PAGE: &str = "index.html";
/// About page file name.
pub const ABOUT_PAGE: &str = "about.html";
/// Not-found page file name.
pub const NOT_FOUND_PAGE: &str = "404.html";

async fn read_page(dir: &Path, name: &str) -> Option<String> {
    match tokio::fs::read_to_string(dir.join(name)).await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::debug!(page = name, error = %e, "page unavailable");
            None
        }
    }
}

async fn serve_page(state: &AppState, name: &str) -> Response {
    match read_page(&state.static_dir, name).await {
        Some(body) => Html(body).into_response(),
        None => not_found_response(state).await,
    }
}

async fn not_found_response(state: &AppState) -> Response {
    match read_page(&state.static_dir, NOT_FOUND_PAGE).await {
        Some(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Not found" })),
        )
            .into_response(),
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    serve_page(&state, INDEX_PAGE).await
}

/// `GET /about`
pub async fn about(State(state): State<AppState>) -> Response {
    serve_page(&state, ABOUT_PAGE).await
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_response(&state).await
}
