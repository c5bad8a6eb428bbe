//! `TextdeskServer`: Axum HTTP server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use textdesk_core::TaskRecordBuilder;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors;
use crate::health::{self, HealthResponse};
use crate::metrics;
use crate::routes;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Builds task records on the process-wide ID sequence.
    pub tasks: TaskRecordBuilder,
    /// Directory holding pages and assets.
    pub static_dir: Arc<PathBuf>,
    /// When the server started.
    pub start_time: Instant,
    /// Prometheus handle, if a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Fresh state for `config`, without metrics.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            tasks: TaskRecordBuilder::new(),
            static_dir: Arc::new(config.static_dir.clone()),
            start_time: Instant::now(),
            metrics: None,
        }
    }
}

/// The textdesk HTTP server.
pub struct TextdeskServer {
    config: ServerConfig,
    state: AppState,
    shutdown: Arc<ShutdownCoordinator>,
}

impl TextdeskServer {
    /// Create a new server.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Serve `/metrics` from `handle`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.state.metrics = Some(handle);
        self
    }

    /// Build the Axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        let assets = ServeDir::new(&self.config.static_dir)
            .call_fallback_on_method_not_allowed(true)
            .not_found_service(routes::pages::not_found.with_state(self.state.clone()));

        let router = Router::new()
            .route("/", get(routes::pages::index))
            .route("/about", get(routes::pages::about))
            .route("/api-docs", get(routes::docs::api_docs))
            .route("/api/process-text", post(routes::text::process_text))
            .route("/api/tasks", post(routes::tasks::create_task))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .method_not_allowed_fallback(routes::pages::not_found)
            .fallback_service(assets);

        with_middleware(router, self.config.max_body_bytes).with_state(self.state.clone())
    }

    /// Bind a listener on the configured address.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr()).await
    }

    /// Serve on `listener` until the shutdown token is cancelled.
    pub fn spawn(&self, listener: TcpListener) -> JoinHandle<()> {
        let router = self.router();
        let token = self.shutdown.token();
        tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "server stopped with error");
            }
        })
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Layers applied to every route: request tracing, panic recovery, body
/// limit, and request metrics (outermost first).
fn with_middleware(router: Router<AppState>, max_body_bytes: usize) -> Router<AppState> {
    router
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

/// GET /metrics
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => routes::pages::not_found(State(state)).await,
    }
}
