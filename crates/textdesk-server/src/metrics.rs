//! Prometheus metrics recorder, request-tracking middleware, and metric names.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the handle used to render the `/metrics` endpoint. Fails if a
/// recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("prometheus metrics recorder installed");
    Ok(handle)
}

// Metric name constants to avoid typos across modules.

/// HTTP requests total (counter, labels: method, path, status).
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// HTTP request duration seconds (histogram, labels: method, path).
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
/// Texts analyzed successfully (counter).
pub const TEXTS_PROCESSED_TOTAL: &str = "texts_processed_total";
/// Task records created (counter).
pub const TASKS_CREATED_TOTAL: &str = "tasks_created_total";
/// Requests rejected for blank input (counter, labels: field).
pub const VALIDATION_FAILURES_TOTAL: &str = "validation_failures_total";

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Middleware recording request count and latency per route template.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_PATH.to_owned(), |p| p.as_str().to_owned());
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(HTTP_REQUEST_DURATION_SECONDS, "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}
