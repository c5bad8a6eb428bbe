//! # textdesk-server
//!
//! Axum HTTP server exposing textdesk's API and static pages.
//!
//! - `POST /api/process-text`, `POST /api/tasks`: the two API endpoints
//! - `GET /api-docs`: static endpoint descriptor
//! - `GET /`, `GET /about`, static assets, HTML 404 page
//! - `GET /health`, `GET /metrics`: status and Prometheus metrics
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod extract;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use errors::ApiError;
pub use server::{AppState, TextdeskServer};
pub use shutdown::ShutdownCoordinator;
