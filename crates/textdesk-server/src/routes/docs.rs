//! `GET /api-docs`: static description of the API endpoints.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// One documented endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointDoc {
    /// HTTP method.
    pub method: &'static str,
    /// Route path.
    pub path: &'static str,
    /// What the endpoint does.
    pub description: &'static str,
    /// Expected body fields and their types.
    pub body: BTreeMap<&'static str, &'static str>,
}

/// The full descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct ApiDocs {
    /// Documented endpoints.
    pub endpoints: Vec<EndpointDoc>,
}

impl ApiDocs {
    /// Descriptor for the API served by this crate.
    pub fn current() -> Self {
        Self {
            endpoints: vec![
                EndpointDoc {
                    method: "POST",
                    path: "/api/process-text",
                    description: "Process text and return statistics",
                    body: BTreeMap::from([("text", "string")]),
                },
                EndpointDoc {
                    method: "POST",
                    path: "/api/tasks",
                    description: "Add a new task",
                    body: BTreeMap::from([("task", "string")]),
                },
            ],
        }
    }
}

/// Serve the descriptor.
pub async fn api_docs() -> Json<ApiDocs> {
    Json(ApiDocs::current())
}
