//! `POST /api/tasks`

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use textdesk_core::TaskRecord;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::ApiBody;
use crate::metrics::TASKS_CREATED_TOTAL;
use crate::server::AppState;

/// Confirmation message sent with every created task.
pub const TASK_ADDED_MESSAGE: &str = "Task added successfully";

/// Request body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Task description.
    #[serde(default)]
    pub task: Option<String>,
}

/// Response body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskResponse {
    /// Always `true`; failures use the error shape instead.
    pub success: bool,
    /// Always [`TASK_ADDED_MESSAGE`].
    pub message: &'static str,
    /// The record that was built. It is not stored anywhere.
    pub task: TaskRecord,
}

/// Build a task record from the submitted description.
pub async fn create_task(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<CreateTaskRequest>,
) -> Result<Json<CreateTaskResponse>, ApiError> {
    let description = body.task.unwrap_or_default();
    let task = state.tasks.create_task(&description)?;

    metrics::counter!(TASKS_CREATED_TOTAL).increment(1);
    info!(task_id = %task.id, "task added");

    Ok(Json(CreateTaskResponse {
        success: true,
        message: TASK_ADDED_MESSAGE,
        task,
    }))
}
