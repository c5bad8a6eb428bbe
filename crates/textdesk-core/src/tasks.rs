//! Task record construction.
//!
//! Records are ephemeral: nothing here stores them. A caller that wants
//! persistence has to put a store behind [`TaskRecordBuilder::create_task`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{ValidationError, require_non_blank};
use crate::ids::{self, TaskId, TaskIdSequence};

/// A submitted task as returned to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique across every record built in this process.
    pub id: TaskId,
    /// Description exactly as submitted.
    pub text: String,
    /// Always `false` at creation.
    pub completed: bool,
    /// When the record was built. Serialized as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Builds [`TaskRecord`]s.
///
/// Every builder draws IDs from [`ids::process_sequence`], so records from
/// different builders never share an ID.
#[derive(Debug, Clone, Copy)]
pub struct TaskRecordBuilder {
    ids: &'static TaskIdSequence,
}

impl TaskRecordBuilder {
    /// Create a builder on the process-wide ID sequence.
    pub fn new() -> Self {
        Self {
            ids: ids::process_sequence(),
        }
    }

    /// Build a record for `description`, which must not be blank.
    pub fn create_task(&self, description: &str) -> Result<TaskRecord, ValidationError> {
        require_non_blank(description, ValidationError::TaskDescriptionRequired)?;

        let record = TaskRecord {
            id: self.ids.next_id(),
            text: description.to_owned(),
            completed: false,
            created_at: Utc::now(),
        };
        tracing::debug!(task_id = %record.id, "task record created");
        Ok(record)
    }
}

impl Default for TaskRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a record with a default [`TaskRecordBuilder`].
pub fn create_task(description: &str) -> Result<TaskRecord, ValidationError> {
    TaskRecordBuilder::new().create_task(description)
}
