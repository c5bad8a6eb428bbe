//! Validation errors raised by the core operations.

use thiserror::Error;

/// Required string input was absent or blank after trimming.
///
/// This is the only failure the core can produce. The HTTP layer maps it
/// to a 400 response; it is never retried internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `analyze` was given blank text.
    #[error("text is required")]
    TextRequired,
    /// `create_task` was given a blank description.
    #[error("task description is required")]
    TaskDescriptionRequired,
}

impl ValidationError {
    /// Message shown to API clients.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::TextRequired => "Text is required",
            Self::TaskDescriptionRequired => "Task description is required",
        }
    }

    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TextRequired => "text",
            Self::TaskDescriptionRequired => "task",
        }
    }
}

/// Fail with `err` when `value` is empty after trimming.
pub(crate) fn require_non_blank(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(err);
    }
    Ok(())
}
