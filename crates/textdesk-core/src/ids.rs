//! Task identifiers.
//!
//! IDs are integers that look like millisecond timestamps, but they come
//! from a [`TaskIdSequence`] rather than the clock directly: each ID is
//! `max(now_ms, previous + 1)`, so two records created within the same
//! millisecond (or while the clock steps backwards) still get distinct,
//! strictly increasing values.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier of a [`TaskRecord`](crate::tasks::TaskRecord).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wrap an existing raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread-safe, strictly increasing source of [`TaskId`]s.
#[derive(Debug, Default)]
pub struct TaskIdSequence {
    last: AtomicU64,
}

impl TaskIdSequence {
    /// Create an empty sequence.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next ID, never equal to any previously returned by this sequence.
    pub fn next_id(&self) -> TaskId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return TaskId(candidate),
                Err(actual) => prev = actual,
            }
        }
    }

    /// The most recently issued raw value, or 0 if none.
    pub fn last_issued(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

static PROCESS_SEQUENCE: TaskIdSequence = TaskIdSequence::new();

/// The sequence shared by every task builder in this process.
pub fn process_sequence() -> &'static TaskIdSequence {
    &PROCESS_SEQUENCE
}
