//! # textdesk-core
//!
//! The request-independent logic behind textdesk's two API endpoints.
//!
//! - **Text analysis**: [`text::analyze`] derives counts, reading time and
//!   simple transforms from a piece of text
//! - **Task records**: [`tasks::create_task`] builds an ephemeral task record
//!   with a collision-free identifier
//! - **Errors**: [`ValidationError`] for blank required input
//! - **Logging**: [`logging::init_subscriber`] installs the `tracing` subscriber

#![deny(unsafe_code)]

pub mod errors;
pub mod ids;
pub mod logging;
pub mod tasks;
pub mod text;

pub use errors::ValidationError;
pub use ids::{TaskId, TaskIdSequence, process_sequence};
pub use tasks::{TaskRecord, TaskRecordBuilder, create_task};
pub use text::{TextStatistics, analyze};
