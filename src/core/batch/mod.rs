//! Batch submission
//!
//! A [`BatchCoordinator`] runs a [`BatchJob`] against a completion service on
//! a bounded pool of worker tasks, retrying failed dispatches and recording
//! exactly one [`WorkResult`] per dispatched [`WorkItem`]. Callers keep a
//! [`JobHandle`] to poll progress, cancel, and collect results.

mod coordinator;
mod types;


// Re-export all public types
pub use coordinator::BatchCoordinator;
pub use types::{
    BatchJob, JobHandle, JobId, JobStatus, ProgressSnapshot, WorkItem, WorkResult,
};
