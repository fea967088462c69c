//! Batch coordinator module
//!
//! - `core`: coordinator struct and the public submit/poll/cancel/results API
//! - `state`: per-job shared state guarded by a single mutex
//! - `execution`: worker pool and per-item dispatch
//! - `validation`: submission-time checks

mod core;
mod execution;
mod state;
mod validation;

pub use self::core::BatchCoordinator;
