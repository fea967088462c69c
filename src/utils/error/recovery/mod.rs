//! Error recovery
//!
//! Retry with exponential backoff for per-item completion calls.

mod retry;
mod types;

pub use retry::{RetryOutcome, RetryPolicy};
pub use types::RetryConfig;
