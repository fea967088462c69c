//! Error handling utilities
//!
//! Crate-wide error type plus the retry policy used when dispatching prompts.

mod helpers;
pub mod recovery;
mod types;

pub use recovery::{RetryConfig, RetryPolicy};
pub use types::{LabError, Result};
