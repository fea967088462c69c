//! Configuration data models
//!
//! This module defines all configuration structures used by the batch runner.

#![allow(missing_docs)]

pub mod batch;
pub mod dataset;
pub mod demographics;
pub mod logging;
pub mod provider;

// Re-export all configuration types
pub use batch::*;
pub use dataset::*;
pub use demographics::*;
pub use logging::*;
pub use provider::*;

/// Default completion endpoint base URL
pub fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

/// Default model name
pub fn default_model() -> String {
    "gpt-4".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Default number of concurrent dispatch workers
pub fn default_concurrency() -> usize {
    4
}
