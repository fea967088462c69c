//! Utility modules
//!
//! - **error**: Error types and retry with exponential backoff
//! - **logging**: Subscriber setup

pub mod error;
pub mod logging;
