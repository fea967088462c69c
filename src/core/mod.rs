//! Core functionality
//!
//! Question banks, demographic expansion, prompt rendering, the completion
//! client and the batch coordinator that ties them together.

pub mod batch;
pub mod completion;
pub mod dataset;
pub mod demographics;
pub mod export;
pub mod prompts;
