//! # cds-bias-lab
//!
//! Batch runner for probing demographic bias in LLM-assisted clinical
//! decision support.
//!
//! A run loads multiple choice questions from a CSV question bank, optionally
//! renders each vignette once per demographic variant, submits every prompt
//! as one batch to an OpenAI-compatible chat completion endpoint and exports
//! the answers to CSV for comparison.
//!
//! ```rust,no_run
//! use cds_bias_lab::{BatchCoordinator, BatchJob, Config, OpenAiCompatibleClient, WorkItem};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = OpenAiCompatibleClient::new(&config.provider)?;
//!     let coordinator = BatchCoordinator::new(Arc::new(client), config.batch.clone());
//!
//!     let items = vec![WorkItem::new("1", "A 54-year-old presents with chest pain...")];
//!     let handle = coordinator.submit(BatchJob::new(items, config.prompts.clone()))?;
//!     coordinator.wait(&handle).await?;
//!
//!     for result in coordinator.results(&handle)? {
//!         println!("{}: {:?}", result.id(), result.response());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

pub use config::Config;
pub use core::batch::{
    BatchCoordinator, BatchJob, JobHandle, JobId, JobStatus, ProgressSnapshot, WorkItem,
    WorkResult,
};
pub use core::completion::{CompletionService, OpenAiCompatibleClient, ServiceError};
pub use core::dataset::{QuestionBank, Selection, VignetteType};
pub use core::demographics::DemographicVariant;
pub use core::prompts::PromptTemplate;
pub use utils::error::{LabError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata recorded by the build script
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}
