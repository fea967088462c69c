//! Batch coordinator configuration

use super::*;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};

/// Dispatch settings for the batch coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of worker tasks dispatching concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-item retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            retry: RetryConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Set concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
