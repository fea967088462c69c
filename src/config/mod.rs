//! Configuration management
//!
//! Loading, environment overrides and validation of the runner configuration.

pub mod models;
pub mod validation;


pub use models::*;
pub use validation::Validate;

use crate::core::prompts::PromptTemplate;
use crate::utils::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion endpoint
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Coordinator settings
    #[serde(default)]
    pub batch: BatchConfig,
    /// Question bank columns and catalog
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Demographic variants
    #[serde(default)]
    pub demographics: DemographicsConfig,
    /// System message and user template
    #[serde(default)]
    pub prompts: PromptTemplate,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LabError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without touching the environment
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| LabError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.provider.api_key = key;
        }
        if let Some(base) = lookup("OPENAI_API_BASE") {
            self.provider.base_url = base;
        }
        if let Some(model) = lookup("MODEL_NAME") {
            self.provider.model = model;
        }
        if let Some(timeout) = lookup("CDS_BIAS_TIMEOUT") {
            self.provider.timeout_secs = timeout
                .parse()
                .map_err(|e| LabError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(concurrency) = lookup("CDS_BIAS_CONCURRENCY") {
            self.batch.concurrency = concurrency
                .parse()
                .map_err(|e| LabError::Config(format!("Invalid concurrency: {}", e)))?;
        }
        if let Some(attempts) = lookup("CDS_BIAS_MAX_ATTEMPTS") {
            self.batch.retry.max_attempts = attempts
                .parse()
                .map_err(|e| LabError::Config(format!("Invalid max attempts: {}", e)))?;
        }
        if let Some(level) = lookup("CDS_BIAS_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.provider
            .validate()
            .map_err(|e| LabError::Config(format!("Provider config error: {}", e)))?;
        self.batch
            .validate()
            .map_err(|e| LabError::Config(format!("Batch config error: {}", e)))?;
        self.dataset
            .validate()
            .map_err(|e| LabError::Config(format!("Dataset config error: {}", e)))?;
        self.demographics
            .validate()
            .map_err(|e| LabError::Config(format!("Demographics config error: {}", e)))?;
        self.prompts
            .validate()
            .map_err(|e| LabError::Config(format!("Prompt config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| LabError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}
