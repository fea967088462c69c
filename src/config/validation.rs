//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::core::demographics::is_valid_placeholder_name;
use crate::core::prompts::{PromptTemplate, QUESTION_PLACEHOLDER};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url has invalid URL format: {}", e))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "base_url must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }

        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        if self.max_tokens == Some(0) {
            return Err("max_tokens must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 || self.concurrency > 64 {
            return Err(format!(
                "concurrency must be between 1 and 64, got {}",
                self.concurrency
            ));
        }

        let retry = &self.retry;
        if retry.max_attempts == 0 || retry.max_attempts > 10 {
            return Err(format!(
                "retry.max_attempts must be between 1 and 10, got {}",
                retry.max_attempts
            ));
        }
        if retry.backoff_multiplier < 1.0 {
            return Err("retry.backoff_multiplier must be at least 1.0".to_string());
        }
        if retry.base_delay_ms > retry.max_delay_ms {
            return Err("retry.base_delay_ms must not exceed retry.max_delay_ms".to_string());
        }

        Ok(())
    }
}

impl Validate for DatasetConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, column) in [
            ("id_column", &self.id_column),
            ("baseline_column", &self.baseline_column),
            ("customized_column", &self.customized_column),
        ] {
            if column.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }

        if self.id_column == self.baseline_column || self.id_column == self.customized_column {
            return Err("id_column must differ from the prompt columns".to_string());
        }

        Ok(())
    }
}

impl Validate for DemographicsConfig {
    fn validate(&self) -> Result<(), String> {
        let mut labels = HashSet::new();

        for variant in &self.variants {
            if variant.label.trim().is_empty() {
                return Err("variant label must not be empty".to_string());
            }
            if !labels.insert(variant.label.as_str()) {
                return Err(format!("duplicate variant label: {}", variant.label));
            }
            for key in variant.values.keys() {
                if !is_valid_placeholder_name(key) {
                    return Err(format!(
                        "variant '{}' has invalid placeholder name '{}'",
                        variant.label, key
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Validate for PromptTemplate {
    fn validate(&self) -> Result<(), String> {
        if self.system_message.trim().is_empty() {
            return Err("system_message must not be empty".to_string());
        }
        if !self.user_template.contains(QUESTION_PLACEHOLDER) {
            return Err(format!(
                "user_template must contain the {} placeholder",
                QUESTION_PLACEHOLDER
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("invalid log level '{}': {}", self.level, e))
    }
}
