//! Completion provider configuration

use super::*;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL, `/v1/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key (usually supplied through `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: String,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature, provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Completion token cap, provider default when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: None,
            max_tokens: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Whether an API key has been configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Keeps the key out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_api_key() { "[REDACTED]" } else { "" })
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
