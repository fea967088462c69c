//! OpenAI-compatible chat completion client

use super::error::ServiceError;
use super::service::CompletionService;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::ProviderConfig;
use crate::utils::error::{LabError, Result};
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use std::time::Duration;
use tracing::{debug, info};

/// Client for any endpoint speaking `/v1/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleClient {
    /// Build a client; the request timeout comes from `timeout_secs`
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(LabError::config(
                "No API key configured (set OPENAI_API_KEY or provider.api_key)",
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        info!(
            "Completion client ready: model={}, endpoint={}",
            config.model, endpoint
        );

        Ok(Self {
            http_client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, system_message: &str, user_message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_message),
                ChatMessage::user(user_message),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompatibleClient {
    async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> std::result::Result<String, ServiceError> {
        let body = self.build_request(system_message, user_message);

        debug!("Calling chat completions: {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let error_text = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(
                status.as_u16(),
                &error_text,
                retry_after,
            ));
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ServiceError::malformed(format!("Invalid response body: {}", e)))?;

        match parsed.first_content() {
            Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
            _ => Err(ServiceError::malformed(
                "Response contained no message content",
            )),
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}
