//! Prompt completion
//!
//! The batch coordinator treats the language model as an opaque capability:
//! `complete(system_message, user_message) -> text`. This module defines that
//! capability and an implementation speaking the OpenAI chat completions
//! format, which also covers most self-hosted and proxy endpoints.
//!
//! # Example
//! ```ignore
//! use cds_bias_lab::core::completion::{CompletionService, OpenAiCompatibleClient};
//!
//! let client = OpenAiCompatibleClient::new(&config.provider)?;
//! let answer = client.complete("You are a physician.", "Q: ...").await?;
//! ```

mod error;
mod openai;
mod service;
mod types;


pub use error::ServiceError;
pub use openai::OpenAiCompatibleClient;
pub use service::CompletionService;
pub use types::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, MessageRole};
