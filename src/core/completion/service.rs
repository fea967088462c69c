//! Completion capability used by the batch coordinator

use super::error::ServiceError;
use async_trait::async_trait;

/// Something that turns a system message and a user message into text
#[async_trait]
pub trait CompletionService: Send + Sync + 'static {
    /// Complete one prompt
    async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<String, ServiceError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "completion-service"
    }
}

