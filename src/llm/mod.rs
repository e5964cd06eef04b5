//! Hosted language model access.

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for chat-completion models.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for a system instruction and a user message.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
