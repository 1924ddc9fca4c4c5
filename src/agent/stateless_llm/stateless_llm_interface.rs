use async_trait::async_trait;

use crate::error::ProviderError;

/// Interface for a stateless language model
/// Stateless means the LLM keeps no memory between calls: one prompt in, one text out
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// Generate a completion for a single user prompt
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
