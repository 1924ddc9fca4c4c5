use std::sync::Arc;
use tracing::info;
use anyhow::Result;
use reqwest::Client;

use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::stateless_llm::gemini_llm::GeminiLLM;
use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::config::LLMConfig;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// # Arguments
    /// * `config` - LLM provider settings
    /// * `model` - Model variant to bind, usually `config.model`
    /// * `client` - Shared HTTP client
    pub fn create_llm(
        config: &LLMConfig,
        model: &str,
        client: Client,
    ) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {} ({})", config.llm_provider, model);

        match config.llm_provider.as_str() {
            "gemini_llm" => Ok(Arc::new(GeminiLLM::new(
                client,
                model.to_string(),
                config.base_url.clone(),
                config.llm_api_key.clone(),
                config.temperature,
            ))),
            "openai_compatible_llm" | "openai_llm" | "groq_llm" | "mistral_llm"
            | "deepseek_llm" => Ok(Arc::new(OpenAICompatibleLLM::new(
                client,
                model.to_string(),
                config.base_url.clone(),
                config.llm_api_key.clone(),
                config.temperature,
            ))),
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", config.llm_provider)),
        }
    }

    /// Build the enhance and translate handles. They share one instance unless
    /// a separate translation model is configured.
    pub fn create_pair(
        config: &LLMConfig,
        client: Client,
    ) -> Result<(Arc<dyn StatelessLLMInterface>, Arc<dyn StatelessLLMInterface>)> {
        let primary = Self::create_llm(config, &config.model, client.clone())?;
        let translation = match config.translation_model.as_deref() {
            Some(model) if model != config.model => Self::create_llm(config, model, client)?,
            _ => primary.clone(),
        };
        Ok((primary, translation))
    }
}
