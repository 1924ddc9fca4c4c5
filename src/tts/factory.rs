use std::sync::Arc;
use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};
use crate::config::TTSConfig;
use super::google_tts::GoogleTTS;
use super::interface::TTSInterface;

/// Factory for creating TTS engines/clients
pub struct TTSFactory;

impl TTSFactory {
    /// Create a TTS client based on configuration
    ///
    /// # Arguments
    /// * `tts_config` - TTS configuration
    /// * `client` - Shared HTTP client
    pub fn create_tts(tts_config: &TTSConfig, client: Client) -> Result<Arc<dyn TTSInterface>> {
        info!("Initializing TTS engine: {}", tts_config.tts_model);

        match tts_config.tts_model.as_str() {
            "google_tts" => {
                if tts_config.api_key.is_none() && tts_config.access_token.is_none() {
                    warn!("google_tts has neither api_key nor access_token; synthesis requests will be rejected upstream");
                }
                Ok(Arc::new(GoogleTTS::new(
                    client,
                    tts_config.base_url.clone(),
                    tts_config.api_key.clone(),
                    tts_config.access_token.clone(),
                )))
            }
            _ => Err(anyhow::anyhow!("Unsupported TTS model: {}", tts_config.tts_model)),
        }
    }
}
