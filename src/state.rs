use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;

use crate::agent::StatelessLLMFactory;
use crate::config::Config;
use crate::relay::{RelayService, RelaySettings};
use crate::tts::TTSFactory;

/// Shared application state. Provider handles are built once and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: RelayService,
}

impl AppState {
    /// Build the provider clients named in `config`
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // The overall per-call deadline is enforced by the relay
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let (enhance_llm, translate_llm) =
            StatelessLLMFactory::create_pair(&config.llm_config, client.clone())?;
        let tts = TTSFactory::create_tts(&config.tts_config, client)?;

        let relay = RelayService::new(
            enhance_llm,
            translate_llm,
            tts,
            RelaySettings::from(&config),
        );
        Ok(Self::with_relay(config, relay))
    }

    /// Assemble state around an already-built relay
    pub fn with_relay(config: Config, relay: RelayService) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }
}
