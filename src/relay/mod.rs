//! The relay operations: enhance, translate and synthesize.
//!
//! Each call is a single prompt/synthesis round trip against an injected
//! provider, bounded by a timeout. Nothing is retried and no state survives
//! the call.

pub mod prompts;
pub mod types;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::config::Config;
use crate::error::ProviderError;
use crate::tts::{AudioEncoding, SynthesisRequest, TTSInterface, VoiceGender};
use crate::utils::context_window;

pub use types::*;

/// Per-call limits and synthesis options applied by the relay
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// `None` lets provider calls run unbounded
    pub timeout: Option<Duration>,
    pub transcription_context_words: usize,
    pub translation_context_words: usize,
    pub voice_gender: VoiceGender,
    pub audio_encoding: AudioEncoding,
}

impl Default for RelaySettings {
    fn default() -> Self {
        (&Config::default()).into()
    }
}

impl From<&Config> for RelaySettings {
    fn from(config: &Config) -> Self {
        let system = &config.system_config;
        Self {
            timeout: system.request_timeout(),
            transcription_context_words: system.transcription_context_words,
            translation_context_words: system.translation_context_words,
            voice_gender: config.tts_config.voice_gender,
            audio_encoding: config.tts_config.audio_encoding,
        }
    }
}

#[derive(Clone)]
pub struct RelayService {
    enhance_llm: Arc<dyn StatelessLLMInterface>,
    translate_llm: Arc<dyn StatelessLLMInterface>,
    tts: Arc<dyn TTSInterface>,
    settings: RelaySettings,
}

impl RelayService {
    pub fn new(
        enhance_llm: Arc<dyn StatelessLLMInterface>,
        translate_llm: Arc<dyn StatelessLLMInterface>,
        tts: Arc<dyn TTSInterface>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            enhance_llm,
            translate_llm,
            tts,
            settings,
        }
    }

    /// Repair a transcription segment. Returns the provider output trimmed.
    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<String, ProviderError> {
        let context = context_window(&request.context, self.settings.transcription_context_words);
        let prompt = prompts::enhance_prompt(&request.text, &context);

        let span = info_span!("relay", op = "enhance", request_id = %Uuid::new_v4());
        self.generate(&self.enhance_llm, &prompt).instrument(span).await
    }

    /// Translate a segment into `target_language`. Returns the provider output trimmed.
    pub async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let context = context_window(&request.context, self.settings.translation_context_words);
        let prompt = prompts::translate_prompt(&request.text, &context, &request.target_language);

        let span = info_span!(
            "relay",
            op = "translate",
            request_id = %Uuid::new_v4(),
            target_language = %request.target_language
        );
        self.generate(&self.translate_llm, &prompt).instrument(span).await
    }

    /// Synthesize speech with the configured voice and encoding (neutral MP3 by
    /// default) and return it base64 encoded.
    pub async fn synthesize(&self, request: &SynthesizeRequest) -> Result<String, ProviderError> {
        let span = info_span!(
            "relay",
            op = "synthesize",
            request_id = %Uuid::new_v4(),
            language_code = %request.language_code
        );

        async {
            let synthesis = SynthesisRequest {
                voice_gender: self.settings.voice_gender,
                audio_encoding: self.settings.audio_encoding,
                ..SynthesisRequest::new(request.text.as_str(), request.language_code.as_str())
            };
            let audio = self.with_timeout(self.tts.synthesize(&synthesis)).await.map_err(|e| {
                error!(category = e.category(), "speech synthesis failed: {}", e);
                e
            })?;
            debug!(audio_bytes = audio.len(), "speech synthesized");
            Ok::<_, ProviderError>(STANDARD.encode(audio))
        }
        .instrument(span)
        .await
    }

    async fn generate(
        &self,
        llm: &Arc<dyn StatelessLLMInterface>,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        debug!(model = llm.model(), prompt_len = prompt.len(), "dispatching prompt");
        let text = self.with_timeout(llm.generate(prompt)).await.map_err(|e| {
            error!(model = llm.model(), category = e.category(), "text generation failed: {}", e);
            e
        })?;
        Ok(text.trim().to_string())
    }

    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        let Some(limit) = self.settings.timeout else {
            return fut.await;
        };
        tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ProviderError::Timeout(limit))?
    }
}
