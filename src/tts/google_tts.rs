use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::interface::{SynthesisRequest, TTSInterface};
use crate::error::ProviderError;

/// Google Cloud Text-to-Speech client (REST v1)
pub struct GoogleTTS {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

impl GoogleTTS {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        info!(
            "Initialized GoogleTTS: base_url={}, api_key={}, access_token={}",
            base_url,
            api_key.is_some(),
            access_token.is_some()
        );
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token,
        }
    }

    fn build_request_body(request: &SynthesisRequest) -> serde_json::Value {
        json!({
            "input": { "text": request.text },
            "voice": {
                "languageCode": request.language_code,
                "ssmlGender": request.voice_gender,
            },
            "audioConfig": { "audioEncoding": request.audio_encoding },
        })
    }
}

#[async_trait]
impl TTSInterface for GoogleTTS {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        let url = format!("{}/text:synthesize", self.base_url);
        debug!(
            language_code = %request.language_code,
            text_len = request.text.len(),
            "Google TTS synthesize"
        );

        let mut builder = self.client.post(&url).json(&Self::build_request_body(request));
        if let Some(key) = &self.api_key {
            builder = builder.header("x-goog-api-key", key);
        }
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        let data: SynthesizeResponse = response.json().await?;
        let content = data
            .audio_content
            .ok_or_else(|| ProviderError::MalformedResponse("Missing audioContent".to_string()))?;
        STANDARD
            .decode(content)
            .map_err(|e| ProviderError::MalformedResponse(format!("Invalid audioContent: {}", e)))
    }
}
