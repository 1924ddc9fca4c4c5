use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::stateless_llm_interface::StatelessLLMInterface;
use crate::error::ProviderError;

/// Google Gemini LLM over the `generateContent` REST endpoint
pub struct GeminiLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: String,
        temperature: Option<f32>,
    ) -> Self {
        info!("Initialized GeminiLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature,
        }
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });
        if let Some(temperature) = self.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }
        body
    }
}

#[async_trait]
impl StatelessLLMInterface for GeminiLLM {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, prompt_len = prompt.len(), "Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        let data: GeminiResponse = response.json().await?;
        let candidate = data
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("No candidates in Gemini response".to_string()))?;

        // A blocked or truncated candidate carries no text part at all
        let parts: Vec<String> = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if parts.is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "Gemini candidate has no text (finishReason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(parts.concat())
    }
}
