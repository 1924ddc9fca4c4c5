use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use anyhow::Result;
use regex::Regex;

use crate::tts::{AudioEncoding, VoiceGender};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LLMConfig,
    #[serde(default)]
    pub tts_config: TTSConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    /// Deadline of a single provider call. 0 disables the deadline.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Trailing words of context kept for enhance prompts (0 keeps everything)
    #[serde(default = "default_transcription_context_words")]
    pub transcription_context_words: usize,
    /// Trailing words of context kept for translate prompts (0 keeps everything)
    #[serde(default = "default_translation_context_words")]
    pub translation_context_words: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_transcription_context_words() -> usize {
    1000
}

fn default_translation_context_words() -> usize {
    500
}

impl SystemConfig {
    /// `None` when `request_timeout_secs` is 0
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
            transcription_context_words: default_transcription_context_words(),
            translation_context_words: default_translation_context_words(),
        }
    }
}

/// Text generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Model variant used for translation. Falls back to `model`.
    #[serde(default)]
    pub translation_model: Option<String>,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_api_key")]
    pub llm_api_key: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

fn default_llm_model() -> String {
    "gemini-1.0-pro".to_string()
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_api_key() -> String {
    std::env::var("GEMINI_API_KEY").unwrap_or_default()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            model: default_llm_model(),
            translation_model: None,
            base_url: default_llm_base_url(),
            llm_api_key: default_llm_api_key(),
            temperature: None,
        }
    }
}

/// Speech synthesis provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTSConfig {
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,
    #[serde(default = "default_tts_api_key")]
    pub api_key: Option<String>,
    /// OAuth bearer token minted out-of-band from service-account credentials
    #[serde(default = "default_tts_access_token")]
    pub access_token: Option<String>,
    /// `NEUTRAL`, `FEMALE`, `MALE` or `SSML_VOICE_GENDER_UNSPECIFIED`
    #[serde(default)]
    pub voice_gender: VoiceGender,
    /// `MP3`, `LINEAR16` or `OGG_OPUS`
    #[serde(default)]
    pub audio_encoding: AudioEncoding,
}

fn default_tts_model() -> String {
    "google_tts".to_string()
}

fn default_tts_base_url() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn default_tts_api_key() -> Option<String> {
    std::env::var("GOOGLE_TTS_API_KEY").ok().filter(|s| !s.is_empty())
}

fn default_tts_access_token() -> Option<String> {
    std::env::var("GOOGLE_ACCESS_TOKEN").ok().filter(|s| !s.is_empty())
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            tts_model: default_tts_model(),
            base_url: default_tts_base_url(),
            api_key: default_tts_api_key(),
            access_token: default_tts_access_token(),
            voice_gender: VoiceGender::default(),
            audio_encoding: AudioEncoding::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse configuration text, picking JSON or YAML by the path's extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        let path_lower = path.to_lowercase();
        let config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }
}

/// Replace `${VAR_NAME}` with the variable's value. Unset variables are left untouched.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
