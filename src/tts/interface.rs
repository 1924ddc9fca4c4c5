use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Voice gender requested from the synthesis provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    Unspecified,
    Male,
    Female,
    #[default]
    Neutral,
}

/// Output container/codec of the synthesized audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
}

/// TTS request for synthesizing text to speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language_code: String,
    pub voice_gender: VoiceGender,
    pub audio_encoding: AudioEncoding,
}

impl SynthesisRequest {
    /// Neutral voice, MP3 output
    pub fn new(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: language_code.into(),
            voice_gender: VoiceGender::Neutral,
            audio_encoding: AudioEncoding::Mp3,
        }
    }
}

/// Speech synthesis provider
#[async_trait]
pub trait TTSInterface: Send + Sync {
    /// Synthesize speech and return the raw encoded audio bytes
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError>;
}
