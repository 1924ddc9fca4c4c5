//! Request and response records of the relay endpoints.
//!
//! Absent or `null` request fields fall back to their defaults. Fields of any
//! other JSON type are taken as their text: `5` becomes `"5"`, arrays and
//! objects become their JSON encoding. No field value is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TARGET_LANGUAGE: &str = "es";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEnhanceRequest")]
pub struct EnhanceRequest {
    pub text: String,
    /// Prior conversation, may be empty
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTranslateRequest")]
pub struct TranslateRequest {
    pub text: String,
    /// Previous translations
    pub context: String,
    pub target_language: String,
}

impl Default for TranslateRequest {
    fn default() -> Self {
        RawTranslateRequest::default().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSynthesizeRequest")]
pub struct SynthesizeRequest {
    pub text: String,
    pub language_code: String,
}

impl Default for SynthesizeRequest {
    fn default() -> Self {
        RawSynthesizeRequest::default().into()
    }
}

/// Text of a request field, `None` when absent or `null`
fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[derive(Default, Deserialize)]
struct RawEnhanceRequest {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    context: Option<Value>,
}

impl From<RawEnhanceRequest> for EnhanceRequest {
    fn from(raw: RawEnhanceRequest) -> Self {
        Self {
            text: field_text(raw.text).unwrap_or_default(),
            context: field_text(raw.context).unwrap_or_default(),
        }
    }
}

#[derive(Default, Deserialize)]
struct RawTranslateRequest {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    context: Option<Value>,
    #[serde(default)]
    target_language: Option<Value>,
}

impl From<RawTranslateRequest> for TranslateRequest {
    fn from(raw: RawTranslateRequest) -> Self {
        Self {
            text: field_text(raw.text).unwrap_or_default(),
            context: field_text(raw.context).unwrap_or_default(),
            target_language: field_text(raw.target_language)
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
        }
    }
}

#[derive(Default, Deserialize)]
struct RawSynthesizeRequest {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    language_code: Option<Value>,
}

impl From<RawSynthesizeRequest> for SynthesizeRequest {
    fn from(raw: RawSynthesizeRequest) -> Self {
        Self {
            text: field_text(raw.text).unwrap_or_default(),
            language_code: field_text(raw.language_code)
                .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub enhanced_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    /// Base64 encoded audio, MP3 unless configured otherwise
    pub audio: String,
    pub success: bool,
}
