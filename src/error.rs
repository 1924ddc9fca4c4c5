use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Failure raised by a text-generation or speech-synthesis provider.
///
/// The relay answers every variant the same way (HTTP 500 with the message),
/// the categories only feed the logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Map a non-success provider status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body);
        match status {
            401 | 403 => Self::Authentication(message),
            429 => Self::RateLimited(message),
            400 => Self::InvalidRequest(message),
            _ => Self::Api { status, message },
        }
    }

    /// Short label used as a structured logging field.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "auth",
            Self::RateLimited(_) => "quota",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Api { .. } => "api",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL may carry credentials
        let err = err.without_url();
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Google and OpenAI-style APIs both wrap failures as `{"error": {"message": ...}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// HTTP error body returned by the relay endpoints: `{"error": message}`,
/// plus `"success": false` on endpoints that report a success flag.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub success_flag: bool,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            success_flag: false,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
            success_flag: false,
        }
    }

    /// Add `"success": false` to the body
    pub fn with_success_flag(mut self) -> Self {
        self.success_flag = true;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.success_flag {
            json!({ "error": self.message, "success": false })
        } else {
            json!({ "error": self.message })
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::internal(err.to_string())
    }
}
