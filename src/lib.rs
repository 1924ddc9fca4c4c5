//! HTTP relay that sends medical transcription text to a text generation
//! provider for repair and translation, and to a speech synthesis provider
//! for audio.

pub mod agent;
pub mod config;
pub mod error;
pub mod extract;
pub mod relay;
pub mod routes;
pub mod state;
pub mod tts;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, ProviderError};
pub use relay::RelayService;
pub use state::AppState;
