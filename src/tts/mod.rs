pub mod interface;
pub mod google_tts;
pub mod factory;

pub use interface::{AudioEncoding, SynthesisRequest, TTSInterface, VoiceGender};
pub use google_tts::GoogleTTS;
pub use factory::TTSFactory;
