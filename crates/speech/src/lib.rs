//! Speech services for Asha.
//!
//! HTTP clients for synthesis (text → WAV) and recognition (WAV → text),
//! plus kiosk microphone capture. All three are black boxes to the
//! pipeline; their failures are absorbed by the session layer.

pub mod capture;
pub mod stt;
pub mod tts;

pub use capture::CommandCapture;
pub use stt::HttpRecognizer;
pub use tts::{HttpSynthesizer, concat_wav_chunks};

use std::sync::Arc;

use asha_config::AppConfig;
use asha_core::{AudioCapture, SpeechRecognizer, SpeechSynthesizer};

/// Build the synthesizer from config, or `None` when no API key is set.
pub fn synthesizer_from_config(config: &AppConfig) -> Option<Arc<dyn SpeechSynthesizer>> {
    let api_key = config.speech.api_key.as_deref()?;
    Some(Arc::new(HttpSynthesizer::new(
        &config.speech.api_url,
        api_key,
        &config.speech.tts_model,
    )))
}

/// Build the recognizer from config, or `None` when no API key is set.
pub fn recognizer_from_config(config: &AppConfig) -> Option<Arc<dyn SpeechRecognizer>> {
    let api_key = config.speech.api_key.as_deref()?;
    Some(Arc::new(HttpRecognizer::new(&config.speech.api_url, api_key)))
}

/// Build the microphone capture from config, or `None` when no capture
/// command is configured.
pub fn capture_from_config(config: &AppConfig) -> Option<Arc<dyn AudioCapture>> {
    let command = config.speech.capture_command.as_deref()?;
    Some(Arc::new(CommandCapture::new(command)))
}
