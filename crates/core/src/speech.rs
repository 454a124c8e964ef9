//! Speech collaborator traits.
//!
//! Synthesis and recognition are black boxes: text in, audio out and
//! vice versa. Audio capture is a *blocking* contract — implementations
//! may sit on a microphone for seconds — so callers must run it off the
//! cooperative scheduler (`tokio::task::spawn_blocking`).

use async_trait::async_trait;

use crate::error::SpeechError;

/// Text → audio. Returns WAV bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
    ) -> std::result::Result<Vec<u8>, SpeechError>;
}

/// Audio → text. An empty transcript is a valid result (no speech in the
/// audio), distinct from a recognition failure.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn transcribe(&self, wav_bytes: &[u8]) -> std::result::Result<String, SpeechError>;
}

/// Microphone capture. Blocking by contract.
pub trait AudioCapture: Send + Sync {
    /// Record one utterance and return it as WAV bytes.
    fn record(&self) -> std::result::Result<Vec<u8>, SpeechError>;
}
