//! HTTP speech recognition client.
//!
//! Posts WAV bytes to a `/speech-to-text` endpoint and returns the
//! transcript. An empty transcript is a valid result — the session layer
//! distinguishes "no speech detected" from a recognition failure.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use asha_core::error::SpeechError;
use asha_core::speech::SpeechRecognizer;

/// HTTP recognizer client.
pub struct HttpRecognizer {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpRecognizer {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn transcribe(&self, wav_bytes: &[u8]) -> Result<String, SpeechError> {
        if wav_bytes.is_empty() {
            return Err(SpeechError::RecognitionFailed("empty audio".into()));
        }

        let url = format!("{}/speech-to-text", self.base_url);

        debug!(bytes = wav_bytes.len(), "Transcribing audio");

        let response = self
            .client
            .post(&url)
            .header("api-subscription-key", &self.api_key)
            .header("Content-Type", "audio/wav")
            .body(wav_bytes.to_vec())
            .send()
            .await
            .map_err(|e| SpeechError::RecognitionFailed(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::RecognitionFailed(format!(
                "status {status}: {error_body}"
            )));
        }

        let api_resp: SttResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::RecognitionFailed(format!("parse: {e}")))?;

        Ok(api_resp.transcript.unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct SttResponse {
    transcript: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_audio_is_rejected() {
        let stt = HttpRecognizer::new("http://127.0.0.1:1", "key");
        let err = stt.transcribe(&[]).await.unwrap_err();
        assert!(matches!(err, SpeechError::RecognitionFailed(_)));
    }

    #[test]
    fn missing_transcript_parses_as_empty() {
        let parsed: SttResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.transcript.is_none());
    }
}
