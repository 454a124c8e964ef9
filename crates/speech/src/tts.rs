//! HTTP speech synthesis client.
//!
//! Calls a bulbul-style `/text-to-speech` endpoint that returns the
//! synthesized utterance as one or more base64 WAV chunks. Chunks are
//! concatenated into a single well-formed WAV: the first chunk's header
//! is kept, subsequent chunks contribute only their sample data, and the
//! RIFF and `data` sizes are patched to cover the combined payload.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use asha_core::error::SpeechError;
use asha_core::speech::SpeechSynthesizer;

/// HTTP synthesizer client.
pub struct HttpSynthesizer {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl HttpSynthesizer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<u8>, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed("empty text".into()));
        }

        let url = format!("{}/text-to-speech", self.base_url);
        let body = serde_json::json!({
            "text": text,
            "model": self.model,
            "target_language_code": language_code,
        });

        debug!(chars = text.len(), language = language_code, "Synthesizing speech");

        let response = self
            .client
            .post(&url)
            .header("api-subscription-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "status {status}: {error_body}"
            )));
        }

        let api_resp: TtsResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("parse: {e}")))?;

        if api_resp.audios.is_empty() {
            return Err(SpeechError::SynthesisFailed("no audio in response".into()));
        }

        let engine = base64::engine::general_purpose::STANDARD;
        let mut chunks = Vec::with_capacity(api_resp.audios.len());
        for audio in &api_resp.audios {
            let bytes = engine
                .decode(audio)
                .map_err(|e| SpeechError::SynthesisFailed(format!("base64: {e}")))?;
            chunks.push(bytes);
        }

        Ok(concat_wav_chunks(chunks))
    }
}

#[derive(Deserialize)]
struct TtsResponse {
    audios: Vec<String>,
}

/// Locate the `data` sub-chunk marker in a WAV byte stream.
fn find_data_marker(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|w| w == b"data")
}

/// Patch a little-endian u32 at `offset`.
fn patch_u32(bytes: &mut [u8], offset: usize, value: u32) {
    if offset + 4 <= bytes.len() {
        bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

/// Concatenate WAV chunks into one well-formed WAV.
///
/// Keeps the first chunk verbatim; for every later chunk, appends only
/// the bytes after its `data` marker + size field. When more than one
/// chunk was combined, the RIFF size (offset 4) and the `data` size are
/// re-patched to cover the combined payload.
pub fn concat_wav_chunks(chunks: Vec<Vec<u8>>) -> Vec<u8> {
    let n = chunks.len();
    let mut iter = chunks.into_iter();
    let Some(mut combined) = iter.next() else {
        return Vec::new();
    };

    for chunk in iter {
        if let Some(pos) = find_data_marker(&chunk) {
            // Skip "data" (4 bytes) + size field (4 bytes). A chunk
            // truncated inside the size field contributes no samples.
            if let Some(samples) = chunk.get(pos + 8..) {
                combined.extend_from_slice(samples);
            }
        }
    }

    if n > 1 {
        let total = combined.len();
        patch_u32(&mut combined, 4, total.saturating_sub(8) as u32);
        if let Some(pos) = find_data_marker(&combined) {
            patch_u32(&mut combined, pos + 4, total.saturating_sub(pos + 8) as u32);
        }
    }

    combined
}
