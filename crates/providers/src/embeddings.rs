//! OpenAI-compatible embedding client.
//!
//! Query embedding for retrieval. One text in, one vector out; batch
//! embedding is used only by ingestion.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use asha_core::error::RetrievalError;
use asha_core::retrieval::Embedder;

/// An `/embeddings` client.
pub struct EmbeddingClient {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl EmbeddingClient {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, RetrievalError> {
        if text.trim().is_empty() {
            return Err(RetrievalError::EmbeddingFailed("empty text".into()));
        }

        let url = format!("{}/embeddings", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "input": [text.trim()],
            "encoding_format": "float",
        });

        debug!(client = %self.name, model = %self.model, "Sending embedding request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::EmbeddingFailed(format!(
                "status {status}: {error_body}"
            )));
        }

        let api_resp: EmbeddingApiResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(format!("parse: {e}")))?;

        api_resp
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RetrievalError::EmbeddingFailed("no embedding in response".into()))
    }
}

// --- Wire types ---

#[derive(Deserialize)]
struct EmbeddingApiResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_rejected_before_network() {
        let client = EmbeddingClient::new("test", "http://127.0.0.1:1", "key", "m");
        let err = client.embed("   ").await.unwrap_err();
        assert!(matches!(err, RetrievalError::EmbeddingFailed(_)));
    }

    #[test]
    fn response_parsing() {
        let raw = r#"{"data":[{"embedding":[0.1,0.2,0.3]}],"model":"bge-base-en"}"#;
        let parsed: EmbeddingApiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data[0].embedding.len(), 3);
    }
}
