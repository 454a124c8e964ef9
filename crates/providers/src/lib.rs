//! Completion and embedding clients for Asha.
//!
//! Both clients speak the OpenAI-compatible wire protocol, which covers
//! Groq, OpenAI, Together, vLLM, and any proxy exposing
//! `/chat/completions` and `/embeddings`.

pub mod chat;
pub mod embeddings;

pub use chat::OpenAiCompatClient;
pub use embeddings::EmbeddingClient;

use std::sync::Arc;

use asha_config::AppConfig;
use asha_core::{CompletionClient, Embedder};

/// Build the completion client from config, or `None` when no API key is
/// configured (configuration absence degrades to fallback text, it is
/// never treated as a retryable error).
pub fn completion_from_config(config: &AppConfig) -> Option<Arc<dyn CompletionClient>> {
    let api_key = config.completion.api_key.as_deref()?;
    Some(Arc::new(OpenAiCompatClient::new(
        "completion",
        &config.completion.api_url,
        api_key,
        &config.completion.model,
    )))
}

/// Build the embedding client from config, or `None` when unconfigured.
pub fn embedder_from_config(config: &AppConfig) -> Option<Arc<dyn Embedder>> {
    let api_key = config.embedding.api_key.as_deref()?;
    Some(Arc::new(EmbeddingClient::new(
        "embeddings",
        &config.embedding.api_url,
        api_key,
        &config.embedding.model,
    )))
}
