//! Completion client trait — the abstraction over the language-model
//! completion service.
//!
//! A `CompletionClient` knows how to send an ordered message list plus
//! sampling parameters to a chat-style completion endpoint and return the
//! generated text. Rate limits and model hosting are the service's
//! problem; the pipeline only sees text or a `CompletionError`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::message::ChatMessage;

/// Fixed sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.8,
            max_tokens: 400,
        }
    }
}

/// One completion request: messages alternate system/user/assistant roles.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub params: SamplingParams,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            params: SamplingParams::default(),
        }
    }
}

/// The completion collaborator contract.
///
/// Implementations must return a **non-empty** string on success; an empty
/// completion is an error (`CompletionError::EmptyCompletion`) so callers
/// can treat it identically to a transport failure.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g. "groq", "openai").
    fn name(&self) -> &str;

    /// Send a request and get the generated text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, CompletionError>;

    /// Health check — can we reach the service?
    async fn health_check(&self) -> std::result::Result<bool, CompletionError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sampling_matches_pipeline_constants() {
        let p = SamplingParams::default();
        assert!((p.temperature - 0.3).abs() < f32::EPSILON);
        assert!((p.top_p - 0.8).abs() < f32::EPSILON);
        assert_eq!(p.max_tokens, 400);
    }
}
