//! Error types for the Asha domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! The pipeline is designed to *absorb* most of these: a collaborator
//! failure is caught at the narrowest scope, logged, and mapped to an
//! empty/null result rather than propagated to the client.

use thiserror::Error;

/// The top-level error type for all Asha operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Speech errors ---
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by completion service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Completion service not configured: {0}")]
    NotConfigured(String),

    #[error("Completion returned no content")]
    EmptyCompletion,

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Knowledge store error: {0}")]
    Storage(String),

    #[error("Similarity query failed: {0}")]
    QueryFailed(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Retrieval not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Speech recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("Audio capture failed: {0}")]
    CaptureFailed(String),

    #[error("Speech service not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Client connection closed: {0}")]
    ConnectionClosed(String),

    #[error("Invalid client event: {0}")]
    InvalidEvent(String),
}
