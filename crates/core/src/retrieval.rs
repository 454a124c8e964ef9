//! Retrieval collaborator traits.
//!
//! The pipeline grounds replies against a knowledge store queried by
//! vector similarity. The store's indexing and persistence are behind
//! `KnowledgeStore`; query embedding is behind `Embedder`. Both are
//! process-wide resources: implementations must be safe to share across
//! concurrent sessions.

use async_trait::async_trait;

use crate::error::RetrievalError;

/// Vector-similarity access to the knowledge store.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Return the text of the `k` chunks nearest to `embedding`,
    /// ordered nearest-first. An empty vec means "nothing relevant".
    async fn similar_chunks(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> std::result::Result<Vec<String>, RetrievalError>;

    /// Number of chunks currently stored.
    async fn document_count(&self) -> std::result::Result<u64, RetrievalError>;

    /// Insert one chunk with its embedding (used by ingestion).
    async fn insert_chunk(
        &self,
        content: &str,
        embedding: &[f32],
    ) -> std::result::Result<(), RetrievalError>;
}

/// Text-to-vector embedding.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// A human-readable name for this embedder.
    fn name(&self) -> &str;

    /// Embed one text. Implementations reject empty input.
    async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, RetrievalError>;
}
