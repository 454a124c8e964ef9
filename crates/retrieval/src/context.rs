//! Context retrieval — query string in, grounding text out.
//!
//! The `ContextRetriever` owns the process-wide embedder handle behind a
//! `OnceCell`: the first session to retrieve initializes it, concurrent
//! first callers await the same initialization, and later callers reuse
//! the shared instance. Only a getter is exposed.
//!
//! Every failure path — unconfigured embedder, embedding error, store
//! error, empty store — resolves to `""`. The pipeline treats an empty
//! context as "run in fallback mode", never as an error.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use asha_core::retrieval::{Embedder, KnowledgeStore};

type EmbedderFactory = Box<dyn Fn() -> Option<Arc<dyn Embedder>> + Send + Sync>;

/// Retrieves grounding context for a query string.
pub struct ContextRetriever {
    store: Option<Arc<dyn KnowledgeStore>>,
    embedder: OnceCell<Option<Arc<dyn Embedder>>>,
    embedder_factory: EmbedderFactory,
}

impl ContextRetriever {
    /// Build a retriever over a store and an embedder factory. The factory
    /// runs at most once, on first retrieval.
    pub fn new(
        store: Option<Arc<dyn KnowledgeStore>>,
        embedder_factory: impl Fn() -> Option<Arc<dyn Embedder>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            embedder: OnceCell::new(),
            embedder_factory: Box::new(embedder_factory),
        }
    }

    /// A retriever that always returns empty context (offline mode).
    pub fn disabled() -> Self {
        Self::new(None, || None)
    }

    /// The shared embedder, initialized exactly once.
    async fn embedder(&self) -> Option<&Arc<dyn Embedder>> {
        self.embedder
            .get_or_init(|| async { (self.embedder_factory)() })
            .await
            .as_ref()
    }

    /// Number of chunks in the store, 0 on any failure.
    pub async fn document_count(&self) -> u64 {
        match &self.store {
            Some(store) => store.document_count().await.unwrap_or(0),
            None => 0,
        }
    }

    /// Retrieve the `top_k` chunks nearest to `query`, joined with blank
    /// lines. Returns `""` on any failure or when nothing is stored.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> String {
        let query = query.trim();
        if query.is_empty() || top_k == 0 {
            return String::new();
        }

        let Some(store) = &self.store else {
            warn!("Retrieval: no knowledge store configured, returning empty context");
            return String::new();
        };

        let Some(embedder) = self.embedder().await else {
            warn!("Retrieval: no embedder configured, returning empty context");
            return String::new();
        };

        let embedding = match embedder.embed(query).await {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Retrieval: query embedding failed");
                return String::new();
            }
        };

        let chunks = match store.similar_chunks(&embedding, top_k).await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Retrieval: similarity search failed");
                return String::new();
            }
        };

        if chunks.is_empty() {
            warn!("Retrieval: context empty (no documents for query)");
            return String::new();
        }

        let combined = chunks.join("\n\n");
        debug!(chunks = chunks.len(), chars = combined.len(), "Retrieved context");
        combined
    }
}
