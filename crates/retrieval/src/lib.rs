//! Knowledge retrieval for Asha.
//!
//! The retrieval collaborator: a vector-similarity knowledge store
//! (`PgVectorStore` in production, `InMemoryStore` for tests and offline
//! runs), the `ContextRetriever` that turns a query string into grounding
//! context, and paragraph-bounded ingestion.
//!
//! Retrieval never raises into the pipeline: every failure is logged at
//! its narrowest scope and surfaces as an empty context string.

pub mod context;
pub mod ingest;
pub mod store;

pub use context::ContextRetriever;
pub use ingest::{chunk_text, ingest_text};
pub use store::{InMemoryStore, PgVectorStore, cosine_similarity};
