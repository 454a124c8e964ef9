//! Knowledge store backends.
//!
//! `PgVectorStore` is the production backend: PostgreSQL + pgvector,
//! nearest-first via the `<=>` cosine-distance operator. `InMemoryStore`
//! keeps chunks in a `Vec` and ranks with a pure-Rust cosine similarity;
//! it backs tests and offline runs.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::RwLock;
use tracing::info;

use asha_core::error::RetrievalError;
use asha_core::retrieval::KnowledgeStore;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1]; 0.0 for mismatched lengths, empty, or
/// near-zero-norm input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Serialize an embedding into pgvector's text literal form.
fn embedding_literal(embedding: &[f32]) -> String {
    format!(
        "[{}]",
        embedding
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    )
}

/// PostgreSQL + pgvector knowledge store.
pub struct PgVectorStore {
    pool: PgPool,
}

impl PgVectorStore {
    /// Connect to PostgreSQL.
    pub async fn connect(database_url: &str) -> Result<Self, RetrievalError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| RetrievalError::Storage(format!("PostgreSQL connection failed: {e}")))?;

        info!("Connected to PostgreSQL knowledge store");
        Ok(Self { pool })
    }

    /// Create from an existing connection pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the schema migration.
    pub async fn migrate(&self) -> Result<(), RetrievalError> {
        let migration_sql = include_str!("../migrations/001_create_knowledge.sql");

        sqlx::raw_sql(migration_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| RetrievalError::Storage(format!("Migration failed: {e}")))?;

        info!("Knowledge store schema migration complete");
        Ok(())
    }
}

#[async_trait]
impl KnowledgeStore for PgVectorStore {
    async fn similar_chunks(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            "SELECT content FROM knowledge_chunks \
             WHERE embedding IS NOT NULL \
             ORDER BY embedding <=> $1::vector ASC \
             LIMIT $2",
        )
        .bind(embedding_literal(embedding))
        .bind(k as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RetrievalError::QueryFailed(format!("Similarity search failed: {e}")))?;

        Ok(rows.iter().map(|r| r.get::<String, _>("content")).collect())
    }

    async fn document_count(&self) -> Result<u64, RetrievalError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM knowledge_chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RetrievalError::QueryFailed(format!("Count failed: {e}")))?;
        Ok(row.get::<i64, _>("n") as u64)
    }

    async fn insert_chunk(&self, content: &str, embedding: &[f32]) -> Result<(), RetrievalError> {
        sqlx::query("INSERT INTO knowledge_chunks (content, embedding) VALUES ($1, $2::vector)")
            .bind(content)
            .bind(embedding_literal(embedding))
            .execute(&self.pool)
            .await
            .map_err(|e| RetrievalError::Storage(format!("Insert failed: {e}")))?;
        Ok(())
    }
}

/// In-memory knowledge store ranked by cosine similarity.
#[derive(Default)]
pub struct InMemoryStore {
    chunks: RwLock<Vec<(String, Vec<f32>)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryStore {
    async fn similar_chunks(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        let chunks = self.chunks.read().await;
        let mut scored: Vec<(f32, &String)> = chunks
            .iter()
            .map(|(content, emb)| (cosine_similarity(emb, embedding), content))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().take(k).map(|(_, c)| c.clone()).collect())
    }

    async fn document_count(&self) -> Result<u64, RetrievalError> {
        Ok(self.chunks.read().await.len() as u64)
    }

    async fn insert_chunk(&self, content: &str, embedding: &[f32]) -> Result<(), RetrievalError> {
        self.chunks
            .write()
            .await
            .push((content.to_string(), embedding.to_vec()));
        Ok(())
    }
}
