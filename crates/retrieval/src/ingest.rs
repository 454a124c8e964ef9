//! Knowledge ingestion — paragraph-bounded chunking, embedding, insert.
//!
//! Chunks respect paragraph boundaries: paragraphs are packed into
//! chunks up to the character ceiling, and a paragraph is split mid-text
//! only when it alone exceeds the ceiling.

use tracing::info;

use asha_core::error::RetrievalError;
use asha_core::retrieval::{Embedder, KnowledgeStore};

/// Default chunk ceiling in characters (~300 tokens of English prose).
pub const DEFAULT_CHUNK_CHARS: usize = 1200;

/// Split a corpus into paragraph-bounded chunks of at most `max_chars`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        if paragraph.len() > max_chars {
            // Oversized paragraph: flush and hard-split on char boundaries.
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let mut rest = paragraph;
            while rest.len() > max_chars {
                let mut cut = max_chars;
                while !rest.is_char_boundary(cut) {
                    cut -= 1;
                }
                chunks.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            if !rest.is_empty() {
                current = rest.to_string();
            }
            continue;
        }

        if current.is_empty() {
            current = paragraph.to_string();
        } else if current.len() + 2 + paragraph.len() <= max_chars {
            current.push_str("\n\n");
            current.push_str(paragraph);
        } else {
            chunks.push(std::mem::take(&mut current));
            current = paragraph.to_string();
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Chunk, embed, and insert a corpus. Returns the number of chunks stored.
pub async fn ingest_text(
    store: &dyn KnowledgeStore,
    embedder: &dyn Embedder,
    text: &str,
    max_chars: usize,
) -> Result<usize, RetrievalError> {
    let chunks = chunk_text(text, max_chars);
    let total = chunks.len();

    for (i, chunk) in chunks.iter().enumerate() {
        let embedding = embedder.embed(chunk).await?;
        store.insert_chunk(chunk, &embedding).await?;
        if (i + 1) % 25 == 0 {
            info!(inserted = i + 1, total, "Ingestion progress");
        }
    }

    info!(chunks = total, "Ingestion complete");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("Just one paragraph.", 1200);
        assert_eq!(chunks, vec!["Just one paragraph.".to_string()]);
    }

    #[test]
    fn paragraphs_pack_until_ceiling() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        let chunks = chunk_text(text, 10);
        // "aaaa\n\nbbbb" is 10 chars, fits; "cccc" starts a new chunk.
        assert_eq!(chunks, vec!["aaaa\n\nbbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn paragraphs_are_not_split_when_they_fit() {
        let text = "first paragraph here\n\nsecond paragraph here";
        for chunk in chunk_text(text, 25) {
            assert!(
                chunk == "first paragraph here" || chunk == "second paragraph here",
                "unexpected chunk: {chunk:?}"
            );
        }
    }

    #[test]
    fn oversized_paragraph_is_hard_split() {
        let text = "x".repeat(2500);
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 1000));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_text("", 1200).is_empty());
        assert!(chunk_text("\n\n\n\n", 1200).is_empty());
    }

    struct ConstEmbedder;

    #[async_trait]
    impl asha_core::retrieval::Embedder for ConstEmbedder {
        fn name(&self) -> &str {
            "const"
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, asha_core::error::RetrievalError> {
            Ok(vec![1.0, 0.0])
        }
    }

    #[tokio::test]
    async fn ingest_stores_every_chunk() {
        let store = InMemoryStore::new();
        let n = ingest_text(&store, &ConstEmbedder, "a\n\nb\n\nc", 1)
            .await
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(store.document_count().await.unwrap(), 3);
    }
}
