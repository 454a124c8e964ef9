//! `asha ingest` — Chunk, embed, and store knowledge documents.

use std::path::Path;

use tracing::info;

use asha_config::AppConfig;
use asha_retrieval::ingest::{DEFAULT_CHUNK_CHARS, ingest_text};
use asha_retrieval::PgVectorStore;

pub async fn run(config_path: &Path, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    let database_url = config
        .retrieval
        .database_url
        .as_deref()
        .ok_or("No database configured — set retrieval.database_url or DATABASE_URL")?;
    let store = PgVectorStore::connect(database_url).await?;
    store.migrate().await?;

    let embedder = asha_providers::embedder_from_config(&config)
        .ok_or("No embedding API key configured — set ASHA_EMBEDDING_API_KEY")?;

    let files = collect_files(path)?;
    if files.is_empty() {
        return Err(format!("No .txt or .md files found under {}", path.display()).into());
    }

    let mut total = 0usize;
    for file in &files {
        let text = std::fs::read_to_string(file)?;
        let inserted = ingest_text(&store, embedder.as_ref(), &text, DEFAULT_CHUNK_CHARS).await?;
        info!(file = %file.display(), chunks = inserted, "Ingested");
        total += inserted;
    }

    println!("Ingested {total} chunks from {} file(s)", files.len());
    Ok(())
}

fn collect_files(path: &Path) -> Result<Vec<std::path::PathBuf>, std::io::Error> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?.path();
        let is_text = entry
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "txt" || e == "md");
        if entry.is_file() && is_text {
            files.push(entry);
        }
    }
    files.sort();
    Ok(files)
}
