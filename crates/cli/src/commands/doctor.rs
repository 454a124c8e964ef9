//! `asha doctor` — Diagnose configuration and collaborator health.

use std::path::Path;

use asha_config::AppConfig;
use asha_core::retrieval::KnowledgeStore;
use asha_retrieval::PgVectorStore;

pub async fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Asha Doctor — system diagnostics");
    println!("================================\n");

    let mut issues = 0;

    let config = if config_path.exists() {
        match AppConfig::load(config_path) {
            Ok(config) => {
                println!("  [ok]   Config file valid ({})", config_path.display());
                config
            }
            Err(e) => {
                println!("  [fail] Config file invalid: {e}");
                return summary(1);
            }
        }
    } else {
        println!(
            "  [warn] No config file at {} — using defaults and environment",
            config_path.display()
        );
        issues += 1;
        AppConfig::load(config_path).unwrap_or_default()
    };

    for warning in config.validate() {
        println!("  [warn] {warning}");
        issues += 1;
    }

    if config.completion.api_key.is_some() {
        println!("  [ok]   Completion API key configured ({})", config.completion.model);
    }
    if config.embedding.api_key.is_some() {
        println!("  [ok]   Embedding API key configured ({})", config.embedding.model);
    }
    if config.speech.api_key.is_some() {
        println!("  [ok]   Speech API key configured ({})", config.speech.tts_model);
    }

    match &config.retrieval.database_url {
        Some(url) => match PgVectorStore::connect(url).await {
            Ok(store) => match store.document_count().await {
                Ok(0) => {
                    println!("  [warn] Knowledge store reachable but empty — run `asha ingest <path>`");
                    issues += 1;
                }
                Ok(n) => println!("  [ok]   Knowledge store reachable ({n} documents)"),
                Err(e) => {
                    println!("  [fail] Knowledge store query failed: {e}");
                    issues += 1;
                }
            },
            Err(e) => {
                println!("  [fail] Knowledge store unreachable: {e}");
                issues += 1;
            }
        },
        None => {
            println!("  [warn] No database configured — retrieval disabled");
            issues += 1;
        }
    }

    if let Some(path) = &config.tokenizer.file {
        if path.exists() {
            println!("  [ok]   Tokenizer file present ({})", path.display());
        }
    }

    summary(issues)
}

fn summary(issues: u32) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }
    Ok(())
}
