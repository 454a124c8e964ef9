//! Token budget utility.
//!
//! One fixed tokenizer for the whole process, loaded lazily from the
//! configured tokenizer file behind an `OnceLock`. Budgeting must never
//! crash a turn: when the tokenizer is missing or fails, `count`
//! degrades to 0 ("unlimited") and `trim` passes text through
//! unchanged.

use std::path::Path;
use std::sync::OnceLock;

use tokenizers::Tokenizer;
use tracing::{info, warn};

static TOKENIZER: OnceLock<Option<Tokenizer>> = OnceLock::new();

/// Load the process-wide tokenizer from `path`. The first call wins;
/// later calls are no-ops. Returns whether a tokenizer is active.
pub fn install_tokenizer(path: &Path) -> bool {
    TOKENIZER
        .get_or_init(|| match Tokenizer::from_file(path) {
            Ok(t) => {
                info!(path = %path.display(), "Tokenizer loaded");
                Some(t)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Tokenizer unavailable, token budgets disabled");
                None
            }
        })
        .is_some()
}

fn tokenizer() -> Option<&'static Tokenizer> {
    TOKENIZER.get().and_then(|t| t.as_ref())
}

/// Token count of `text`; 0 when the tokenizer is absent or fails.
pub fn count(text: &str) -> usize {
    match tokenizer() {
        Some(tok) => count_with(tok, text),
        None => 0,
    }
}

/// Trim `text` to at most `max_tokens` tokens. Returns the input
/// unchanged when it is already within budget, when `max_tokens` is 0,
/// or when the tokenizer is absent. Hard truncation, not
/// sentence-aware.
pub fn trim(text: &str, max_tokens: usize) -> String {
    match tokenizer() {
        Some(tok) => trim_with(tok, text, max_tokens),
        None => text.to_string(),
    }
}

fn count_with(tok: &Tokenizer, text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    match tok.encode(text, false) {
        Ok(encoding) => encoding.get_ids().len(),
        Err(e) => {
            warn!(error = %e, "Token count failed");
            0
        }
    }
}

fn trim_with(tok: &Tokenizer, text: &str, max_tokens: usize) -> String {
    if max_tokens == 0 || text.is_empty() {
        return text.to_string();
    }
    let encoding = match tok.encode(text, false) {
        Ok(e) => e,
        Err(e) => {
            warn!(error = %e, "Token trim failed, keeping text unchanged");
            return text.to_string();
        }
    };
    let ids = encoding.get_ids();
    if ids.len() <= max_tokens {
        return text.to_string();
    }
    match tok.decode(&ids[..max_tokens], true) {
        Ok(trimmed) => trimmed,
        Err(e) => {
            warn!(error = %e, "Token decode failed, keeping text unchanged");
            text.to_string()
        }
    }
}
