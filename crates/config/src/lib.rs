//! Configuration loading and validation for Asha.
//!
//! Loads configuration from `asha.toml` (path overridable via
//! `ASHA_CONFIG`) with environment variable overrides for secrets.
//! Validation reports problems without panicking: a missing completion
//! key or unreachable database degrades the pipeline, it does not stop
//! the server.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure. Maps directly to `asha.toml`.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Completion service configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Knowledge retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Speech synthesis/recognition configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Token budgeting configuration
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Gateway (HTTP/WebSocket) configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("completion", &self.completion)
            .field("embedding", &self.embedding)
            .field("retrieval", &self.retrieval)
            .field("speech", &self.speech)
            .field("tokenizer", &self.tokenizer)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// OpenAI-compatible base URL.
    #[serde(default = "default_completion_url")]
    pub api_url: String,

    /// API key. Overridable via `ASHA_COMPLETION_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name.
    #[serde(default = "default_completion_model")]
    pub model: String,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_url(),
            api_key: None,
            model: default_completion_model(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// OpenAI-compatible base URL for `/embeddings`.
    #[serde(default = "default_completion_url")]
    pub api_url: String,

    /// API key. Overridable via `ASHA_EMBEDDING_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Embedding model name.
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_url(),
            api_key: None,
            model: default_embedding_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Postgres connection string for the pgvector knowledge store.
    /// Overridable via `DATABASE_URL`. When absent, retrieval returns
    /// empty context and the pipeline runs in fallback mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Top-k chunks for normal queries.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Token ceiling for normal-query context.
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            top_k: default_top_k(),
            max_context_tokens: default_max_context_tokens(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speech service base URL (synthesis + recognition).
    #[serde(default = "default_speech_url")]
    pub api_url: String,

    /// API key. Overridable via `ASHA_SPEECH_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Synthesis model name.
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Command that records one utterance and writes WAV to stdout
    /// (kiosk microphone capture). When absent, mic actions report
    /// capture failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_command: Option<String>,
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("tts_model", &self.tts_model)
            .field("capture_command", &self.capture_command)
            .finish()
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_url: default_speech_url(),
            api_key: None,
            tts_model: default_tts_model(),
            capture_command: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenizerConfig {
    /// Path to a HuggingFace `tokenizer.json`. When absent or unloadable,
    /// token counting returns 0 and trimming is a no-op (budgeting
    /// degrades to "unlimited").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS, in addition to same-origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_completion_url() -> String {
    "https://api.groq.com/openai/v1".into()
}
fn default_completion_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_embedding_model() -> String {
    "bge-base-en".into()
}
fn default_speech_url() -> String {
    "https://api.sarvam.ai".into()
}
fn default_tts_model() -> String {
    "bulbul:v3".into()
}
fn default_top_k() -> usize {
    5
}
fn default_max_context_tokens() -> usize {
    2000
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}

impl AppConfig {
    /// Default config file path (`asha.toml` in the working directory,
    /// overridable via `ASHA_CONFIG`).
    pub fn default_path() -> PathBuf {
        std::env::var_os("ASHA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("asha.toml"))
    }

    /// Load configuration from a file (missing file → defaults), then
    /// apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, String> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            toml::from_str(&raw).map_err(|e| format!("invalid {}: {e}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides for secrets and the DB URL.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ASHA_COMPLETION_API_KEY") {
            if !key.is_empty() {
                self.completion.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("ASHA_EMBEDDING_API_KEY") {
            if !key.is_empty() {
                self.embedding.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("ASHA_SPEECH_API_KEY") {
            if !key.is_empty() {
                self.speech.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.retrieval.database_url = Some(url);
            }
        }
    }

    /// Validate the configuration. Returns a list of human-readable
    /// warnings; an empty list means fully configured.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.completion.api_key.is_none() {
            warnings.push(
                "completion.api_key not set — replies will use the retrieval fallback".into(),
            );
        }
        if self.retrieval.database_url.is_none() {
            warnings.push("retrieval.database_url not set — context will be empty".into());
        }
        if self.speech.api_key.is_none() {
            warnings.push("speech.api_key not set — replies will be text-only".into());
        }
        if self.tokenizer.file.is_none() {
            warnings.push("tokenizer.file not set — token budgeting disabled".into());
        } else if let Some(f) = &self.tokenizer.file {
            if !f.exists() {
                warnings.push(format!("tokenizer file {} does not exist", f.display()));
            }
        }
        if self.retrieval.top_k == 0 {
            warnings.push("retrieval.top_k is 0 — no chunks will be retrieved".into());
        }
        warnings
    }
}
