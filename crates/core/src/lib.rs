//! # Asha Core
//!
//! Domain types, collaborator traits, and error definitions for the Asha
//! campus assistant. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (completion service, knowledge store,
//! speech services) is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub collaborators
//! - Clean dependency graph (all crates depend inward on core)

pub mod book;
pub mod completion;
pub mod error;
pub mod language;
pub mod message;
pub mod retrieval;
pub mod speech;

// Re-export key types at crate root for ergonomics
pub use book::{BookPage, DigitalBook};
pub use completion::{CompletionClient, CompletionRequest, SamplingParams};
pub use error::{CompletionError, Error, Result, RetrievalError, SessionError, SpeechError};
pub use language::{Language, language_catalog, lookup_language};
pub use message::{ChatMessage, Role};
pub use retrieval::{Embedder, KnowledgeStore};
pub use speech::{AudioCapture, SpeechRecognizer, SpeechSynthesizer};
