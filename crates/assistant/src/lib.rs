//! Asha Assistant — the response-generation pipeline.
//!
//! Turns one user query into one reply: classify the intent, assemble
//! token-bounded grounding context, render a prompt, run one or two
//! completion calls, and (for overview intents) build a paginated
//! digital book with per-page audio.
//!
//! Every stage is fault-contained. The pipeline never raises past its
//! own boundary: retrieval failure degrades to an empty context,
//! completion failure degrades to a context-derived fallback reply, and
//! per-page synthesis failure leaves that page silent.

pub mod book;
pub mod catalog;
pub mod context;
pub mod generate;
pub mod intent;
pub mod prompt;
pub mod token;

pub use book::{build_digital_book, split_overview_sections, SECTION_TITLES};
pub use catalog::{resolve_department, Department};
pub use context::{fallback_reply, ContextAssembler, ContextPlan};
pub use generate::{Generator, Reply};
pub use intent::{classify, Intent};
