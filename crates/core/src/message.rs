//! Chat message domain types.
//!
//! These are the value objects that flow through the whole pipeline:
//! the client sends text → the session machine classifies and generates →
//! the reply is appended to the session history and pushed back out.
//!
//! Message ids are opaque uuid tokens used for client-side reconciliation
//! only; the position in the history list is the authoritative ordering.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant
    Assistant,
    /// System instructions (prompt templates; never shown to the client)
    System,
}

/// A single message in a session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque unique id
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub text: String,
}

impl ChatMessage {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: format!("user-{}", Uuid::new_v4().simple()),
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: format!("asha-{}", Uuid::new_v4().simple()),
            role: Role::Assistant,
            text: text.into(),
        }
    }

    /// Create a system message (used only when building completion requests).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::System,
            text: text.into(),
        }
    }

    /// Create a message with a fixed, well-known id (e.g. the greeting).
    pub fn with_id(id: impl Into<String>, role: Role, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            text: text.into(),
        }
    }
}
