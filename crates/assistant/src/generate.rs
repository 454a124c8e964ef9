//! Generation orchestrator.
//!
//! One state machine per request, keyed by intent:
//!
//! - `NormalQuery`: a single grounded completion under a global token
//!   budget. If prompt + history + new text exceed the model limit, the
//!   prompt is rebuilt with the context trimmed to fill exactly the
//!   remaining budget.
//! - `CollegeOverview` / `DepartmentOverview`: two-phase. Phase 1
//!   generates the structured overview in English; phase 2 translates
//!   it when the session language is not English. Translation failure
//!   silently keeps the English text.
//! - `CourseMenu`: a fixed sentinel, no completion call at all.
//!
//! No error escapes this module. Every failure path resolves to the
//! context-derived fallback reply.

use std::sync::Arc;

use tracing::{info, warn};

use asha_core::completion::{CompletionClient, CompletionRequest};
use asha_core::language::Language;
use asha_core::message::ChatMessage;

use crate::context::fallback_reply;
use crate::intent::Intent;
use crate::prompt;
use crate::token;

/// Model context window, shared by all supported completion backends.
pub const MODEL_CONTEXT_LIMIT: usize = 128_000;
/// Fraction of the window reserved for input.
pub const MAX_INPUT_TOKEN_FRACTION: f64 = 0.7;

fn max_input_tokens() -> usize {
    (MODEL_CONTEXT_LIMIT as f64 * MAX_INPUT_TOKEN_FRACTION) as usize
}

/// What one generation turn resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain reply text, spoken and appended to the history.
    Text(String),
    /// Structured overview text, ready for digital-book construction.
    Overview(String),
    /// Render the fixed course/department menu; nothing was generated.
    CourseMenu,
}

/// Sequences completion calls for one session's turns.
pub struct Generator {
    client: Option<Arc<dyn CompletionClient>>,
}

impl Generator {
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    /// Resolve one turn. Total: always returns a reply, whatever the
    /// collaborators do.
    pub async fn generate(
        &self,
        intent: Intent,
        text: &str,
        context: &str,
        language: &Language,
        department: Option<&str>,
        history: &[ChatMessage],
    ) -> Reply {
        let context = context.trim();
        match intent {
            Intent::CourseMenu => Reply::CourseMenu,
            Intent::CollegeOverview | Intent::DepartmentOverview => {
                self.overview(intent, context, language, department).await
            }
            Intent::NormalQuery => self.normal(text, context, language, history).await,
        }
    }

    async fn overview(
        &self,
        intent: Intent,
        context: &str,
        language: &Language,
        department: Option<&str>,
    ) -> Reply {
        let Some(client) = &self.client else {
            warn!("No completion client configured, using fallback overview");
            return Reply::Text(fallback_reply(context));
        };

        let (mut system_prompt, user_turn) = match intent {
            Intent::DepartmentOverview => (
                prompt::department_overview_prompt(department.unwrap_or("engineering"), context),
                prompt::DEPARTMENT_USER_TURN,
            ),
            _ => (prompt::overview_prompt(context), prompt::OVERVIEW_USER_TURN),
        };

        let prompt_tokens = token::count(&system_prompt) + token::count(user_turn);
        if prompt_tokens > max_input_tokens() {
            system_prompt = token::trim(&system_prompt, max_input_tokens().saturating_sub(50));
        }

        let request = CompletionRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_turn),
        ]);
        let english = match client.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Overview generation failed, using fallback");
                return Reply::Text(fallback_reply(context));
            }
        };
        info!(intent = ?intent, approx_tokens = prompt_tokens, "Overview generated");

        Reply::Overview(self.english_or_translated(english, language).await)
    }

    /// Phase 2 with silent degrade: translation failure keeps the
    /// phase-1 English text exactly.
    async fn english_or_translated(&self, english: String, language: &Language) -> String {
        if language.is_english() {
            return english;
        }
        let Some(client) = &self.client else {
            return english;
        };
        let request = CompletionRequest::new(vec![
            ChatMessage::system(prompt::translation_prompt(language.name)),
            ChatMessage::user(english.clone()),
        ]);
        match client.complete(request).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, language = language.name, "Translation failed, keeping English");
                english
            }
        }
    }

    async fn normal(
        &self,
        text: &str,
        context: &str,
        language: &Language,
        history: &[ChatMessage],
    ) -> Reply {
        let Some(client) = &self.client else {
            warn!("No completion client configured, using fallback reply");
            return Reply::Text(fallback_reply(context));
        };

        let mut system_prompt = prompt::normal_prompt(language.name, context);
        let rest_tokens: usize =
            history.iter().map(|m| token::count(&m.text)).sum::<usize>() + token::count(text);
        let total_tokens = token::count(&system_prompt) + rest_tokens;
        if total_tokens > max_input_tokens() && !context.is_empty() {
            let prefix = prompt::normal_prompt_prefix(language.name);
            let budget = max_input_tokens().saturating_sub(token::count(&prefix) + rest_tokens);
            let trimmed = token::trim(context, budget);
            info!(
                approx_tokens = token::count(&trimmed),
                "Context truncated to fit model limit"
            );
            system_prompt = format!("{prefix}{trimmed}");
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(text));

        match client.complete(CompletionRequest::new(messages)).await {
            Ok(reply) => Reply::Text(reply),
            Err(e) => {
                warn!(error = %e, "Completion failed, using fallback reply");
                Reply::Text(fallback_reply(context))
            }
        }
    }
}
