//! Per-intent context assembly and the generation fallback text.
//!
//! Overview intents retrieve with a fixed canonical query and a tight
//! ceiling, because the overview prompt template is itself large.
//! Normal queries retrieve with the raw user text under the configured
//! budget. Course-menu queries skip retrieval entirely.

use std::sync::Arc;

use tracing::debug;

use asha_retrieval::ContextRetriever;

use crate::intent::Intent;
use crate::token;

/// Canonical retrieval query for the institution-wide overview.
pub const OVERVIEW_QUERY: &str = "college overview establishment year affiliation VTU AICTE NAAC NBA \
location campus programs CSE AI ML data science ECE MBA achievements rankings infrastructure placement";

pub const OVERVIEW_TOP_K: usize = 10;
pub const OVERVIEW_CONTEXT_MAX_TOKENS: usize = 1000;

pub const FALLBACK_PREFIX: &str = "Based on our college information: ";
pub const FALLBACK_APOLOGY: &str = "I'm sorry, I couldn't process your request right now.";
const FALLBACK_CONTEXT_MAX_CHARS: usize = 600;

/// What one intent wants from retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPlan {
    pub query: String,
    pub top_k: usize,
    pub max_tokens: usize,
}

impl ContextPlan {
    /// Select query and budget for an intent. `department` is the
    /// resolved catalog name for `DepartmentOverview`.
    pub fn for_intent(
        intent: Intent,
        text: &str,
        department: Option<&str>,
        normal_top_k: usize,
        normal_max_tokens: usize,
    ) -> Self {
        match intent {
            Intent::CollegeOverview => Self {
                query: OVERVIEW_QUERY.to_string(),
                top_k: OVERVIEW_TOP_K,
                max_tokens: OVERVIEW_CONTEXT_MAX_TOKENS,
            },
            Intent::DepartmentOverview => Self {
                query: format!(
                    "{} department overview faculty laboratories curriculum research placements",
                    department.unwrap_or("engineering")
                ),
                top_k: OVERVIEW_TOP_K,
                max_tokens: OVERVIEW_CONTEXT_MAX_TOKENS,
            },
            Intent::CourseMenu => Self {
                query: String::new(),
                top_k: 0,
                max_tokens: 0,
            },
            Intent::NormalQuery => Self {
                query: text.to_string(),
                top_k: normal_top_k,
                max_tokens: normal_max_tokens,
            },
        }
    }
}

/// Assembles grounding context for the generation orchestrator.
pub struct ContextAssembler {
    retriever: Arc<ContextRetriever>,
    normal_top_k: usize,
    normal_max_tokens: usize,
}

impl ContextAssembler {
    pub fn new(retriever: Arc<ContextRetriever>, normal_top_k: usize, normal_max_tokens: usize) -> Self {
        Self {
            retriever,
            normal_top_k,
            normal_max_tokens,
        }
    }

    /// Retrieve and token-trim context for one query. Returns `""` on
    /// any retrieval failure; never raises.
    pub async fn assemble(&self, intent: Intent, text: &str, department: Option<&str>) -> String {
        let plan = ContextPlan::for_intent(
            intent,
            text,
            department,
            self.normal_top_k,
            self.normal_max_tokens,
        );
        if plan.query.is_empty() || plan.top_k == 0 {
            return String::new();
        }
        let raw = self.retriever.retrieve(&plan.query, plan.top_k).await;
        if raw.is_empty() {
            return raw;
        }
        let bounded = token::trim(&raw, plan.max_tokens);
        debug!(intent = ?intent, chars = bounded.len(), "Assembled context");
        bounded
    }
}

/// Deterministic reply used when every generation path has failed:
/// a bounded prefix of the context, cut at the last whole word, or a
/// generic apology when there is no context at all.
pub fn fallback_reply(context: &str) -> String {
    let trimmed = context.trim();
    if trimmed.is_empty() {
        return FALLBACK_APOLOGY.to_string();
    }
    if trimmed.chars().count() <= FALLBACK_CONTEXT_MAX_CHARS {
        return format!("{FALLBACK_PREFIX}{trimmed}");
    }
    let head: String = trimmed.chars().take(FALLBACK_CONTEXT_MAX_CHARS - 3).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(i) => head[..i].trim_end(),
        None => head.as_str(),
    };
    format!("{FALLBACK_PREFIX}{cut}...")
}
