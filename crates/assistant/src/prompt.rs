//! System prompt templates.
//!
//! All generation happens through three fixed templates: the structured
//! overview (six numbered sections, strict formatting rules), the
//! grounded normal-query prompt, and the structure-preserving
//! translation instruction. The overview template is deliberately
//! rigid so the digital book builder can split the reply on section
//! numbers.

/// Fixed user turn sent with the overview system prompt.
pub const OVERVIEW_USER_TURN: &str = "Provide the college overview in the required structure.";

/// Fixed user turn for the department-scoped variant.
pub const DEPARTMENT_USER_TURN: &str =
    "Provide the department overview in the required structure.";

const OVERVIEW_RULES: &str = "You MUST respond using EXACTLY six numbered sections in this order: \
1) About the Institution 2) Academic Programs 3) Quality & Infrastructure \
4) Achievements & Recognition 5) Placement & Career Support 6) Closing Assurance. \
Rules: Use exactly the numbering format shown above. Do not change the order. Do not skip numbers. \
Do not merge sections. Each section must contain 1-2 short sentences. Maximum 12 sentences total. \
Plain text only. No markdown. No bullets. No emojis. No extra introduction. No extra closing lines. \
Parent-focused tone. Use only verified college information from the context. \
If information is missing, explicitly state 'Information not available.'";

/// Structured college-overview prompt. English only; translation is a
/// separate phase.
pub fn overview_prompt(context: &str) -> String {
    let prefix = format!("You are Asha, a professional campus assistant. {OVERVIEW_RULES}");
    with_context(prefix, context)
}

/// Overview prompt scoped to one department.
pub fn department_overview_prompt(department: &str, context: &str) -> String {
    let prefix = format!(
        "You are Asha, a professional campus assistant. \
         Describe the {department} department specifically. {OVERVIEW_RULES}"
    );
    with_context(prefix, context)
}

/// Grounding prefix for normal queries, without the context block. The
/// orchestrator appends a token-trimmed context to exactly this prefix
/// when rebuilding an over-budget prompt.
pub fn normal_prompt_prefix(language: &str) -> String {
    format!(
        "You are Asha, a friendly campus assistant. \
         Use ONLY the following college information when it is relevant to the user's question. \
         Do not invent or assume college-specific facts; only use what is in the College information below. \
         If the answer is not in the context, say you don't have that information. \
         Reply only in {language}. Be concise and helpful.\n\nCollege information:\n"
    )
}

/// Prompt for an open-ended query in the target language.
pub fn normal_prompt(language: &str, context: &str) -> String {
    let ctx = context.trim();
    if ctx.is_empty() {
        return format!(
            "You are Asha, a friendly campus assistant. \
             For questions about the college or campus, say you don't have that information if you're unsure. \
             Reply only in {language}. Be concise and helpful."
        );
    }
    format!("{}{ctx}", normal_prompt_prefix(language))
}

/// Phase-2 translation instruction.
pub fn translation_prompt(target_language: &str) -> String {
    format!(
        "Translate the following text into {target_language}. \
         Preserve structure, sentence count, and meaning exactly. \
         Do not expand or shorten. Output only the translation."
    )
}

fn with_context(prefix: String, context: &str) -> String {
    let ctx = context.trim();
    if ctx.is_empty() {
        prefix
    } else {
        format!("{prefix}\n\nCollege information:\n{ctx}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_prompt_names_all_six_sections() {
        let p = overview_prompt("some context");
        for section in [
            "1) About the Institution",
            "2) Academic Programs",
            "3) Quality & Infrastructure",
            "4) Achievements & Recognition",
            "5) Placement & Career Support",
            "6) Closing Assurance",
        ] {
            assert!(p.contains(section), "missing {section}");
        }
        assert!(p.ends_with("some context"));
    }

    #[test]
    fn empty_context_omits_the_context_block() {
        let p = overview_prompt("   ");
        assert!(!p.contains("College information:"));
    }

    #[test]
    fn department_prompt_names_the_department() {
        let p = department_overview_prompt("CSE (AI & ML)", "");
        assert!(p.contains("CSE (AI & ML)"));
        assert!(p.contains("six numbered sections"));
    }

    #[test]
    fn normal_prompt_carries_the_target_language() {
        let grounded = normal_prompt("Kannada", "fee structure details");
        assert!(grounded.contains("Reply only in Kannada."));
        assert!(grounded.contains("College information:\nfee structure details"));

        let ungrounded = normal_prompt("Tamil", "");
        assert!(ungrounded.contains("Reply only in Tamil."));
        assert!(!ungrounded.contains("College information:"));
    }

    #[test]
    fn prefix_plus_context_equals_grounded_prompt() {
        let ctx = "library timings";
        assert_eq!(
            format!("{}{}", normal_prompt_prefix("English"), ctx),
            normal_prompt("English", ctx)
        );
    }
}
