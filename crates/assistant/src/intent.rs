//! Deterministic intent routing.
//!
//! `classify` is a pure, total function: an ordered list of substring
//! rules over normalized text, first match wins, no scoring and no model
//! call. Matching is substring-based rather than tokenized, so a catalog
//! phrase occurring anywhere in the query triggers its intent; short
//! synonyms can over-trigger inside longer words, which is accepted
//! behavior for this catalog.

use crate::catalog::resolve_department;

/// The closed set of query intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Institution-wide structured overview, rendered as a digital book.
    CollegeOverview,
    /// Overview scoped to one catalog department.
    DepartmentOverview,
    /// Fixed course/department menu; no generation call.
    CourseMenu,
    /// Everything else: single grounded completion.
    NormalQuery,
}

/// English overview phrases.
const OVERVIEW_PHRASES_EN: &[&str] = &[
    "college overview",
    "brief about the college",
    "about svit",
    "college information",
    "overview of the college",
    "tell me about the college",
    "institute overview",
    "about the college",
    "college brief",
    "overview of college",
    "information about college",
    "about the institute",
];

/// Regional overview phrases (Hindi, Kannada, Tamil, Telugu, Malayalam).
const OVERVIEW_PHRASES_REGIONAL: &[&str] = &[
    "कॉलेज का विवरण",
    "कॉलेज की जानकारी",
    "कॉलेज के बारे में",
    "ಕಾಲೇಜು ಮಾಹಿತಿ",
    "ಕಾಲೇಜ್ ಬಗ್ಗೆ",
    "கல்லூரி தகவல்",
    "கல்லூரி பற்றி",
    "కళాశాల సమాచారం",
    "కళాశాల గురించి",
    "കോളേജ് വിവരം",
    "കോളേജിനെക്കുറിച്ച്",
];

/// Explicit enumeration phrases for the course menu.
const COURSE_MENU_PHRASES: &[&str] = &[
    "course list",
    "list of courses",
    "list of departments",
    "programs offered",
    "courses offered",
    "available courses",
    "available branches",
    "कौन से कोर्स",
    "ಯಾವ ಕೋರ್ಸ್",
    "என்ன படிப்புகள்",
    "ఏ కోర్సులు",
    "ഏതൊക്കെ കോഴ്സുകൾ",
];

const QUESTION_WORDS: &[&str] = &["which", "what"];
const ENUMERABLE_NOUNS: &[&str] = &["course", "department", "branch", "program"];
const ENUMERATION_VERBS: &[&str] = &["available", "offer", "list", "show"];

/// Lowercase, trim, collapse runs of whitespace to single spaces.
pub(crate) fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// Classify one query. Empty or whitespace-only input is `NormalQuery`.
pub fn classify(text: &str) -> Intent {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Intent::NormalQuery;
    }

    if resolve_department(&normalized).is_some() {
        return Intent::DepartmentOverview;
    }

    if contains_any(&normalized, COURSE_MENU_PHRASES) {
        return Intent::CourseMenu;
    }
    let asks_which = contains_any(&normalized, QUESTION_WORDS);
    let names_noun = contains_any(&normalized, ENUMERABLE_NOUNS);
    let asks_enumeration = contains_any(&normalized, ENUMERATION_VERBS);
    if names_noun && (asks_which || asks_enumeration) {
        return Intent::CourseMenu;
    }

    if contains_any(&normalized, OVERVIEW_PHRASES_EN)
        || contains_any(&normalized, OVERVIEW_PHRASES_REGIONAL)
    {
        return Intent::CollegeOverview;
    }

    Intent::NormalQuery
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_normal() {
        assert_eq!(classify(""), Intent::NormalQuery);
        assert_eq!(classify("   \t\n "), Intent::NormalQuery);
    }

    #[test]
    fn overview_phrases_match_case_insensitively() {
        assert_eq!(classify("College Overview please"), Intent::CollegeOverview);
        assert_eq!(classify("tell me ABOUT the college"), Intent::CollegeOverview);
    }

    #[test]
    fn regional_overview_phrases_match() {
        assert_eq!(classify("कॉलेज की जानकारी दीजिये"), Intent::CollegeOverview);
        assert_eq!(classify("ಕಾಲೇಜು ಮಾಹಿತಿ ಕೊಡಿ"), Intent::CollegeOverview);
        assert_eq!(classify("கல்லூரி தகவல் வேண்டும்"), Intent::CollegeOverview);
    }

    #[test]
    fn course_enumeration_questions_are_menu() {
        assert_eq!(classify("What courses are available?"), Intent::CourseMenu);
        assert_eq!(classify("which branches do you have"), Intent::CourseMenu);
        assert_eq!(classify("show me the programs offered"), Intent::CourseMenu);
    }

    #[test]
    fn department_mention_wins_over_menu_heuristics() {
        // "which" + "department" would be a menu query, but a concrete
        // department name takes priority.
        assert_eq!(
            classify("which labs does the ECE department have"),
            Intent::DepartmentOverview
        );
    }

    #[test]
    fn department_synonym_triggers_department_overview() {
        assert_eq!(
            classify("Tell me about CSE AI ML department"),
            Intent::DepartmentOverview
        );
        assert_eq!(classify("mechanical engineering scope"), Intent::DepartmentOverview);
    }

    #[test]
    fn plain_questions_are_normal() {
        assert_eq!(classify("where is the library"), Intent::NormalQuery);
        assert_eq!(classify("hostel fees per year"), Intent::NormalQuery);
    }

    #[test]
    fn normalization_collapses_whitespace() {
        assert_eq!(normalize("  College   OVERVIEW \n now "), "college overview now");
    }
}
