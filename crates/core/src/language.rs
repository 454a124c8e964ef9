//! The fixed language catalog.
//!
//! Each supported language carries its display name (what the client sends
//! in `language_selected`), the synthesis code passed to the speech
//! service, and the canned greeting spoken when a conversation starts.
//!
//! The catalog is closed: an unknown language name leaves the session on
//! its previous selection (English by default).

use serde::Serialize;

/// One supported conversation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Display name, as selected by the client (e.g. "Kannada").
    pub name: &'static str,
    /// Synthesis code passed to the speech service (e.g. "kn-IN").
    pub code: &'static str,
    /// Canned greeting in this language.
    pub greeting: &'static str,
}

impl Language {
    /// Whether this language is English (the generation base language).
    pub fn is_english(&self) -> bool {
        self.name == "English"
    }
}

const CATALOG: &[Language] = &[
    Language {
        name: "English",
        code: "en-IN",
        greeting: "Hello! I'm Asha, your campus assistant. Ask me anything about the college — courses, admissions, facilities, or placements.",
    },
    Language {
        name: "Hindi",
        code: "hi-IN",
        greeting: "नमस्ते! मैं आशा हूँ, आपकी कैंपस सहायक। कॉलेज, कोर्स, प्रवेश या प्लेसमेंट के बारे में कुछ भी पूछिए।",
    },
    Language {
        name: "Kannada",
        code: "kn-IN",
        greeting: "ನಮಸ್ಕಾರ! ನಾನು ಆಶಾ, ನಿಮ್ಮ ಕ್ಯಾಂಪಸ್ ಸಹಾಯಕಿ. ಕಾಲೇಜು, ಕೋರ್ಸ್, ಪ್ರವೇಶ ಅಥವಾ ಪ್ಲೇಸ್‌ಮೆಂಟ್ ಬಗ್ಗೆ ಏನು ಬೇಕಾದರೂ ಕೇಳಿ.",
    },
    Language {
        name: "Tamil",
        code: "ta-IN",
        greeting: "வணக்கம்! நான் ஆஷா, உங்கள் வளாக உதவியாளர். கல்லூரி, பாடநெறிகள், சேர்க்கை அல்லது வேலைவாய்ப்பு பற்றி எதுவும் கேளுங்கள்.",
    },
    Language {
        name: "Telugu",
        code: "te-IN",
        greeting: "నమస్కారం! నేను ఆశా, మీ క్యాంపస్ సహాయకురాలిని. కళాశాల, కోర్సులు, ప్రవేశాలు లేదా ప్లేస్‌మెంట్ల గురించి ఏదైనా అడగండి.",
    },
    Language {
        name: "Malayalam",
        code: "ml-IN",
        greeting: "നമസ്കാരം! ഞാൻ ആശ, നിങ്ങളുടെ ക്യാമ്പസ് സഹായി. കോളേജ്, കോഴ്സുകൾ, പ്രവേശനം, പ്ലേസ്മെന്റ് എന്നിവയെക്കുറിച്ച് എന്തും ചോദിക്കൂ.",
    },
];

/// The full fixed catalog, English first.
pub fn language_catalog() -> &'static [Language] {
    CATALOG
}

/// The default language (English).
pub fn default_language() -> &'static Language {
    &CATALOG[0]
}

/// Look up a language by its exact display name.
pub fn lookup_language(name: &str) -> Option<&'static Language> {
    CATALOG.iter().find(|l| l.name == name)
}
