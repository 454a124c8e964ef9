//! Digital book construction.
//!
//! An overview reply carries six numbered sections; the sixth (Closing
//! Assurance) is spoken but never printed, so the book is a fixed cover
//! plus five titled content pages. Section splitting tolerates any
//! malformation: missing sections are padded with a placeholder so
//! every title always has a page.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::warn;

use asha_core::book::{BookPage, DigitalBook};
use asha_core::speech::SpeechSynthesizer;

/// The five content-page titles, in book order.
pub const SECTION_TITLES: [&str; 5] = [
    "About the Institution",
    "Academic Programs",
    "Quality & Infrastructure",
    "Achievements & Recognition",
    "Placement & Career Support",
];

pub const COVER_TITLE: &str = "Sai Vidya Institute of Technology";
pub const COVER_TEXT: &str = "Established 2008";
pub const MISSING_SECTION: &str = "Information not available.";

/// True when a line opens with a section marker like "3)" or "3.".
fn section_marker_len(line: &str) -> Option<usize> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    if rest.starts_with(')') || rest.starts_with('.') {
        Some(digits + 1)
    } else {
        None
    }
}

/// Split overview text into exactly five section bodies, mapped
/// positionally onto `SECTION_TITLES`. Text before the first marker is
/// treated as an intro and dropped; the closing section is dropped;
/// missing sections become the placeholder. Total function.
pub fn split_overview_sections(text: &str) -> [String; 5] {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.trim().lines() {
        let stripped = line.trim_start();
        if let Some(marker) = section_marker_len(stripped) {
            if !current.trim().is_empty() {
                segments.push(current.trim().to_string());
            }
            current = stripped[marker..].trim_start().to_string();
            current.push('\n');
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        segments.push(current.trim().to_string());
    }

    // A leading intro before "1)" can make this seven segments; keep
    // the last six, then the first five of those (the closing section
    // is not a book page).
    let start = segments.len().saturating_sub(6);
    let mut sections: Vec<String> = segments[start..].iter().take(5).cloned().collect();
    sections.resize(5, String::new());

    sections
        .into_iter()
        .map(|s| {
            if s.trim().is_empty() {
                MISSING_SECTION.to_string()
            } else {
                s
            }
        })
        .collect::<Vec<_>>()
        .try_into()
        .unwrap_or_else(|_| std::array::from_fn(|_| MISSING_SECTION.to_string()))
}

/// Build the complete six-page book from overview text, synthesizing
/// audio per content page. A failed synthesis leaves that page silent;
/// the book is always complete.
pub async fn build_digital_book(
    text: &str,
    synthesizer: Option<&Arc<dyn SpeechSynthesizer>>,
    language_code: &str,
) -> DigitalBook {
    let sections = split_overview_sections(text);
    let mut pages = Vec::with_capacity(6);
    pages.push(BookPage::new(COVER_TITLE, COVER_TEXT));

    for (title, body) in SECTION_TITLES.iter().zip(sections) {
        let audio = match synthesizer {
            Some(tts) => match tts.synthesize(&body, language_code).await {
                Ok(wav) => Some(BASE64.encode(wav)),
                Err(e) => {
                    warn!(page = title, error = %e, "Page audio synthesis failed");
                    None
                }
            },
            None => None,
        };
        pages.push(BookPage::new(*title, body).with_audio(audio));
    }

    DigitalBook { pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use asha_core::error::SpeechError;

    const WELL_FORMED: &str = "1) About the Institution Sai Vidya was established in 2008.\n\
2) Academic Programs Seven engineering branches and an MBA.\n\
3) Quality & Infrastructure NAAC accredited with modern labs.\n\
4) Achievements & Recognition Ranked among the top VTU colleges.\n\
5) Placement & Career Support Dedicated placement cell, strong offers.\n\
6) Closing Assurance Your child is in good hands.";

    struct FixedSynth;

    #[async_trait]
    impl SpeechSynthesizer for FixedSynth {
        async fn synthesize(&self, _text: &str, _language_code: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(b"RIFF".to_vec())
        }
    }

    struct BrokenSynth;

    #[async_trait]
    impl SpeechSynthesizer for BrokenSynth {
        async fn synthesize(&self, _text: &str, _language_code: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::SynthesisFailed("tts down".into()))
        }
    }

    #[test]
    fn well_formed_text_maps_sections_in_order() {
        let sections = split_overview_sections(WELL_FORMED);
        assert!(sections[0].contains("established in 2008"));
        assert!(sections[1].contains("MBA"));
        assert!(sections[4].contains("placement cell"));
        // Closing Assurance never becomes a page body.
        assert!(!sections.iter().any(|s| s.contains("good hands")));
    }

    #[test]
    fn intro_before_first_marker_is_dropped() {
        let text = format!("Here is the overview you asked for.\n{WELL_FORMED}");
        let sections = split_overview_sections(&text);
        assert!(sections[0].contains("established in 2008"));
    }

    #[test]
    fn short_text_pads_missing_sections() {
        let text = "1) About the Institution Founded 2008.\n\
2) Academic Programs Seven branches.\n\
3) Quality & Infrastructure Good labs.";
        let sections = split_overview_sections(text);
        assert!(sections[0].contains("Founded 2008"));
        assert_eq!(sections[3], MISSING_SECTION);
        assert_eq!(sections[4], MISSING_SECTION);
    }

    #[test]
    fn garbage_text_still_yields_five_sections() {
        let sections = split_overview_sections("no numbering at all, just prose");
        assert_eq!(sections.len(), 5);
        // The prose lands in the first slot, the rest are placeholders.
        assert_eq!(sections[4], MISSING_SECTION);
    }

    #[test]
    fn empty_text_is_all_placeholders() {
        let sections = split_overview_sections("");
        assert!(sections.iter().all(|s| s == MISSING_SECTION));
    }

    #[tokio::test]
    async fn book_always_has_six_pages() {
        let synth: Arc<dyn SpeechSynthesizer> = Arc::new(FixedSynth);
        let book = build_digital_book(WELL_FORMED, Some(&synth), "en-IN").await;
        assert_eq!(book.pages.len(), 6);
        assert_eq!(book.pages[0].title, COVER_TITLE);
        assert!(book.pages[0].audio_base64.is_none());
        assert!(book.pages[1..].iter().all(|p| p.audio_base64.is_some()));
    }

    #[tokio::test]
    async fn per_page_synthesis_failure_keeps_the_page() {
        let synth: Arc<dyn SpeechSynthesizer> = Arc::new(BrokenSynth);
        let book = build_digital_book(WELL_FORMED, Some(&synth), "en-IN").await;
        assert_eq!(book.pages.len(), 6);
        assert!(book.pages.iter().all(|p| p.audio_base64.is_none()));
        assert!(book.pages[1].text.contains("established in 2008"));
    }

    #[tokio::test]
    async fn malformed_text_still_builds_a_complete_book() {
        let book = build_digital_book("1) Only one section here", None, "en-IN").await;
        assert_eq!(book.pages.len(), 6);
        let placeholders = book.pages[1..]
            .iter()
            .filter(|p| p.text == MISSING_SECTION)
            .count();
        assert_eq!(placeholders, 4);
    }
}
