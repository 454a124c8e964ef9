//! Digital book value objects.
//!
//! An overview reply can be rendered as a paginated "digital book":
//! one fixed cover page followed by five titled content pages, each
//! optionally carrying synthesized audio. The serialized shape is part
//! of the session protocol and must never vary.

use serde::{Deserialize, Serialize};

/// One page of a digital book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPage {
    /// Page title (cover title or one of the five fixed section titles).
    pub title: String,

    /// Page body text.
    pub text: String,

    /// Base64 WAV audio for this page; `null` for the cover and for
    /// pages whose synthesis failed.
    #[serde(rename = "audioBase64")]
    pub audio_base64: Option<String>,
}

impl BookPage {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            audio_base64: None,
        }
    }

    pub fn with_audio(mut self, audio_base64: Option<String>) -> Self {
        self.audio_base64 = audio_base64;
        self
    }
}

/// A complete digital book: cover + five content pages, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalBook {
    pub pages: Vec<BookPage>,
}

impl DigitalBook {
    /// Number of content pages (everything after the cover).
    pub fn content_pages(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}
