//! The session wire protocol.
//!
//! Outbound units are `{stage, payload}`; inbound units are
//! `{action, ...fields}`. The payload envelope has one constructor so
//! every call site emits the same shape: `messages`, `isProcessing` and
//! `isSpeaking` are always present, everything else is an optional
//! extension. Consumers must never see a variant shape.

use serde::Serialize;
use serde_json::{Map, Value};

use asha_core::book::DigitalBook;
use asha_core::error::SessionError;
use asha_core::message::ChatMessage;

pub const STAGE_SLEEP: i32 = 0;
pub const STAGE_WOKEN: i32 = 3;
pub const STAGE_ACTIVE: i32 = 5;
pub const STAGE_FATAL: i32 = -1;

/// One outbound protocol unit.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub stage: i32,
    pub payload: Option<Payload>,
}

impl Notification {
    /// A bare stage transition (sleep, woken) with no payload.
    pub fn stage_only(stage: i32) -> Self {
        Self { stage, payload: None }
    }

    /// An active-stage notification carrying a payload.
    pub fn active(payload: Payload) -> Self {
        Self {
            stage: STAGE_ACTIVE,
            payload: Some(payload),
        }
    }

    /// The fatal notification sent when an inbound frame cannot be
    /// parsed at all.
    pub fn fatal(payload: Payload) -> Self {
        Self {
            stage: STAGE_FATAL,
            payload: Some(payload),
        }
    }
}

/// The fixed-shape outbound envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub messages: Vec<ChatMessage>,
    pub is_processing: bool,
    pub is_speaking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_book: Option<DigitalBook>,
    /// Echoed fields from unrecognized client actions.
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Payload {
    /// The only way to build a payload: mandatory fields filled,
    /// extensions off.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            is_processing: false,
            is_speaking: false,
            error: None,
            error_code: None,
            audio_base64: None,
            digital_book: None,
            extras: Map::new(),
        }
    }

    pub fn processing(mut self, on: bool) -> Self {
        self.is_processing = on;
        self
    }

    pub fn speaking(mut self, on: bool) -> Self {
        self.is_speaking = on;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn with_audio(mut self, audio_base64: Option<String>) -> Self {
        self.audio_base64 = audio_base64;
        self
    }

    pub fn with_book(mut self, book: DigitalBook) -> Self {
        self.digital_book = Some(book);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    /// Merge the fields of an echoed client message, without letting
    /// them clobber the mandatory envelope fields.
    pub fn with_echoed(mut self, fields: Map<String, Value>) -> Self {
        for (key, value) in fields {
            match key.as_str() {
                "messages" | "isProcessing" | "isSpeaking" => {}
                _ => {
                    self.extras.insert(key, value);
                }
            }
        }
        self
    }
}

/// One inbound client event.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Wake,
    LanguageSelected { language: String },
    ConversationStarted,
    UserMessage { text: String },
    DiaryTts { text: String },
    MicStart,
    MicStop,
    /// Recognized but echo-only, like the original kiosk client expects.
    MenuSelect { fields: Map<String, Value> },
    Unknown { fields: Map<String, Value> },
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Parse one inbound frame. Only an unparseable frame is an error; an
/// unknown action is a valid `Unknown` event.
pub fn parse_event(raw: &str) -> Result<ClientEvent, SessionError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SessionError::InvalidEvent(e.to_string()))?;
    let Value::Object(obj) = value else {
        return Err(SessionError::InvalidEvent("frame is not a JSON object".into()));
    };
    let action = obj
        .get("action")
        .or_else(|| obj.get("event"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    let event = match action {
        "wake" => ClientEvent::Wake,
        "language_selected" => ClientEvent::LanguageSelected {
            language: text_field(&obj, "language"),
        },
        "conversation_started" => ClientEvent::ConversationStarted,
        "user_message" => ClientEvent::UserMessage {
            text: text_field(&obj, "text"),
        },
        "diary_tts" => ClientEvent::DiaryTts {
            text: text_field(&obj, "text"),
        },
        "mic_start" | "toggle_mic" => ClientEvent::MicStart,
        "mic_stop" | "mic_cancel" => ClientEvent::MicStop,
        "menu_select" => ClientEvent::MenuSelect { fields: obj },
        _ => ClientEvent::Unknown { fields: obj },
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_always_has_the_mandatory_fields() {
        let json = serde_json::to_value(Payload::new(vec![])).unwrap();
        assert!(json["messages"].is_array());
        assert_eq!(json["isProcessing"], false);
        assert_eq!(json["isSpeaking"], false);
        assert!(json.get("error").is_none());
        assert!(json.get("audioBase64").is_none());
    }

    #[test]
    fn optional_fields_serialize_in_camel_case() {
        let payload = Payload::new(vec![])
            .speaking(true)
            .with_audio(Some("UklGRg==".into()))
            .with_error("oops")
            .with_error_code("STT_FAILED");
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["isSpeaking"], true);
        assert_eq!(json["audioBase64"], "UklGRg==");
        assert_eq!(json["error"], "oops");
        assert_eq!(json["errorCode"], "STT_FAILED");
    }

    #[test]
    fn echoed_fields_cannot_clobber_the_envelope() {
        let mut fields = Map::new();
        fields.insert("isProcessing".into(), Value::Bool(true));
        fields.insert("action".into(), Value::String("dance".into()));
        let json = serde_json::to_value(Payload::new(vec![]).with_echoed(fields)).unwrap();
        assert_eq!(json["isProcessing"], false);
        assert_eq!(json["action"], "dance");
    }

    #[test]
    fn known_actions_parse() {
        assert_eq!(parse_event(r#"{"action":"wake"}"#).unwrap(), ClientEvent::Wake);
        assert_eq!(
            parse_event(r#"{"action":"language_selected","language":"Kannada"}"#).unwrap(),
            ClientEvent::LanguageSelected { language: "Kannada".into() }
        );
        assert_eq!(
            parse_event(r#"{"action":"user_message","text":"hostel fees"}"#).unwrap(),
            ClientEvent::UserMessage { text: "hostel fees".into() }
        );
        assert_eq!(parse_event(r#"{"action":"toggle_mic"}"#).unwrap(), ClientEvent::MicStart);
        assert_eq!(parse_event(r#"{"action":"mic_cancel"}"#).unwrap(), ClientEvent::MicStop);
    }

    #[test]
    fn legacy_event_key_is_accepted() {
        assert_eq!(parse_event(r#"{"event":"wake"}"#).unwrap(), ClientEvent::Wake);
    }

    #[test]
    fn unknown_action_keeps_its_fields() {
        let event = parse_event(r#"{"action":"spin","speed":3}"#).unwrap();
        match event {
            ClientEvent::Unknown { fields } => {
                assert_eq!(fields["speed"], 3);
            }
            other => panic!("expected unknown event, got {other:?}"),
        }
    }

    #[test]
    fn garbage_frames_are_invalid() {
        assert!(parse_event("not json").is_err());
        assert!(parse_event("[1,2,3]").is_err());
    }
}
