//! The per-connection session state machine.
//!
//! One `SessionHandler` per connection. Inbound events are handled
//! strictly one at a time; outbound notifications go through an mpsc
//! sink the transport drains. Collaborator failures never escape a
//! turn: every branch ends in a complete, correctly-shaped
//! notification.
//!
//! History mutation rules: a successful text turn appends the user and
//! assistant records; a book or menu turn appends only the user record;
//! every failed turn leaves history untouched.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use asha_assistant::book::build_digital_book;
use asha_assistant::catalog::resolve_department;
use asha_assistant::context::ContextAssembler;
use asha_assistant::generate::{Generator, Reply};
use asha_assistant::intent::classify;
use asha_core::language::{default_language, lookup_language, Language};
use asha_core::message::{ChatMessage, Role};
use asha_core::speech::{AudioCapture, SpeechRecognizer, SpeechSynthesizer};

use crate::protocol::{
    parse_event, ClientEvent, Notification, Payload, STAGE_SLEEP, STAGE_WOKEN,
};

const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
const EMPTY_QUERY_ERROR: &str = "Please provide a valid query.";
const GREETING_AUDIO_ERROR: &str = "Could not generate greeting audio.";
const REPLY_AUDIO_ERROR: &str = "Reply is shown but could not be read aloud.";
const PAGE_AUDIO_ERROR: &str = "TTS unavailable for this page.";
const MIC_CAPTURE_ERROR: &str = "No speech heard.";
const STT_ERROR: &str = "Speech recognition failed. Please try again.";
const NO_SPEECH_ERROR: &str = "No speech detected.";

const CODE_MIC_CAPTURE_FAILED: &str = "MIC_CAPTURE_FAILED";
const CODE_STT_FAILED: &str = "STT_FAILED";
const CODE_NO_SPEECH_DETECTED: &str = "NO_SPEECH_DETECTED";

/// Greeting synthesized ahead of time on language selection, consumed
/// at most once by `conversation_started`.
struct CachedGreeting {
    message: ChatMessage,
    audio_base64: String,
}

/// One connection's conversational state.
struct Session {
    language: &'static Language,
    messages: Vec<ChatMessage>,
    cached_greeting: Option<CachedGreeting>,
}

impl Session {
    fn new() -> Self {
        Self {
            language: default_language(),
            messages: Vec::new(),
            cached_greeting: None,
        }
    }
}

/// Sequences the full pipeline for one connection.
pub struct SessionHandler {
    assembler: ContextAssembler,
    generator: Generator,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    capture: Option<Arc<dyn AudioCapture>>,
    outbound: mpsc::Sender<Notification>,
    session: Session,
}

impl SessionHandler {
    pub fn new(
        assembler: ContextAssembler,
        generator: Generator,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        capture: Option<Arc<dyn AudioCapture>>,
        outbound: mpsc::Sender<Notification>,
    ) -> Self {
        Self {
            assembler,
            generator,
            synthesizer,
            recognizer,
            capture,
            outbound,
            session: Session::new(),
        }
    }

    /// Sent once when the connection opens: the sleep-screen stage.
    pub async fn on_connect(&self) {
        self.send(Notification::stage_only(STAGE_SLEEP)).await;
    }

    /// Entry point for one raw inbound frame. An unparseable frame gets
    /// the fatal stage with a generic apology; everything else is
    /// dispatched by event type.
    pub async fn handle_frame(&mut self, raw: &str) {
        match parse_event(raw) {
            Ok(event) => self.handle_event(event).await,
            Err(e) => {
                error!(error = %e, "Dropping unparseable client frame");
                let payload = Payload::new(self.session.messages.clone()).with_error(GENERIC_ERROR);
                self.send(Notification::fatal(payload)).await;
            }
        }
    }

    pub async fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Wake => {
                self.send(Notification::stage_only(STAGE_WOKEN)).await;
            }
            ClientEvent::LanguageSelected { language } => self.on_language_selected(&language).await,
            ClientEvent::ConversationStarted => self.on_conversation_started().await,
            ClientEvent::UserMessage { text } => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    let payload =
                        Payload::new(self.session.messages.clone()).with_error(EMPTY_QUERY_ERROR);
                    self.send(Notification::active(payload)).await;
                } else {
                    self.respond_to_text(&text).await;
                }
            }
            ClientEvent::DiaryTts { text } => self.on_diary_tts(text.trim()).await,
            ClientEvent::MicStart => self.on_mic_start().await,
            ClientEvent::MicStop => {
                let payload = Payload::new(self.session.messages.clone());
                self.send(Notification::active(payload)).await;
            }
            ClientEvent::MenuSelect { fields } | ClientEvent::Unknown { fields } => {
                let payload = Payload::new(self.session.messages.clone()).with_echoed(fields);
                self.send(Notification::active(payload)).await;
            }
        }
    }

    async fn on_language_selected(&mut self, language: &str) {
        // Snapshot before the greeting may be inserted; the idle
        // notification reflects the history as the event arrived.
        let snapshot = self.session.messages.clone();
        match lookup_language(language) {
            Some(lang) => {
                self.session.language = lang;
                info!(language = lang.name, code = lang.code, "Language selected");
                if let Some(audio) = self.synthesize_b64(lang.greeting, lang.code).await {
                    let greeting =
                        ChatMessage::with_id("greeting", Role::Assistant, lang.greeting);
                    if self.session.messages.is_empty() {
                        self.session.messages.push(greeting.clone());
                    }
                    self.session.cached_greeting = Some(CachedGreeting {
                        message: greeting,
                        audio_base64: audio,
                    });
                } else {
                    debug!("Greeting preload skipped, will synthesize on conversation start");
                }
            }
            None => {
                warn!(language, "Unknown language, keeping previous selection");
            }
        }
        self.send(Notification::active(Payload::new(snapshot))).await;
    }

    async fn on_conversation_started(&mut self) {
        if let Some(cached) = self.session.cached_greeting.take() {
            let payload = Payload::new(vec![cached.message])
                .speaking(true)
                .with_audio(Some(cached.audio_base64));
            self.send(Notification::active(payload)).await;
            return;
        }

        let lang = self.session.language;
        let audio = self.synthesize_b64(lang.greeting, lang.code).await;
        if self.session.messages.is_empty() {
            self.session
                .messages
                .push(ChatMessage::with_id("greeting", Role::Assistant, lang.greeting));
        }
        let mut payload = Payload::new(self.session.messages.clone())
            .speaking(audio.is_some())
            .with_audio(audio.clone());
        if audio.is_none() {
            payload = payload.with_error(GREETING_AUDIO_ERROR);
        }
        self.send(Notification::active(payload)).await;
    }

    /// The full classify → assemble → generate → synthesize pipeline
    /// for one non-empty user text. Exactly one processing notification
    /// followed by exactly one result notification.
    async fn respond_to_text(&mut self, text: &str) {
        let processing = Payload::new(self.session.messages.clone()).processing(true);
        self.send(Notification::active(processing)).await;

        let language = self.session.language;
        let intent = classify(text);
        let department = resolve_department(text).map(|d| d.name);
        let context = self.assembler.assemble(intent, text, department).await;
        debug!(intent = ?intent, context_chars = context.len(), "Pipeline context ready");

        let reply = self
            .generator
            .generate(intent, text, &context, language, department, &self.session.messages)
            .await;

        let payload = match reply {
            Reply::CourseMenu => {
                self.session.messages.push(ChatMessage::user(text));
                Payload::new(self.session.messages.clone())
                    .with_extra("courseMenu", Value::Bool(true))
            }
            Reply::Overview(overview) => {
                let book =
                    build_digital_book(&overview, self.synthesizer.as_ref(), language.code).await;
                self.session.messages.push(ChatMessage::user(text));
                Payload::new(self.session.messages.clone()).with_book(book)
            }
            Reply::Text(reply_text) => {
                let audio = self.synthesize_b64(&reply_text, language.code).await;
                self.session.messages.push(ChatMessage::user(text));
                self.session.messages.push(ChatMessage::assistant(&reply_text));
                let mut payload = Payload::new(self.session.messages.clone())
                    .speaking(audio.is_some())
                    .with_audio(audio.clone());
                if audio.is_none() {
                    payload = payload.with_error(REPLY_AUDIO_ERROR);
                }
                payload
            }
        };
        self.send(Notification::active(payload)).await;
    }

    async fn on_diary_tts(&mut self, text: &str) {
        if text.is_empty() {
            let payload = Payload::new(self.session.messages.clone());
            self.send(Notification::active(payload)).await;
            return;
        }
        let code = self.session.language.code;
        let mut payload = Payload::new(self.session.messages.clone());
        match self.synthesize_b64(text, code).await {
            Some(audio) => {
                payload = payload.speaking(true).with_audio(Some(audio));
            }
            None => {
                payload = payload.with_error(PAGE_AUDIO_ERROR);
            }
        }
        self.send(Notification::active(payload)).await;
    }

    /// Microphone turn: capture off-thread, transcribe, then run the
    /// text pipeline. Three distinct failure modes, each with its own
    /// client-visible error code, none of which touches the history.
    async fn on_mic_start(&mut self) {
        let processing = Payload::new(self.session.messages.clone()).processing(true);
        self.send(Notification::active(processing)).await;

        let wav = match self.capture.clone() {
            Some(capture) => {
                match tokio::task::spawn_blocking(move || capture.record()).await {
                    Ok(Ok(bytes)) if !bytes.is_empty() => Some(bytes),
                    Ok(Ok(_)) => None,
                    Ok(Err(e)) => {
                        error!(error = %e, "Audio capture failed");
                        None
                    }
                    Err(e) => {
                        error!(error = %e, "Capture task panicked");
                        None
                    }
                }
            }
            None => {
                warn!("No audio capture configured");
                None
            }
        };
        let Some(wav) = wav else {
            self.send_error(MIC_CAPTURE_ERROR, CODE_MIC_CAPTURE_FAILED).await;
            return;
        };

        let Some(recognizer) = self.recognizer.clone() else {
            warn!("No speech recognizer configured");
            self.send_error(STT_ERROR, CODE_STT_FAILED).await;
            return;
        };
        let transcript = match recognizer.transcribe(&wav).await {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Speech recognition failed");
                self.send_error(STT_ERROR, CODE_STT_FAILED).await;
                return;
            }
        };
        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            warn!(wav_bytes = wav.len(), "Recognizer returned empty transcript");
            self.send_error(NO_SPEECH_ERROR, CODE_NO_SPEECH_DETECTED).await;
            return;
        }

        info!(chars = transcript.len(), "Transcribed microphone input");
        self.respond_to_text(&transcript).await;
    }

    async fn send_error(&self, error: &str, code: &str) {
        let payload = Payload::new(self.session.messages.clone())
            .with_error(error)
            .with_error_code(code);
        self.send(Notification::active(payload)).await;
    }

    async fn synthesize_b64(&self, text: &str, language_code: &str) -> Option<String> {
        let synthesizer = self.synthesizer.as_ref()?;
        match synthesizer.synthesize(text, language_code).await {
            Ok(wav) => Some(BASE64.encode(wav)),
            Err(e) => {
                warn!(error = %e, "Speech synthesis failed");
                None
            }
        }
    }

    async fn send(&self, notification: Notification) {
        if self.outbound.send(notification).await.is_err() {
            debug!("Outbound channel closed, dropping notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use asha_core::completion::{CompletionClient, CompletionRequest};
    use asha_core::error::{CompletionError, SpeechError};
    use asha_retrieval::ContextRetriever;

    use crate::protocol::{STAGE_ACTIVE, STAGE_FATAL};

    const OVERVIEW_REPLY: &str = "1) About the Institution Established 2008.\n\
2) Academic Programs Seven branches.\n\
3) Quality & Infrastructure NAAC accredited.\n\
4) Achievements & Recognition Top ranked.\n\
5) Placement & Career Support Strong offers.\n\
6) Closing Assurance In good hands.";

    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, CompletionError>>>,
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(CompletionError::Network("script exhausted".into()))
            } else {
                replies.remove(0)
            }
        }
    }

    struct OkSynth {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for OkSynth {
        async fn synthesize(&self, _text: &str, _code: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"RIFFfake".to_vec())
        }
    }

    struct BrokenSynth;

    #[async_trait]
    impl SpeechSynthesizer for BrokenSynth {
        async fn synthesize(&self, _text: &str, _code: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::SynthesisFailed("tts down".into()))
        }
    }

    struct OkRecognizer(&'static str);

    #[async_trait]
    impl SpeechRecognizer for OkRecognizer {
        async fn transcribe(&self, _wav: &[u8]) -> Result<String, SpeechError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl SpeechRecognizer for BrokenRecognizer {
        async fn transcribe(&self, _wav: &[u8]) -> Result<String, SpeechError> {
            Err(SpeechError::RecognitionFailed("stt down".into()))
        }
    }

    struct OkCapture;

    impl AudioCapture for OkCapture {
        fn record(&self) -> Result<Vec<u8>, SpeechError> {
            Ok(b"RIFFmic".to_vec())
        }
    }

    struct Harness {
        handler: SessionHandler,
        rx: mpsc::Receiver<Notification>,
    }

    impl Harness {
        fn drain(&mut self) -> Vec<Notification> {
            let mut out = Vec::new();
            while let Ok(n) = self.rx.try_recv() {
                out.push(n);
            }
            out
        }
    }

    fn harness(
        replies: Vec<Result<String, CompletionError>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        capture: Option<Arc<dyn AudioCapture>>,
    ) -> Harness {
        let (tx, rx) = mpsc::channel(32);
        let assembler = ContextAssembler::new(Arc::new(ContextRetriever::disabled()), 5, 2000);
        let client: Arc<dyn CompletionClient> = Arc::new(ScriptedClient {
            replies: Mutex::new(replies),
        });
        let handler = SessionHandler::new(
            assembler,
            Generator::new(Some(client)),
            synthesizer,
            recognizer,
            capture,
            tx,
        );
        Harness { handler, rx }
    }

    fn payload(n: &Notification) -> &Payload {
        n.payload.as_ref().expect("payload expected")
    }

    #[tokio::test]
    async fn wake_is_a_bare_stage_transition() {
        let mut h = harness(vec![], None, None, None);
        h.handler.handle_event(ClientEvent::Wake).await;
        let out = h.drain();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].stage, STAGE_WOKEN);
        assert!(out[0].payload.is_none());
    }

    #[tokio::test]
    async fn language_selection_caches_a_greeting() {
        let synth = Arc::new(OkSynth { calls: AtomicUsize::new(0) });
        let mut h = harness(vec![], Some(synth.clone()), None, None);
        h.handler
            .handle_event(ClientEvent::LanguageSelected { language: "Kannada".into() })
            .await;
        let out = h.drain();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].stage, STAGE_ACTIVE);
        assert_eq!(h.handler.session.language.code, "kn-IN");
        assert!(h.handler.session.cached_greeting.is_some());
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_language_keeps_the_previous_selection() {
        let mut h = harness(vec![], None, None, None);
        h.handler
            .handle_event(ClientEvent::LanguageSelected { language: "Klingon".into() })
            .await;
        let out = h.drain();
        assert_eq!(out.len(), 1);
        assert_eq!(h.handler.session.language.name, "English");
    }

    #[tokio::test]
    async fn conversation_start_consumes_the_cache_once() {
        let synth = Arc::new(OkSynth { calls: AtomicUsize::new(0) });
        let mut h = harness(vec![], Some(synth.clone()), None, None);
        h.handler
            .handle_event(ClientEvent::LanguageSelected { language: "English".into() })
            .await;
        h.drain();

        h.handler.handle_event(ClientEvent::ConversationStarted).await;
        let out = h.drain();
        let p = payload(&out[0]);
        assert!(p.is_speaking);
        assert!(p.audio_base64.is_some());
        assert_eq!(p.messages[0].id, "greeting");
        assert!(h.handler.session.cached_greeting.is_none());

        // Second start re-synthesizes instead of reusing the cache.
        h.handler.handle_event(ClientEvent::ConversationStarted).await;
        h.drain();
        assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_greeting_synthesis_surfaces_a_nonfatal_error() {
        let mut h = harness(vec![], Some(Arc::new(BrokenSynth)), None, None);
        h.handler.handle_event(ClientEvent::ConversationStarted).await;
        let out = h.drain();
        let p = payload(&out[0]);
        assert_eq!(p.error.as_deref(), Some(GREETING_AUDIO_ERROR));
        assert!(!p.is_speaking);
        assert_eq!(p.messages[0].id, "greeting");
    }

    #[tokio::test]
    async fn empty_user_message_is_rejected_without_history_change() {
        let mut h = harness(vec![], None, None, None);
        h.handler
            .handle_event(ClientEvent::UserMessage { text: "   ".into() })
            .await;
        let out = h.drain();
        assert_eq!(out.len(), 1);
        assert_eq!(payload(&out[0]).error.as_deref(), Some(EMPTY_QUERY_ERROR));
        assert!(h.handler.session.messages.is_empty());
    }

    #[tokio::test]
    async fn text_turn_appends_both_records_and_speaks() {
        let synth = Arc::new(OkSynth { calls: AtomicUsize::new(0) });
        let mut h = harness(
            vec![Ok("The library opens at 8 AM.".into())],
            Some(synth),
            None,
            None,
        );
        h.handler
            .handle_event(ClientEvent::UserMessage { text: "library timings?".into() })
            .await;
        let out = h.drain();
        assert_eq!(out.len(), 2);
        assert!(payload(&out[0]).is_processing);
        let result = payload(&out[1]);
        assert!(result.is_speaking);
        assert!(result.audio_base64.is_some());
        assert!(result.error.is_none());
        assert_eq!(h.handler.session.messages.len(), 2);
        assert_eq!(h.handler.session.messages[1].text, "The library opens at 8 AM.");
    }

    #[tokio::test]
    async fn synthesis_failure_keeps_the_text_reply() {
        let mut h = harness(
            vec![Ok("The library opens at 8 AM.".into())],
            Some(Arc::new(BrokenSynth)),
            None,
            None,
        );
        h.handler
            .handle_event(ClientEvent::UserMessage { text: "library timings?".into() })
            .await;
        let out = h.drain();
        let result = payload(&out[1]);
        assert!(!result.is_speaking);
        assert_eq!(result.error.as_deref(), Some(REPLY_AUDIO_ERROR));
        assert_eq!(h.handler.session.messages.len(), 2);
    }

    #[tokio::test]
    async fn overview_turn_returns_a_complete_book() {
        let mut h = harness(vec![Ok(OVERVIEW_REPLY.into())], None, None, None);
        h.handler
            .handle_event(ClientEvent::UserMessage { text: "college overview".into() })
            .await;
        let out = h.drain();
        let result = payload(&out[1]);
        let book = result.digital_book.as_ref().expect("book expected");
        assert_eq!(book.pages.len(), 6);
        // Book turns append only the user record.
        assert_eq!(h.handler.session.messages.len(), 1);
        assert_eq!(h.handler.session.messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn course_menu_turn_sets_the_menu_extension() {
        let mut h = harness(vec![], None, None, None);
        h.handler
            .handle_event(ClientEvent::UserMessage { text: "what courses are available".into() })
            .await;
        let out = h.drain();
        let result = payload(&out[1]);
        assert_eq!(result.extras.get("courseMenu"), Some(&Value::Bool(true)));
        assert!(result.digital_book.is_none());
        assert_eq!(h.handler.session.messages.len(), 1);
    }

    #[tokio::test]
    async fn mic_without_capture_reports_capture_failure() {
        let mut h = harness(vec![], None, None, None);
        h.handler.handle_event(ClientEvent::MicStart).await;
        let out = h.drain();
        assert_eq!(out.len(), 2);
        let result = payload(&out[1]);
        assert_eq!(result.error_code.as_deref(), Some(CODE_MIC_CAPTURE_FAILED));
        assert!(h.handler.session.messages.is_empty());
    }

    #[tokio::test]
    async fn recognizer_failure_reports_stt_error() {
        let mut h = harness(
            vec![],
            None,
            Some(Arc::new(BrokenRecognizer)),
            Some(Arc::new(OkCapture)),
        );
        h.handler.handle_event(ClientEvent::MicStart).await;
        let out = h.drain();
        let result = payload(&out[1]);
        assert_eq!(result.error_code.as_deref(), Some(CODE_STT_FAILED));
        assert!(h.handler.session.messages.is_empty());
    }

    #[tokio::test]
    async fn empty_transcript_is_its_own_error_code() {
        let mut h = harness(
            vec![],
            None,
            Some(Arc::new(OkRecognizer("   "))),
            Some(Arc::new(OkCapture)),
        );
        h.handler.handle_event(ClientEvent::MicStart).await;
        let out = h.drain();
        let result = payload(&out[1]);
        assert_eq!(result.error_code.as_deref(), Some(CODE_NO_SPEECH_DETECTED));
        assert!(h.handler.session.messages.is_empty());
    }

    #[tokio::test]
    async fn transcribed_speech_runs_the_text_pipeline() {
        let mut h = harness(
            vec![Ok("The canteen is open till 6.".into())],
            None,
            Some(Arc::new(OkRecognizer("canteen timings"))),
            Some(Arc::new(OkCapture)),
        );
        h.handler.handle_event(ClientEvent::MicStart).await;
        let out = h.drain();
        // mic processing + pipeline processing + result
        assert_eq!(out.len(), 3);
        let result = payload(&out[2]);
        assert_eq!(result.error, Some(REPLY_AUDIO_ERROR.to_string()));
        assert_eq!(h.handler.session.messages.len(), 2);
        assert_eq!(h.handler.session.messages[0].text, "canteen timings");
    }

    #[tokio::test]
    async fn unknown_actions_are_echoed_with_envelope_defaults() {
        let mut h = harness(vec![], None, None, None);
        let mut fields = serde_json::Map::new();
        fields.insert("action".into(), Value::String("spin".into()));
        fields.insert("speed".into(), Value::from(3));
        h.handler.handle_event(ClientEvent::Unknown { fields }).await;
        let out = h.drain();
        let result = payload(&out[0]);
        assert_eq!(result.extras.get("speed"), Some(&Value::from(3)));
        assert!(!result.is_processing);
    }

    #[tokio::test]
    async fn unparseable_frames_answer_with_the_fatal_stage() {
        let mut h = harness(vec![], None, None, None);
        h.handler.handle_frame("definitely not json").await;
        let out = h.drain();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].stage, STAGE_FATAL);
        assert_eq!(payload(&out[0]).error.as_deref(), Some(GENERIC_ERROR));
    }
}
