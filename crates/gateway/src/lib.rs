//! WebSocket gateway for Asha.
//!
//! One WebSocket connection = one session. The gateway builds the
//! shared collaborators once at startup (completion client, retriever,
//! speech services), hands each connection its own `SessionHandler`,
//! and shuttles frames between the socket and the handler's outbound
//! channel. Built on Axum.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    response::{Json, Response},
    routing::get,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use asha_assistant::context::ContextAssembler;
use asha_assistant::generate::Generator;
use asha_config::AppConfig;
use asha_core::completion::CompletionClient;
use asha_core::retrieval::KnowledgeStore;
use asha_core::speech::{AudioCapture, SpeechRecognizer, SpeechSynthesizer};
use asha_retrieval::{ContextRetriever, PgVectorStore};
use asha_session::SessionHandler;

/// Collaborators shared by every connection.
pub struct GatewayState {
    pub config: AppConfig,
    pub completion: Option<Arc<dyn CompletionClient>>,
    pub retriever: Arc<ContextRetriever>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub capture: Option<Arc<dyn AudioCapture>>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway.allowed_origins);
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_handler))
        .route("/ws/assistant", get(ws_handler))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %o, error = %e, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    }
}

/// Build the shared collaborators and start the gateway server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(build_state(config).await);
    log_startup_diagnostics(&state).await;

    let app = build_router(state);
    info!(addr = %addr, "Gateway listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build collaborators once; every connection shares them. A missing
/// collaborator is a degraded mode, never a startup failure.
pub async fn build_state(config: AppConfig) -> GatewayState {
    let completion = asha_providers::completion_from_config(&config);
    let synthesizer = asha_speech::synthesizer_from_config(&config);
    let recognizer = asha_speech::recognizer_from_config(&config);
    let capture = asha_speech::capture_from_config(&config);

    let store: Option<Arc<dyn KnowledgeStore>> = match &config.retrieval.database_url {
        Some(url) => match PgVectorStore::connect(url).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!(error = %e, "Knowledge store unreachable, running without retrieval");
                None
            }
        },
        None => {
            warn!("No database configured, running without retrieval");
            None
        }
    };
    let embedder_config = config.clone();
    let retriever = Arc::new(ContextRetriever::new(store, move || {
        asha_providers::embedder_from_config(&embedder_config)
    }));

    if let Some(path) = &config.tokenizer.file {
        asha_assistant::token::install_tokenizer(path);
    }

    GatewayState {
        config,
        completion,
        retriever,
        synthesizer,
        recognizer,
        capture,
    }
}

/// Startup health logging. Warns about degraded modes, never aborts.
async fn log_startup_diagnostics(state: &GatewayState) {
    if state.completion.is_none() {
        warn!("No completion API key set, replies will use retrieval fallback only");
    }
    if state.synthesizer.is_none() {
        warn!("No speech API key set, replies will be text-only");
    }
    let documents = state.retriever.document_count().await;
    if documents == 0 {
        warn!("Knowledge store is empty. Run: asha ingest <path>");
    } else {
        info!(documents, "Knowledge store ready");
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct StatusResponse {
    service: &'static str,
    version: &'static str,
    completion_configured: bool,
    speech_configured: bool,
    retrieval_documents: u64,
}

async fn status_handler(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "asha",
        version: env!("CARGO_PKG_VERSION"),
        completion_configured: state.completion.is_some(),
        speech_configured: state.synthesizer.is_some(),
        retrieval_documents: state.retriever.document_count().await,
    })
}

async fn ws_handler(State(state): State<SharedState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_session(state, socket))
}

/// Drive one connection: a writer task drains the handler's outbound
/// channel while this task feeds inbound frames to the handler, one at
/// a time in arrival order.
async fn run_session(state: SharedState, socket: WebSocket) {
    info!("Session connected");
    let (outbound_tx, mut outbound_rx) = mpsc::channel(32);
    let mut handler = SessionHandler::new(
        ContextAssembler::new(
            state.retriever.clone(),
            state.config.retrieval.top_k,
            state.config.retrieval.max_context_tokens,
        ),
        Generator::new(state.completion.clone()),
        state.synthesizer.clone(),
        state.recognizer.clone(),
        state.capture.clone(),
        outbound_tx,
    );

    let (mut sink, mut stream) = socket.split();
    let writer = tokio::spawn(async move {
        while let Some(notification) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&notification) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to serialize notification");
                    continue;
                }
            };
            if sink.send(WsMessage::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    handler.on_connect().await;
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => handler.handle_frame(&text).await,
            Ok(WsMessage::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    // Dropping the handler closes the outbound channel; the writer
    // drains what is left and exits.
    drop(handler);
    let _ = writer.await;
    info!("Session disconnected, state discarded");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_state() -> SharedState {
        let mut config = AppConfig::default();
        config.retrieval.database_url = None;
        Arc::new(build_state(config).await)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state().await);
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_reports_degraded_collaborators() {
        let app = build_router(test_state().await);
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "asha");
        assert_eq!(json["retrieval_documents"], 0);
    }
}
