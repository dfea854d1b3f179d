//! HTTP server for conversation emotion analysis.
//!
//! Exposes the analysis pipeline over a small JSON API on localhost:
//!
//! - `POST /analyze-chat` — analyze a list of chat messages
//! - `GET /` — liveness probe
//! - `GET /health/model` — model and device info for diagnostics

use crate::analysis::{TimelineItem, analyze_conversation};
use crate::classifier::EmotionClassifier;
use crate::config::{AnalysisConfig, EngineConfig};
use crate::error::{EngineError, Result};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /analyze-chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Messages to analyze, in conversation order.
    pub messages: Vec<String>,
}

/// Response body for `POST /analyze-chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Per-message results in input order.
    pub timeline: Vec<TimelineItem>,
    /// Natural-language summary of the dominant emotions.
    pub summary: String,
    /// Natural-language start → middle → end arc.
    pub emotional_trend: String,
    /// Wall-clock analysis duration in milliseconds.
    pub processing_time_ms: f64,
    /// Occurrence count per distinct label, sentinels included.
    pub emotion_distribution: HashMap<String, usize>,
}

/// Error body: `{ "detail": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable reason for the failure.
    pub detail: String,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootStatus {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Human-readable status line.
    pub message: String,
}

/// Response body for `GET /health/model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHealth {
    /// Identifier of the loaded checkpoint.
    pub model_name: String,
    /// Compute device the model runs on.
    pub device: String,
    /// Number of labels in the model's label set.
    pub num_labels: usize,
    /// Whether the model finished loading (always true once serving).
    pub loaded: bool,
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Classifier loaded once at startup, read-only afterwards.
    classifier: Arc<dyn EmotionClassifier>,
    /// Per-request analysis limits and thresholds.
    analysis: AnalysisConfig,
}

impl AppState {
    /// Build handler state from a loaded classifier and config.
    pub fn new(classifier: Arc<dyn EmotionClassifier>, analysis: AnalysisConfig) -> Self {
        Self {
            classifier,
            analysis,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisServer
// ---------------------------------------------------------------------------

/// HTTP server backed by a shared emotion classifier.
pub struct AnalysisServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl AnalysisServer {
    /// Start the analysis HTTP server.
    ///
    /// Binds to `{config.server.host}:{config.server.port}` (port `0`
    /// auto-assigns) and serves in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(
        classifier: Arc<dyn EmotionClassifier>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let state = AppState::new(classifier, config.analysis.clone());
        let app = build_router(state);

        let listener = TcpListener::bind(config.server.bind_addr())
            .await
            .map_err(|e| EngineError::Server(format!("bind failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| EngineError::Server(format!("failed to get local addr: {e}")))?;

        info!("empathy engine listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("analysis server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for AnalysisServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Create the application router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    // Browser clients call this API directly; allow any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health/model", get(handle_model_health))
        .route("/analyze-chat", post(handle_analyze_chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a request before any analysis runs.
///
/// Limits apply to the trimmed length of each message; the original
/// (untrimmed) text is what gets analyzed. A violated request is rejected
/// whole — no partial processing.
pub fn validate_request(
    config: &AnalysisConfig,
    messages: &[String],
) -> std::result::Result<(), String> {
    if messages.is_empty() {
        return Err("At least one message is required.".to_owned());
    }
    if messages.len() > config.max_messages {
        return Err(format!(
            "Too many messages: {} (maximum {}).",
            messages.len(),
            config.max_messages
        ));
    }
    for (i, message) in messages.iter().enumerate() {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(format!("Message at index {i} is empty."));
        }
        if trimmed.chars().count() > config.max_message_chars {
            return Err(format!(
                "Message at index {i} exceeds {} characters.",
                config.max_message_chars
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /` — liveness probe.
async fn handle_root() -> Json<RootStatus> {
    Json(RootStatus {
        status: "ok".to_owned(),
        message: "Empathy Engine backend is running.".to_owned(),
    })
}

/// `GET /health/model` — model and device info for diagnostics.
async fn handle_model_health(State(state): State<AppState>) -> Json<ModelHealth> {
    Json(ModelHealth {
        model_name: state.classifier.model_id().to_owned(),
        device: state.classifier.device().to_owned(),
        num_labels: state.classifier.num_labels(),
        loaded: true,
    })
}

/// `POST /analyze-chat` — analyze a list of chat messages.
async fn handle_analyze_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> axum::response::Response {
    match run_analysis(&state, &request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err((status, detail)) => (status, Json(ErrorDetail { detail })).into_response(),
    }
}

/// Validate, analyze, and assemble the response for one request.
///
/// Classification is synchronous ONNX work, so the pipeline runs inside
/// `block_in_place` to keep the worker thread from starving the runtime.
fn run_analysis(
    state: &AppState,
    request: &ChatRequest,
) -> std::result::Result<AnalyzeResponse, (StatusCode, String)> {
    if let Err(reason) = validate_request(&state.analysis, &request.messages) {
        return Err((StatusCode::BAD_REQUEST, reason));
    }

    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let report = tokio::task::block_in_place(|| {
        analyze_conversation(state.classifier.as_ref(), &state.analysis, &request.messages)
    })
    .map_err(|e| {
        error!(%request_id, "unexpected error during analysis: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred during emotion analysis.".to_owned(),
        )
    })?;

    let processing_time_ms = round2(start.elapsed().as_secs_f64() * 1000.0);
    info!(
        %request_id,
        messages = request.messages.len(),
        elapsed_ms = processing_time_ms,
        "analysis complete"
    );

    Ok(AnalyzeResponse {
        timeline: report.timeline,
        summary: report.summary,
        emotional_trend: report.emotional_trend,
        processing_time_ms,
        emotion_distribution: report.emotion_distribution,
    })
}

/// Round a duration to 2 decimal places.
fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
