//! Thin HTTP layer over the ask engine.
//!
//! The server owns no retrieval logic — it parses the request, delegates to
//! [`AskEngine`], and maps error kinds to status codes. The corpus is loaded
//! exactly once before the listener starts accepting requests; afterwards the
//! engine is shared read-only across handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ask` | Answer a question: `{"question": "..."}` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `generation_error` (502), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::engine::AskEngine;
use crate::error::AskError;
use crate::models::Answer;

/// Start the HTTP server.
///
/// Loads the corpus, builds the engine, binds to `[server].bind`, and serves
/// until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let corpus = Corpus::load(&config.corpus).await?;
    println!("Loaded corpus: {} documents", corpus.len());

    let engine = AskEngine::new(corpus, config)?;
    run_server_with_engine(config, Arc::new(engine)).await
}

/// Serve an already-constructed engine.
///
/// Useful for embedders that load the corpus themselves; `run_server` is the
/// standard entry point used by `ask serve`.
pub async fn run_server_with_engine(
    config: &Config,
    engine: Arc<AskEngine>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(engine);

    println!("ask-author listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router with CORS open to any origin.
pub fn router(engine: Arc<AskEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(handle_ask))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(engine)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Map engine errors to distinct codes: a failed hosted generation is the
/// upstream's fault (502), anything else is ours (500).
fn classify_engine_error(err: AskError) -> AppError {
    match err {
        AskError::Generation(msg) => AppError {
            status: StatusCode::BAD_GATEWAY,
            code: "generation_error".to_string(),
            message: msg,
        },
        other => AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: other.to_string(),
        },
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /ask ============

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
}

/// Handler for `POST /ask`.
///
/// Rejects empty questions before the engine is invoked; everything else is
/// delegated. A query matching nothing is a normal 200 with the fixed
/// no-relevant-content answer, never an error.
async fn handle_ask(
    State(engine): State<Arc<AskEngine>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<Answer>, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(bad_request("question must not be empty"));
    }

    let answer = engine
        .answer_question(question)
        .await
        .map_err(classify_engine_error)?;

    Ok(Json(answer))
}
