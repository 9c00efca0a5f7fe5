//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/pillars", get(http::http_get_pillars))
        .route("/api/v1/modules", get(http::http_get_modules))
        .route("/api/v1/quiz/question", get(http::http_get_question))
        .route("/api/v1/quiz/answer", post(http::http_post_answer))
        .route("/api/v1/quiz/grade", post(http::http_post_grade_module))
        .route("/api/v1/score", post(http::http_post_score))
        .route("/api/v1/assessment", post(http::http_post_assessment))
        .route("/api/v1/report/:hash", get(http::http_get_report))
        .route("/api/v1/canonicalize", post(http::http_post_canonicalize))
        .route("/api/v1/verify", post(http::http_post_verify))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
