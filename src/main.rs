//! Academy · Web3 learning platform backend
//!
//! - Axum HTTP + WebSocket API
//! - Course quizzes with deterministic answer placement
//! - Pillar-weighted readiness scoring and canonical report hashing for attestation
//! - Optional OpenAI integration for the skill questionnaire (via environment variables)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   OPENAI_API_KEY      : enables OpenAI integration if present
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_MODEL        : default "gpt-4o-mini"
//!   ACADEMY_CONFIG_PATH : path to TOML config (prompts + optional quiz bank)
//!   ACADEMY_MAX_REPORTS : report store capacity, oldest evicted first (default 10000)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod seeds;
mod scoring;
mod placement;
mod canonical;
mod quiz;
mod attestation;
mod state;
mod protocol;
mod logic;
mod openai;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (quiz bank, report store, OpenAI client, prompts).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "academy_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "academy_backend", error = %e, "Failed to listen for shutdown signal");
    return;
  }
  info!(target: "academy_backend", "Shutdown signal received");
}
