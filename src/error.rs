//! Error type shared by the scoring/placement/canonical core and the HTTP layer.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Kept for completeness of the taxonomy: `serde_json::Value` is an owned tree and cannot
  /// contain cycles, so nothing in this crate constructs it.
  #[allow(dead_code)]
  #[error("cyclic input")]
  CyclicInput,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("upstream error: {0}")]
  Upstream(String),

  #[error("serialization error: {0}")]
  Serialization(String),
}

impl AppError {
  pub fn kind(&self) -> &'static str {
    match self {
      AppError::InvalidInput(_) => "invalid_input",
      AppError::CyclicInput => "cyclic_input",
      AppError::NotFound(_) => "not_found",
      AppError::Upstream(_) => "upstream",
      AppError::Serialization(_) => "serialization",
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      AppError::InvalidInput(_) | AppError::CyclicInput => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
      AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<serde_json::Error> for AppError {
  fn from(e: serde_json::Error) -> Self {
    AppError::Serialization(e.to_string())
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> axum::response::Response {
    let body = serde_json::json!({ "error": self.kind(), "message": self.to_string() });
    (self.status(), Json(body)).into_response()
  }
}
