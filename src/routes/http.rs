//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures surface as `AppError` responses.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, openai: state.openai.is_some() })
}

#[instrument(level = "info")]
pub async fn http_get_pillars() -> impl IntoResponse { Json(pillar_table()) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_modules(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let out: Vec<ModuleSummaryOut> = state
    .modules
    .iter()
    .enumerate()
    .map(|(index, m)| ModuleSummaryOut {
      index,
      title: m.title.clone(),
      summary: m.summary.clone(),
      questions: m.questions.len(),
    })
    .collect();
  Json(out)
}

#[instrument(level = "info", skip(state), fields(module = q.module, question = q.question))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> Result<Json<crate::quiz::RenderedQuestion>, AppError> {
  let r = render_question(&state, q.module, q.question)?;
  info!(target: "quiz", module = q.module, question = q.question, "HTTP question served");
  Ok(Json(r))
}

#[instrument(level = "info", skip(state, body), fields(module = body.module, question = body.question))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, AppError> {
  Ok(Json(grade_answer(&state, body.module, body.question, body.slot)?))
}

#[instrument(level = "info", skip(state, body), fields(module = body.module, answers = body.answers.len()))]
pub async fn http_post_grade_module(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ModuleAnswersIn>,
) -> Result<Json<ModuleGradeOut>, AppError> {
  Ok(Json(grade_whole_module(&state, body.module, &body.answers)?))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_score(Json(body): Json<ScoreIn>) -> Result<Json<ScoreOut>, AppError> {
  Ok(Json(score_levels(&body.levels)?))
}

#[instrument(level = "info", skip(state, body), fields(subject = %body.subject, answers = body.answers.len()))]
pub async fn http_post_assessment(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AssessmentIn>,
) -> Result<Json<AssessmentOut>, AppError> {
  let (report, attestation, origin) = run_assessment(&state, &body.subject, &body.answers).await?;
  Ok(Json(AssessmentOut { origin, report, attestation }))
}

#[instrument(level = "info", skip(state), fields(%hash))]
pub async fn http_get_report(
  State(state): State<Arc<AppState>>,
  Path(hash): Path<String>,
) -> Result<Json<Value>, AppError> {
  Ok(Json(fetch_report(&state, &hash).await?))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_canonicalize(Json(body): Json<Value>) -> Result<Json<CanonicalOut>, AppError> {
  let out = canonicalize_document(&body)?;
  info!(target: "attestation", hash = %out.content_hash, "HTTP canonicalize");
  Ok(Json(out))
}

#[instrument(level = "info", skip(body), fields(hash = %body.content_hash))]
pub async fn http_post_verify(Json(body): Json<VerifyIn>) -> Result<Json<VerifyOut>, AppError> {
  Ok(Json(VerifyOut { valid: verify_report(&body.report, &body.content_hash)? }))
}
