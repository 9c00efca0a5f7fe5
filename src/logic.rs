//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Rendering and grading quiz questions
//!   - Scoring pillar level vectors
//!   - The skill questionnaire (OpenAI or local heuristic) feeding report attestation
//!   - Canonicalization/verification helpers for clients

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::attestation::{attest, build_report, verify, AssessmentReport, AttestationPayload};
use crate::canonical::{canonicalize, hash_text};
use crate::error::AppError;
use crate::protocol::{CanonicalOut, ScoreOut};
use crate::quiz::{grade, grade_module, render, GradeResult, ModuleGrade, RenderedQuestion};
use crate::scoring::{breakdown, readiness_band, score, MAX_LEVEL, PILLARS, PILLAR_COUNT};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub fn render_question(state: &AppState, module: usize, question: usize) -> Result<RenderedQuestion, AppError> {
  render(&state.modules, module, question)
}

#[instrument(level = "info", skip(state))]
pub fn grade_answer(state: &AppState, module: usize, question: usize, slot: u8) -> Result<GradeResult, AppError> {
  let r = grade(&state.modules, module, question, slot)?;
  info!(target: "quiz", module, question, slot, correct = r.correct, "Answer graded");
  Ok(r)
}

#[instrument(level = "info", skip(state, answers), fields(answers = answers.len()))]
pub fn grade_whole_module(state: &AppState, module: usize, answers: &[u8]) -> Result<ModuleGrade, AppError> {
  let g = grade_module(&state.modules, module, answers)?;
  info!(target: "quiz", module, correct = g.correct, total = g.total, percent = g.percent, "Module graded");
  Ok(g)
}

#[instrument(level = "info", skip(levels), fields(levels = ?levels))]
pub fn score_levels(levels: &[i64]) -> Result<ScoreOut, AppError> {
  let s = score(levels)?;
  Ok(ScoreOut { score: s, band: readiness_band(s), breakdown: breakdown(levels)? })
}

/// Run the skill questionnaire: levels from OpenAI when available (falling back to the local
/// heuristic on transport failure), then build, attest and store the report.
///
/// Model output that fails validation is an error, never clamped into range.
#[instrument(level = "info", skip(state, answers), fields(%subject, answers = answers.len()))]
pub async fn run_assessment(
  state: &AppState,
  subject: &str,
  answers: &[String],
) -> Result<(AssessmentReport, AttestationPayload, &'static str), AppError> {
  if subject.trim().is_empty() {
    return Err(AppError::InvalidInput("subject must not be empty".into()));
  }
  if answers.len() != PILLAR_COUNT {
    return Err(AppError::InvalidInput(format!(
      "expected {} questionnaire answers, got {}",
      PILLAR_COUNT,
      answers.len()
    )));
  }

  let (levels, origin) = match &state.openai {
    Some(oa) => match oa.assess_levels(&state.prompts, answers).await {
      Ok(a) => (a.levels, "openai"),
      Err(e) => {
        error!(target: "assessment", error = %e, "OpenAI assessment failed; using local heuristic.");
        (local_levels(answers), "local")
      }
    },
    None => (local_levels(answers), "local"),
  };

  let report = build_report(subject, &levels, Utc::now()).map_err(|e| match (origin, e) {
    ("openai", AppError::InvalidInput(msg)) => AppError::Upstream(format!("model returned unusable levels: {}", msg)),
    (_, e) => e,
  })?;
  let payload = attest(&report)?;
  state.store_report(&payload.content_hash, serde_json::to_value(&report)?).await;

  info!(target: "assessment", %subject, %origin, cri = report.cri_score, hash = %payload.content_hash, "Assessment attested");
  Ok((report, payload, origin))
}

const PILLAR_KEYWORDS: [&[&str]; PILLAR_COUNT] = [
  &["audit", "bug bounty", "multisig", "formal verification", "pentest"],
  &["throughput", "tps", "layer 2", "rollup", "load test", "sharding"],
  &["dao", "vote", "proposal", "timelock", "governance"],
  &["supply", "vesting", "emission", "burn", "treasury"],
  &["kyc", "aml", "legal", "license", "regulat"],
  &["bridge", "cross-chain", "standard", "erc", "oracle"],
  &["sdk", "docs", "documentation", "testnet", "api"],
  &["discord", "community", "grants", "ambassador", "ecosystem"],
];

/// Offline estimate: one level for a substantive answer, one for a detailed one, and up to
/// two for pillar keywords. Always within 0..=4.
pub fn local_levels(answers: &[String]) -> Vec<i64> {
  answers
    .iter()
    .zip(PILLAR_KEYWORDS.iter())
    .map(|(a, keywords)| {
      let text = a.to_lowercase();
      let words = text.split_whitespace().count();
      let mut level = 0i64;
      if words >= 5 { level += 1; }
      if words >= 25 { level += 1; }
      let hits = keywords.iter().filter(|k| text.contains(*k)).count() as i64;
      level += hits.min(2);
      level.min(MAX_LEVEL)
    })
    .collect()
}

#[instrument(level = "debug", skip(value))]
pub fn canonicalize_document(value: &Value) -> Result<CanonicalOut, AppError> {
  let canonical = canonicalize(value);
  let content_hash = hash_text(&serde_json::to_string(&canonical)?);
  Ok(CanonicalOut { canonical, content_hash })
}

#[instrument(level = "info", skip(report))]
pub fn verify_report(report: &Value, expected_hash: &str) -> Result<bool, AppError> {
  let valid = verify(report, expected_hash)?;
  if !valid {
    warn!(target: "attestation", %expected_hash, "Report does not match the claimed hash");
  }
  Ok(valid)
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_report(state: &AppState, content_hash: &str) -> Result<Value, AppError> {
  state
    .get_report(content_hash)
    .await
    .ok_or_else(|| AppError::NotFound(format!("report {}", content_hash)))
}

pub fn pillar_table() -> Value {
  serde_json::to_value(PILLARS).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Prompts;
  use crate::openai::OpenAI;
  use crate::seeds::seed_modules;
  use axum::{routing::post, Json, Router};
  use serde_json::json;
  use tokio::net::TcpListener;

  fn offline_state() -> AppState {
    AppState::with_parts(seed_modules(), Prompts::default(), None)
  }

  fn answers() -> Vec<String> {
    vec![
      "Two external audits, a bug bounty and a multisig on admin keys, all documented publicly for users.".into(),
      "We run on a rollup.".into(),
      "".into(),
      "Fixed supply with four year vesting for the team and a quarterly burn from treasury revenue.".into(),
      "KYC for the token sale handled by a licensed provider.".into(),
      "none yet".into(),
      "SDK and docs are public and a testnet faucet is available to everyone.".into(),
      "Active Discord community with a grants program for ecosystem builders.".into(),
    ]
  }

  #[test]
  fn local_levels_are_in_range_and_reward_detail() {
    let lv = local_levels(&answers());
    assert_eq!(lv.len(), 8);
    assert!(lv.iter().all(|l| (0..=4).contains(l)));
    assert_eq!(lv[2], 0);
    assert!(lv[0] >= 3);
    assert!(score(&lv).is_ok());
  }

  #[tokio::test]
  async fn assessment_attests_and_stores_report() {
    let state = offline_state();
    let (report, payload, origin) = run_assessment(&state, "0xproject", &answers()).await.unwrap();
    assert_eq!(origin, "local");
    assert_eq!(payload.cri_score, report.cri_score);

    let stored = fetch_report(&state, &payload.content_hash.to_uppercase().replace("0X", "0x")).await.unwrap();
    assert!(verify_report(&stored, &payload.content_hash).unwrap());
  }

  #[tokio::test]
  async fn assessment_rejects_wrong_answer_count() {
    let state = offline_state();
    let err = run_assessment(&state, "s", &answers()[..3]).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
  }

  #[tokio::test]
  async fn unknown_report_is_not_found() {
    let state = offline_state();
    assert!(matches!(fetch_report(&state, "0xdead").await, Err(AppError::NotFound(_))));
  }

  #[test]
  fn score_out_matches_core() {
    let out = score_levels(&[2; 8]).unwrap();
    assert_eq!(out.score, 50);
    assert_eq!(out.breakdown.len(), 8);
    assert!(score_levels(&[9; 8]).is_err());
  }

  #[test]
  fn canonical_document_hash_matches_example() {
    let a: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
    let out = canonicalize_document(&a).unwrap();
    assert_eq!(serde_json::to_string(&out.canonical).unwrap(), r#"{"a":1,"b":2}"#);
    assert_eq!(out.content_hash, crate::canonical::hash_text(r#"{"a":1,"b":2}"#));
    assert_eq!(out.content_hash, crate::canonical::content_hash(&a).unwrap());
  }

  #[test]
  fn pillar_table_serializes() {
    let t = pillar_table();
    assert_eq!(t.as_array().map(|a| a.len()), Some(8));
    assert_eq!(t[0]["weight"], 20);
  }

  /// Serve a fixed chat completion whose content is `{"levels": levels}`.
  async fn chat_server(levels: Vec<i64>) -> String {
    let content = json!({ "levels": levels, "rationale": "fixed" }).to_string();
    let body = json!({ "choices": [{ "message": { "content": content } }] });
    let app = Router::new().route("/chat/completions", post(move || {
      let body = body.clone();
      async move { Json(body) }
    }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
  }

  fn state_with_model(base_url: String) -> AppState {
    let oa = OpenAI {
      client: reqwest::Client::new(),
      api_key: "test-key".into(),
      base_url,
      model: "test-model".into(),
    };
    AppState::with_parts(seed_modules(), Prompts::default(), Some(oa))
  }

  #[tokio::test]
  async fn model_levels_are_used_when_valid() {
    let state = state_with_model(chat_server(vec![4; 8]).await);
    let (report, payload, origin) = run_assessment(&state, "0xproject", &answers()).await.unwrap();
    assert_eq!(origin, "openai");
    assert_eq!(report.cri_score, 100);
    assert!(fetch_report(&state, &payload.content_hash).await.is_ok());
  }

  #[tokio::test]
  async fn out_of_range_model_levels_are_upstream_errors() {
    let state = state_with_model(chat_server(vec![9, 0, 0, 0, 0, 0, 0, 0]).await);
    let err = run_assessment(&state, "0xproject", &answers()).await.unwrap_err();
    assert!(matches!(&err, AppError::Upstream(msg) if msg.contains("got 9")), "{:?}", err);
    assert_eq!(state.reports.read().await.len(), 0);

    let state = state_with_model(chat_server(vec![2; 5]).await);
    let err = run_assessment(&state, "0xproject", &answers()).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
  }

  #[tokio::test]
  async fn unreachable_model_falls_back_to_local() {
    // Bind then drop to get a port with nothing listening.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let state = state_with_model(format!("http://{}", addr));
    let (report, _, origin) = run_assessment(&state, "0xproject", &answers()).await.unwrap();
    assert_eq!(origin, "local");
    assert_eq!(report.cri_score, score(&local_levels(&answers())).unwrap());
  }
}
