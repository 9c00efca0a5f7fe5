//! Assessment report assembly and content hashing for on-chain attestation.
//!
//! The ledger submission itself lives outside this service; what we hand out is the
//! canonical text, its hash and the score a submitting script needs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::canonical::{canonicalize, content_hash, hash_text};
use crate::error::AppError;
use crate::scoring::{breakdown, readiness_band, score_from_breakdown, PillarContribution, ReadinessBand};

pub const REPORT_VERSION: &str = "cri-report.v1";

#[derive(Clone, Debug, Serialize)]
pub struct AssessmentReport {
  pub report_version: &'static str,
  pub subject: String,
  pub levels: Vec<u8>,
  pub pillars: Vec<PillarContribution>,
  pub cri_score: u8,
  pub band: ReadinessBand,
  pub issued_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AttestationPayload {
  pub content_hash: String,
  pub cri_score: u8,
  pub canonical_json: String,
}

pub fn build_report(subject: &str, levels: &[i64], issued_at: DateTime<Utc>) -> Result<AssessmentReport, AppError> {
  if subject.trim().is_empty() {
    return Err(AppError::InvalidInput("subject must not be empty".into()));
  }
  let pillars = breakdown(levels)?;
  let cri_score = score_from_breakdown(&pillars);
  Ok(AssessmentReport {
    report_version: REPORT_VERSION,
    subject: subject.trim().to_string(),
    levels: pillars.iter().map(|c| c.level).collect(),
    pillars,
    cri_score,
    band: readiness_band(cri_score),
    issued_at: issued_at.to_rfc3339_opts(SecondsFormat::Secs, true),
  })
}

#[instrument(level = "debug", skip(report), fields(subject = %report.subject, cri = report.cri_score))]
pub fn attest(report: &AssessmentReport) -> Result<AttestationPayload, AppError> {
  let value = serde_json::to_value(report)?;
  let canonical_json = serde_json::to_string(&canonicalize(&value))?;
  let content_hash = hash_text(&canonical_json);
  debug!(target: "attestation", %content_hash, bytes = canonical_json.len(), "Report hashed");
  Ok(AttestationPayload { content_hash, cri_score: report.cri_score, canonical_json })
}

/// Recompute the hash of an arbitrary report document and compare it to `expected`.
pub fn verify(report: &Value, expected: &str) -> Result<bool, AppError> {
  let actual = content_hash(report)?;
  Ok(actual.eq_ignore_ascii_case(expected.trim()))
}
