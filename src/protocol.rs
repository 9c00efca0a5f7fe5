//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attestation::{AssessmentReport, AttestationPayload};
use crate::quiz::{GradeResult, ModuleGrade, RenderedQuestion};
use crate::scoring::{PillarContribution, ReadinessBand};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Question {
        module: usize,
        question: usize,
    },
    Answer {
        module: usize,
        question: usize,
        slot: u8,
    },
    Score {
        levels: Vec<i64>,
    },
    Canonicalize {
        value: Value,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong {
        session: String,
    },
    Question {
        question: RenderedQuestion,
    },
    AnswerResult {
        result: GradeResult,
    },
    Score {
        #[serde(flatten)]
        score: ScoreOut,
    },
    Canonical {
        #[serde(flatten)]
        canonical: CanonicalOut,
    },
    Error {
        kind: String,
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Serialize)]
pub struct ScoreOut {
    pub score: u8,
    pub band: ReadinessBand,
    pub breakdown: Vec<PillarContribution>,
}

#[derive(Debug, Serialize)]
pub struct CanonicalOut {
    pub canonical: Value,
    pub content_hash: String,
}

#[derive(Debug, Serialize)]
pub struct ModuleSummaryOut {
    pub index: usize,
    pub title: String,
    pub summary: String,
    pub questions: usize,
}

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub module: usize,
    pub question: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub module: usize,
    pub question: usize,
    pub slot: u8,
}

#[derive(Debug, Deserialize)]
pub struct ModuleAnswersIn {
    pub module: usize,
    pub answers: Vec<u8>,
}

pub type AnswerOut = GradeResult;
pub type ModuleGradeOut = ModuleGrade;

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    pub levels: Vec<i64>,
}

#[derive(Deserialize)]
pub struct AssessmentIn {
    pub subject: String,
    pub answers: Vec<String>,
}
#[derive(Serialize)]
pub struct AssessmentOut {
    pub origin: &'static str,
    pub report: AssessmentReport,
    pub attestation: AttestationPayload,
}

#[derive(Deserialize)]
pub struct VerifyIn {
    pub report: Value,
    pub content_hash: String,
}
#[derive(Serialize)]
pub struct VerifyOut {
    pub valid: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub openai: bool,
}
