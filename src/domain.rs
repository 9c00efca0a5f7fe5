//! Domain models: course quiz modules and their multiple-choice questions.

use serde::{Deserialize, Serialize};

/// One multiple-choice question as authored: the correct answer plus three distractors.
/// Display order is not stored; it is derived from the question's coordinate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub prompt: String,
  pub correct: String,
  pub wrong: Vec<String>,
  #[serde(default)] pub explanation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizModule {
  pub title: String,
  #[serde(default)] pub summary: String,
  pub questions: Vec<QuizQuestion>,
}
