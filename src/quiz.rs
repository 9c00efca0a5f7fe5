//! Rendering and grading of quiz questions over a module bank.
//!
//! Rendering never exposes which slot is correct; grading re-derives it from the coordinate.

use serde::Serialize;

use crate::domain::{QuizModule, QuizQuestion};
use crate::error::AppError;
use crate::placement::{arrange, correct_slot, is_correct_choice, SLOT_COUNT};

#[derive(Clone, Debug, Serialize)]
pub struct RenderedQuestion {
  pub module: usize,
  pub question: usize,
  pub module_title: String,
  pub prompt: String,
  pub options: [String; SLOT_COUNT],
}

#[derive(Clone, Debug, Serialize)]
pub struct GradeResult {
  pub correct: bool,
  pub chosen_slot: u8,
  pub correct_slot: u8,
  pub correct_answer: String,
  pub explanation: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ModuleGrade {
  pub module: usize,
  pub correct: usize,
  pub total: usize,
  pub percent: u8,
  pub results: Vec<GradeResult>,
}

fn lookup(bank: &[QuizModule], module: usize, question: usize) -> Result<(&QuizModule, &QuizQuestion), AppError> {
  let m = bank
    .get(module)
    .ok_or_else(|| AppError::NotFound(format!("module {}", module)))?;
  let q = m
    .questions
    .get(question)
    .ok_or_else(|| AppError::NotFound(format!("question {} in module {}", question, module)))?;
  Ok((m, q))
}

pub fn render(bank: &[QuizModule], module: usize, question: usize) -> Result<RenderedQuestion, AppError> {
  let (m, q) = lookup(bank, module, question)?;
  let options = arrange(&q.correct, &q.wrong, correct_slot(module, question))?;
  Ok(RenderedQuestion {
    module,
    question,
    module_title: m.title.clone(),
    prompt: q.prompt.clone(),
    options,
  })
}

pub fn grade(bank: &[QuizModule], module: usize, question: usize, chosen_slot: u8) -> Result<GradeResult, AppError> {
  let (_, q) = lookup(bank, module, question)?;
  let correct = is_correct_choice(module, question, chosen_slot)?;
  Ok(GradeResult {
    correct,
    chosen_slot,
    correct_slot: correct_slot(module, question),
    correct_answer: q.correct.clone(),
    explanation: q.explanation.clone(),
  })
}

/// Grade a full module. `answers[i]` is the slot chosen for question `i`; every question
/// must be answered.
pub fn grade_module(bank: &[QuizModule], module: usize, answers: &[u8]) -> Result<ModuleGrade, AppError> {
  let m = bank
    .get(module)
    .ok_or_else(|| AppError::NotFound(format!("module {}", module)))?;
  if answers.len() != m.questions.len() {
    return Err(AppError::InvalidInput(format!(
      "module {} has {} questions, got {} answers",
      module,
      m.questions.len(),
      answers.len()
    )));
  }

  let results = answers
    .iter()
    .enumerate()
    .map(|(qi, &slot)| grade(bank, module, qi, slot))
    .collect::<Result<Vec<_>, _>>()?;
  let correct = results.iter().filter(|r| r.correct).count();
  let total = results.len();
  let percent = if total == 0 { 0 } else { (correct as f64 * 100.0 / total as f64).round() as u8 };

  Ok(ModuleGrade { module, correct, total, percent, results })
}
