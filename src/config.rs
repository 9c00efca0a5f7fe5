//! Loading service configuration (prompts + optional quiz bank) from TOML.
//!
//! See `AcademyConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::QuizModule;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AcademyConfig {
  #[serde(default)]
  pub prompts: Prompts,
  /// Replaces the built-in modules when non-empty. Order matters: a module's position is
  /// part of every question coordinate and so decides its answer slots.
  #[serde(default)]
  pub modules: Vec<QuizModule>,
}

/// Prompts used by the OpenAI client for the skill questionnaire.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub assessment_system: String,
  pub assessment_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      assessment_system: "You are a Web3 project readiness assessor. Respond ONLY with strict JSON.".into(),
      assessment_user_template: "Rate the project on each of these pillars, in order: {pillars}.\n\
        Use maturity levels 0 (absent) to 4 (leading practice).\n\
        Questionnaire answers, one per pillar in the same order:\n{answers}\n\n\
        Return JSON {\"levels\": [8 integers 0-4], \"rationale\": string}.".into(),
    }
  }
}

pub fn parse_config(s: &str) -> Result<AcademyConfig, toml::de::Error> {
  toml::from_str::<AcademyConfig>(s)
}

/// Attempt to load `AcademyConfig` from ACADEMY_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AcademyConfig> {
  let path = std::env::var("ACADEMY_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "academy_backend", %path, modules = cfg.modules.len(), "Loaded academy config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "academy_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "academy_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse_config("").unwrap();
    assert!(cfg.modules.is_empty());
    assert!(cfg.prompts.assessment_user_template.contains("{answers}"));
  }

  #[test]
  fn parses_modules_and_partial_prompts() {
    let cfg = parse_config(
      r#"
[prompts]
assessment_system = "custom"

[[modules]]
title = "Intro"

[[modules.questions]]
prompt = "2 + 2?"
correct = "4"
wrong = ["3", "5", "22"]
"#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.assessment_system, "custom");
    assert!(!cfg.prompts.assessment_user_template.is_empty());
    assert_eq!(cfg.modules.len(), 1);
    assert_eq!(cfg.modules[0].questions[0].wrong.len(), 3);
    assert_eq!(cfg.modules[0].questions[0].explanation, "");
  }
}
