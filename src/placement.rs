//! Deterministic placement of the correct answer among four option slots.
//!
//! Slots are 1-based (1..=4). The same (module, question) coordinate always maps to the same
//! slot, so a grading pass can re-derive the key without consulting the rendering pass.

use crate::error::AppError;

pub const SLOT_COUNT: usize = 4;

const SLOT_PATTERNS: [[u8; SLOT_COUNT]; 6] = [
  [1, 2, 3, 4],
  [2, 3, 4, 1],
  [3, 4, 1, 2],
  [4, 1, 2, 3],
  [1, 3, 2, 4],
  [2, 4, 3, 1],
];

/// Which slot (1..=4) holds the correct answer for this coordinate.
pub fn correct_slot(module_index: usize, question_index: usize) -> u8 {
  SLOT_PATTERNS[module_index % SLOT_PATTERNS.len()][question_index % SLOT_COUNT]
}

fn check_slot(slot: u8) -> Result<usize, AppError> {
  if (1..=SLOT_COUNT as u8).contains(&slot) {
    Ok(usize::from(slot - 1))
  } else {
    Err(AppError::InvalidInput(format!("slot must be within 1..={}, got {}", SLOT_COUNT, slot)))
  }
}

/// Put `correct` at `slot` and fill the remaining positions left-to-right with `wrong`,
/// in the order given.
pub fn arrange(correct: &str, wrong: &[String], slot: u8) -> Result<[String; SLOT_COUNT], AppError> {
  if wrong.len() != SLOT_COUNT - 1 {
    return Err(AppError::InvalidInput(format!(
      "expected {} wrong options, got {}",
      SLOT_COUNT - 1,
      wrong.len()
    )));
  }
  let at = check_slot(slot)?;

  let mut distractors = wrong.iter();
  let mut out: [String; SLOT_COUNT] = Default::default();
  for (i, cell) in out.iter_mut().enumerate() {
    *cell = if i == at {
      correct.to_string()
    } else {
      // length checked above: exactly three distractors for three free cells
      distractors.next().cloned().unwrap_or_default()
    };
  }
  Ok(out)
}

/// Grade a chosen slot against the re-derived key.
pub fn is_correct_choice(module_index: usize, question_index: usize, chosen_slot: u8) -> Result<bool, AppError> {
  check_slot(chosen_slot)?;
  Ok(correct_slot(module_index, question_index) == chosen_slot)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn wrong() -> Vec<String> {
    vec!["w1".into(), "w2".into(), "w3".into()]
  }

  #[test]
  fn cycle_examples() {
    assert_eq!(correct_slot(0, 0), 1);
    assert_eq!(correct_slot(1, 0), 2);
    assert_eq!(correct_slot(4, 0), 1);
    assert_eq!(correct_slot(4, 1), 3);
    assert_eq!(correct_slot(6, 1), correct_slot(0, 1));
    assert_eq!(correct_slot(5, 7), 1);
  }

  #[test]
  fn deterministic_and_in_range() {
    for m in 0..30 {
      for q in 0..30 {
        let a = correct_slot(m, q);
        assert_eq!(a, correct_slot(m, q));
        assert!((1..=4).contains(&a));
      }
    }
    assert!((1..=4).contains(&correct_slot(usize::MAX, usize::MAX)));
  }

  #[test]
  fn arrange_puts_correct_at_slot_and_keeps_distractor_order() {
    for slot in 1..=4u8 {
      let out = arrange("right", &wrong(), slot).unwrap();
      assert_eq!(out[usize::from(slot - 1)], "right");
      let rest: Vec<&str> = out
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != usize::from(slot - 1))
        .map(|(_, s)| s.as_str())
        .collect();
      assert_eq!(rest, vec!["w1", "w2", "w3"]);
    }
  }

  #[test]
  fn arrange_rejects_bad_input() {
    assert!(matches!(arrange("r", &wrong(), 0), Err(AppError::InvalidInput(_))));
    assert!(matches!(arrange("r", &wrong(), 5), Err(AppError::InvalidInput(_))));
    assert!(matches!(arrange("r", &wrong()[..2], 1), Err(AppError::InvalidInput(_))));
    let four = vec!["a".to_string(), "b".into(), "c".into(), "d".into()];
    assert!(matches!(arrange("r", &four, 1), Err(AppError::InvalidInput(_))));
  }

  #[test]
  fn grading_rederives_key() {
    assert!(is_correct_choice(4, 1, 3).unwrap());
    assert!(!is_correct_choice(4, 1, 2).unwrap());
    assert!(is_correct_choice(4, 1, 9).is_err());
  }
}
