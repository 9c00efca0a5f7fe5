//! Compliance Readiness Index (CRI): eight weighted pillars, each assessed at a maturity
//! level 0..=4, folded into a single 0..=100 percentage.
//!
//! Level vectors are positional: index `i` is the level of `PILLARS[i]`.

use serde::Serialize;

use crate::error::AppError;

pub const PILLAR_COUNT: usize = 8;
pub const MAX_LEVEL: i64 = 4;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PillarWeight {
  pub name: &'static str,
  pub weight: u8,
}

pub const PILLARS: [PillarWeight; PILLAR_COUNT] = [
  PillarWeight { name: "Protocol/Security", weight: 20 },
  PillarWeight { name: "Scalability/Performance", weight: 15 },
  PillarWeight { name: "Governance", weight: 10 },
  PillarWeight { name: "Tokenomics", weight: 10 },
  PillarWeight { name: "Compliance/Legal", weight: 15 },
  PillarWeight { name: "Interoperability", weight: 10 },
  PillarWeight { name: "Developer Experience", weight: 10 },
  PillarWeight { name: "Community/Ecosystem", weight: 10 },
];

/// One pillar's share of the overall score, before rounding.
#[derive(Clone, Debug, Serialize)]
pub struct PillarContribution {
  pub name: &'static str,
  pub weight: u8,
  pub level: u8,
  pub contribution: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
  Nascent,
  Developing,
  Established,
  Leading,
}

fn validate(levels: &[i64]) -> Result<[u8; PILLAR_COUNT], AppError> {
  if levels.len() != PILLAR_COUNT {
    return Err(AppError::InvalidInput(format!(
      "expected {} pillar levels, got {}",
      PILLAR_COUNT,
      levels.len()
    )));
  }
  let mut out = [0u8; PILLAR_COUNT];
  for (i, &lvl) in levels.iter().enumerate() {
    if !(0..=MAX_LEVEL).contains(&lvl) {
      return Err(AppError::InvalidInput(format!(
        "level for pillar '{}' must be within 0..={}, got {}",
        PILLARS[i].name, MAX_LEVEL, lvl
      )));
    }
    out[i] = lvl as u8;
  }
  Ok(out)
}

/// Per-pillar contributions, in pillar order.
pub fn breakdown(levels: &[i64]) -> Result<Vec<PillarContribution>, AppError> {
  let levels = validate(levels)?;
  Ok(
    PILLARS
      .iter()
      .zip(levels.iter())
      .map(|(p, &lvl)| PillarContribution {
        name: p.name,
        weight: p.weight,
        level: lvl,
        contribution: f64::from(p.weight) * (f64::from(lvl) / MAX_LEVEL as f64),
      })
      .collect(),
  )
}

/// Fold contributions into the CRI percentage. Only the final sum is rounded, half away from zero.
pub fn score_from_breakdown(parts: &[PillarContribution]) -> u8 {
  let total: f64 = parts.iter().map(|c| c.contribution).sum();
  total.round() as u8
}

/// Weighted CRI percentage for a level vector.
pub fn score(levels: &[i64]) -> Result<u8, AppError> {
  Ok(score_from_breakdown(&breakdown(levels)?))
}

pub fn readiness_band(score: u8) -> ReadinessBand {
  match score {
    0..=24 => ReadinessBand::Nascent,
    25..=49 => ReadinessBand::Developing,
    50..=74 => ReadinessBand::Established,
    _ => ReadinessBand::Leading,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weights_cover_one_hundred() {
    assert_eq!(PILLARS.len(), 8);
    let total: u32 = PILLARS.iter().map(|p| u32::from(p.weight)).sum();
    assert_eq!(total, 100);
  }

  #[test]
  fn reference_vectors() {
    assert_eq!(score(&[4; 8]).unwrap(), 100);
    assert_eq!(score(&[0; 8]).unwrap(), 0);
    assert_eq!(score(&[2; 8]).unwrap(), 50);
  }

  #[test]
  fn only_the_sum_is_rounded() {
    // 2.5 + 2.5 = 5; rounding per term would give 3 + 3.
    assert_eq!(score(&[0, 0, 1, 1, 0, 0, 0, 0]).unwrap(), 5);
    // 15*0.25 twice = 7.5, half away from zero.
    assert_eq!(score(&[0, 1, 0, 0, 1, 0, 0, 0]).unwrap(), 8);
    // 2.5 alone.
    assert_eq!(score(&[0, 0, 1, 0, 0, 0, 0, 0]).unwrap(), 3);
  }

  #[test]
  fn bounded_and_monotonic_over_single_steps() {
    let bases: [[i64; 8]; 4] = [[0; 8], [2; 8], [1, 3, 0, 4, 2, 1, 0, 3], [4, 0, 4, 0, 4, 0, 4, 0]];
    for base in bases {
      for i in 0..PILLAR_COUNT {
        let mut prev = None;
        for lvl in 0..=MAX_LEVEL {
          let mut v = base;
          v[i] = lvl;
          let s = score(&v).unwrap();
          assert!(s <= 100);
          if let Some(p) = prev {
            assert!(s >= p, "pillar {} level {} decreased score", i, lvl);
          }
          prev = Some(s);
        }
      }
    }
  }

  #[test]
  fn rejects_wrong_length() {
    assert!(matches!(score(&[4; 7]), Err(AppError::InvalidInput(_))));
    assert!(matches!(score(&[4; 9]), Err(AppError::InvalidInput(_))));
    assert!(matches!(score(&[]), Err(AppError::InvalidInput(_))));
  }

  #[test]
  fn rejects_out_of_range_levels() {
    assert!(matches!(score(&[5, 0, 0, 0, 0, 0, 0, 0]), Err(AppError::InvalidInput(_))));
    assert!(matches!(score(&[0, 0, 0, -1, 0, 0, 0, 0]), Err(AppError::InvalidInput(_))));
  }

  #[test]
  fn breakdown_sums_to_score() {
    let levels = [3, 2, 1, 4, 0, 2, 3, 1];
    let parts = breakdown(&levels).unwrap();
    assert_eq!(parts.len(), 8);
    assert_eq!(parts[0].name, "Protocol/Security");
    assert_eq!(parts[0].contribution, 15.0);
    assert_eq!(score_from_breakdown(&parts), score(&levels).unwrap());
  }

  #[test]
  fn bands() {
    assert_eq!(readiness_band(0), ReadinessBand::Nascent);
    assert_eq!(readiness_band(24), ReadinessBand::Nascent);
    assert_eq!(readiness_band(25), ReadinessBand::Developing);
    assert_eq!(readiness_band(50), ReadinessBand::Established);
    assert_eq!(readiness_band(75), ReadinessBand::Leading);
    assert_eq!(readiness_band(100), ReadinessBand::Leading);
  }
}
