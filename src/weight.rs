//! Pregnancy weight tracking
//!
//! The recommended range is a linear placeholder (0.5 to 0.7 kg per week of
//! pregnancy), not a clinical guideline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_WEEK: u8 = 1;
pub const MAX_WEEK: u8 = 42;
const LOW_KG_PER_WEEK: f64 = 0.5;
const HIGH_KG_PER_WEEK: f64 = 0.7;

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum WeightError {
  #[error("Weight must be positive, got {0}")]
  NonPositiveWeight(f64),

  #[error("Week {0} is outside 1..=42")]
  WeekOutOfRange(u8),

  #[error("Entry dated {date} is earlier than the last entry ({last})")]
  OutOfOrder { date: NaiveDate, last: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
  pub date: NaiveDate,
  pub weight_kg: f64,
  pub week: u8,
}

// ---------------------------------------------------------------------------
// Pure Calculations
// ---------------------------------------------------------------------------

/// Last minus first weight, 0 for an empty list
pub fn total_gain(entries: &[WeightEntry]) -> f64 {
  match (entries.first(), entries.last()) {
    (Some(first), Some(last)) => last.weight_kg - first.weight_kg,
    _ => 0.0,
  }
}

/// Change from the previous entry; undefined for the first one
pub fn delta_for(entries: &[WeightEntry], index: usize) -> Option<f64> {
  if index == 0 {
    return None;
  }
  let current = entries.get(index)?;
  let previous = entries.get(index - 1)?;
  Some(current.weight_kg - previous.weight_kg)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRange {
  pub min_kg: f64,
  pub max_kg: f64,
}

impl std::fmt::Display for RecommendedRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}kg - {}kg", self.min_kg, self.max_kg)
  }
}

pub fn recommended_range(week: u8) -> RecommendedRange {
  RecommendedRange {
    min_kg: week as f64 * LOW_KG_PER_WEEK,
    max_kg: week as f64 * HIGH_KG_PER_WEEK,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainAssessment {
  Below,
  Within,
  Above,
}

pub fn assess_gain(gain_kg: f64, range: RecommendedRange) -> GainAssessment {
  if gain_kg < range.min_kg {
    GainAssessment::Below
  } else if gain_kg > range.max_kg {
    GainAssessment::Above
  } else {
    GainAssessment::Within
  }
}

// ---------------------------------------------------------------------------
// Weight Log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryWithDelta {
  #[serde(flatten)]
  pub entry: WeightEntry,
  pub delta_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSummary {
  pub starting_weight_kg: Option<f64>,
  pub current_weight_kg: Option<f64>,
  pub total_gain_kg: f64,
  pub recommended: RecommendedRange,
  pub assessment: GainAssessment,
}

/// Entries ordered by date ascending; append-only
#[derive(Debug, Clone, Default)]
pub struct WeightLog {
  entries: Vec<WeightEntry>,
}

impl WeightLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, entry: WeightEntry) -> Result<(), WeightError> {
    if !entry.weight_kg.is_finite() || entry.weight_kg <= 0.0 {
      return Err(WeightError::NonPositiveWeight(entry.weight_kg));
    }
    if !(MIN_WEEK..=MAX_WEEK).contains(&entry.week) {
      return Err(WeightError::WeekOutOfRange(entry.week));
    }
    if let Some(last) = self.entries.last() {
      if entry.date < last.date {
        return Err(WeightError::OutOfOrder {
          date: entry.date,
          last: last.date,
        });
      }
    }

    tracing::info!(weight_kg = entry.weight_kg, week = entry.week, "weight recorded");
    self.entries.push(entry);
    Ok(())
  }

  pub fn entries(&self) -> &[WeightEntry] {
    &self.entries
  }

  pub fn total_gain(&self) -> f64 {
    total_gain(&self.entries)
  }

  pub fn with_deltas(&self) -> Vec<EntryWithDelta> {
    (0..self.entries.len())
      .map(|i| EntryWithDelta {
        entry: self.entries[i],
        delta_kg: delta_for(&self.entries, i),
      })
      .collect()
  }

  pub fn summary(&self, current_week: u8) -> WeightSummary {
    let recommended = recommended_range(current_week);
    let total_gain_kg = self.total_gain();
    WeightSummary {
      starting_weight_kg: self.entries.first().map(|e| e.weight_kg),
      current_weight_kg: self.entries.last().map(|e| e.weight_kg),
      total_gain_kg,
      recommended,
      assessment: assess_gain(total_gain_kg, recommended),
    }
  }
}
