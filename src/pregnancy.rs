//! Pregnancy progress and the week-gated screens

use serde::{Deserialize, Serialize};

use crate::settings::TrackerSettings;

/// Percentage of a full-term pregnancy, capped at 100
pub fn progress_percentage(week: u8, full_term_weeks: u8) -> f64 {
  if full_term_weeks == 0 {
    return 0.0;
  }
  ((week as f64 / full_term_weeks as f64) * 100.0).min(100.0)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PregnancyProgress {
  pub week: u8,
  pub full_term_weeks: u8,
  pub weeks_remaining: u8,
  pub percentage: f64,
  pub hospital_bag_available: bool,
  pub labour_watch_available: bool,
}

impl PregnancyProgress {
  pub fn compute(week: u8, settings: &TrackerSettings) -> Self {
    Self {
      week,
      full_term_weeks: settings.full_term_weeks,
      weeks_remaining: settings.full_term_weeks.saturating_sub(week),
      percentage: progress_percentage(week, settings.full_term_weeks),
      hospital_bag_available: week >= settings.hospital_bag_week,
      labour_watch_available: week >= settings.labour_watch_week,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_progress_percentage() {
    assert_eq!(progress_percentage(24, 40), 60.0);
    assert_eq!(progress_percentage(42, 40), 100.0);
    assert_eq!(progress_percentage(10, 0), 0.0);
  }

  #[test]
  fn test_feature_gates() {
    let settings = TrackerSettings::default();

    let week_35 = PregnancyProgress::compute(35, &settings);
    assert!(!week_35.hospital_bag_available);
    assert!(!week_35.labour_watch_available);

    let week_36 = PregnancyProgress::compute(36, &settings);
    assert!(week_36.hospital_bag_available);
    assert!(!week_36.labour_watch_available);

    let week_38 = PregnancyProgress::compute(38, &settings);
    assert!(week_38.labour_watch_available);
    assert_eq!(week_38.weeks_remaining, 2);
  }
}
