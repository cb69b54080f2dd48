//! Menstrual cycle math
//!
//! Phase and calendar classification for the cycle screen. Day numbers are
//! 1-indexed cycle days; the fertile window and ovulation days are display
//! heuristics, not a medical prediction.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cycle days flagged as ovulation
pub const OVULATION_DAYS: std::ops::RangeInclusive<u32> = 13..=15;
/// Cycle days flagged as fertile (ovulation days take precedence)
pub const FERTILE_DAYS: std::ops::RangeInclusive<u32> = 10..=18;
/// Last day still counted as follicular
pub const FOLLICULAR_LAST_DAY: u32 = 13;
/// Cycle day the ovulation countdown targets
pub const OVULATION_TARGET_DAY: i64 = 14;

// ---------------------------------------------------------------------------
// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum CycleError {
  #[error("Cycle length must be positive")]
  ZeroCycleLength,

  #[error("Cycle day {day} is outside 1..={cycle_length}")]
  DayOutOfRange { day: u32, cycle_length: u32 },

  #[error("Period length {period_length} exceeds cycle length {cycle_length}")]
  PeriodTooLong { period_length: u32, cycle_length: u32 },
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
  Menstrual,
  Follicular,
  Ovulation,
  Luteal,
}

impl CyclePhase {
  pub fn name(&self) -> &'static str {
    match self {
      CyclePhase::Menstrual => "Menstrual Phase",
      CyclePhase::Follicular => "Follicular Phase",
      CyclePhase::Ovulation => "Ovulation Phase",
      CyclePhase::Luteal => "Luteal Phase",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      CyclePhase::Menstrual => "Your period is here. Focus on rest and self-care.",
      CyclePhase::Follicular => "Rising energy levels. Great time for new activities.",
      CyclePhase::Ovulation => "Peak fertility window. You may feel most energetic.",
      CyclePhase::Luteal => "Progesterone rises. Practice extra self-care.",
    }
  }
}

impl std::fmt::Display for CyclePhase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Menstrual => write!(f, "menstrual"),
      Self::Follicular => write!(f, "follicular"),
      Self::Ovulation => write!(f, "ovulation"),
      Self::Luteal => write!(f, "luteal"),
    }
  }
}

/// Phase for a cycle day. Branches are checked in order, so day 13 is
/// follicular whenever the period is shorter than 13 days.
pub fn phase_for(current_day: u32, period_length: u32) -> CyclePhase {
  if current_day <= period_length {
    CyclePhase::Menstrual
  } else if current_day <= FOLLICULAR_LAST_DAY {
    CyclePhase::Follicular
  } else if OVULATION_DAYS.contains(&current_day) {
    CyclePhase::Ovulation
  } else {
    CyclePhase::Luteal
  }
}

// ---------------------------------------------------------------------------
// Calendar Day Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
  Period,
  Ovulation,
  Fertile,
  None,
}

/// Cycle day a calendar day falls on, relative to today's cycle day.
///
/// The remainder keeps the sign of the shift, so days far enough before
/// today come out negative and are never annotated. 0 is an exact multiple
/// of the cycle length.
pub fn cycle_day_for(calendar_day: i64, today: i64, current_day: u32, cycle_length: u32) -> i64 {
  if cycle_length == 0 {
    return 0;
  }
  let shifted = current_day as i64 + (calendar_day - today);
  shifted % cycle_length as i64
}

/// Classify a calendar day. Period wins over ovulation, ovulation over fertile.
pub fn day_type(
  calendar_day: i64,
  today: i64,
  current_day: u32,
  cycle_length: u32,
  period_length: u32,
) -> DayType {
  let Ok(day) = u32::try_from(cycle_day_for(calendar_day, today, current_day, cycle_length)) else {
    return DayType::None;
  };

  if (1..=period_length).contains(&day) {
    DayType::Period
  } else if OVULATION_DAYS.contains(&day) {
    DayType::Ovulation
  } else if FERTILE_DAYS.contains(&day) {
    DayType::Fertile
  } else {
    DayType::None
  }
}

// ---------------------------------------------------------------------------
// Cycle State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
  current_day: u32,
  cycle_length: u32,
  period_length: u32,
}

impl Default for CycleState {
  fn default() -> Self {
    Self {
      current_day: 14,
      cycle_length: 28,
      period_length: 5,
    }
  }
}

impl CycleState {
  pub fn new(current_day: u32, cycle_length: u32, period_length: u32) -> Result<Self, CycleError> {
    if cycle_length == 0 {
      return Err(CycleError::ZeroCycleLength);
    }
    if current_day == 0 || current_day > cycle_length {
      return Err(CycleError::DayOutOfRange {
        day: current_day,
        cycle_length,
      });
    }
    if period_length > cycle_length {
      return Err(CycleError::PeriodTooLong {
        period_length,
        cycle_length,
      });
    }

    Ok(Self {
      current_day,
      cycle_length,
      period_length,
    })
  }

  pub fn current_day(&self) -> u32 {
    self.current_day
  }

  pub fn cycle_length(&self) -> u32 {
    self.cycle_length
  }

  pub fn period_length(&self) -> u32 {
    self.period_length
  }

  pub fn phase(&self) -> CyclePhase {
    phase_for(self.current_day, self.period_length)
  }

  /// Day type for a day of the current month, given today's day of month
  pub fn day_type(&self, calendar_day: u32, today: u32) -> DayType {
    day_type(
      calendar_day as i64,
      today as i64,
      self.current_day,
      self.cycle_length,
      self.period_length,
    )
  }

  pub fn days_until_next_period(&self) -> u32 {
    self.cycle_length - self.current_day
  }

  /// Negative once ovulation has passed this cycle
  pub fn days_until_ovulation(&self) -> i64 {
    OVULATION_TARGET_DAY - self.current_day as i64
  }

  pub fn next_period_date(&self, today: NaiveDate) -> NaiveDate {
    today + Duration::days(self.days_until_next_period() as i64)
  }

  pub fn ovulation_date(&self, today: NaiveDate) -> NaiveDate {
    today + Duration::days(self.days_until_ovulation())
  }

  pub fn summary(&self, today: NaiveDate) -> CycleSummary {
    let phase = self.phase();
    CycleSummary {
      cycle_day: self.current_day,
      phase,
      phase_name: phase.name().to_string(),
      phase_description: phase.description().to_string(),
      days_until_next_period: self.days_until_next_period(),
      next_period_date: self.next_period_date(today),
      fertile_window_active: phase == CyclePhase::Ovulation,
      ovulation_date: self.ovulation_date(today),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSummary {
  pub cycle_day: u32,
  pub phase: CyclePhase,
  pub phase_name: String,
  pub phase_description: String,
  pub days_until_next_period: u32,
  pub next_period_date: NaiveDate,
  pub fertile_window_active: bool,
  pub ovulation_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Month Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
  pub date: NaiveDate,
  /// Unset for months other than the one containing today
  pub day_type: Option<DayType>,
}

/// Every day of the month containing `month`, annotated when that month is
/// the current one.
pub fn month_calendar(state: &CycleState, today: NaiveDate, month: NaiveDate) -> Vec<CalendarDay> {
  let is_current_month = month.year() == today.year() && month.month() == today.month();
  let mut days = Vec::with_capacity(31);

  let Some(mut date) = month.with_day(1) else {
    return days;
  };

  while date.month() == month.month() {
    let day_type = is_current_month.then(|| state.day_type(date.day(), today.day()));
    days.push(CalendarDay { date, day_type });

    match date.succ_opt() {
      Some(next) => date = next,
      None => break,
    }
  }

  days
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_phase_boundaries() {
    assert_eq!(phase_for(1, 5), CyclePhase::Menstrual);
    assert_eq!(phase_for(5, 5), CyclePhase::Menstrual);
    assert_eq!(phase_for(6, 5), CyclePhase::Follicular);
    assert_eq!(phase_for(13, 5), CyclePhase::Follicular);
    assert_eq!(phase_for(14, 5), CyclePhase::Ovulation);
    assert_eq!(phase_for(15, 5), CyclePhase::Ovulation);
    assert_eq!(phase_for(16, 5), CyclePhase::Luteal);
    assert_eq!(phase_for(28, 5), CyclePhase::Luteal);
  }

  #[test]
  fn test_phase_long_period_shadows_follicular() {
    // Period covers every follicular day
    assert_eq!(phase_for(13, 14), CyclePhase::Menstrual);
    assert_eq!(phase_for(14, 14), CyclePhase::Menstrual);
    assert_eq!(phase_for(15, 14), CyclePhase::Ovulation);
  }

  #[test]
  fn test_phase_covers_every_day() {
    let rank = |p: CyclePhase| match p {
      CyclePhase::Menstrual => 0,
      CyclePhase::Follicular => 1,
      CyclePhase::Ovulation => 2,
      CyclePhase::Luteal => 3,
    };

    for cycle_length in [21u32, 28, 35, 45] {
      for period_length in 0..=7 {
        let phases: Vec<_> = (1..=cycle_length).map(|d| phase_for(d, period_length)).collect();
        assert_eq!(phases.len(), cycle_length as usize);

        // Regions are contiguous and appear in cycle order
        assert!(phases.windows(2).all(|w| rank(w[0]) <= rank(w[1])));
        assert_eq!(phases[0] == CyclePhase::Menstrual, period_length >= 1);
      }
    }
  }

  #[test]
  fn test_day_type_precedence() {
    // today is calendar day 10 and cycle day 14, 28-day cycle, 5-day period
    assert_eq!(day_type(10, 10, 14, 28, 5), DayType::Ovulation);
    assert_eq!(day_type(9, 10, 14, 28, 5), DayType::Ovulation); // cycle day 13
    assert_eq!(day_type(6, 10, 14, 28, 5), DayType::Fertile); // cycle day 10
    assert_eq!(day_type(14, 10, 14, 28, 5), DayType::Fertile); // cycle day 18
    assert_eq!(day_type(15, 10, 14, 28, 5), DayType::None); // cycle day 19
    assert_eq!(day_type(25, 10, 14, 28, 5), DayType::Period); // cycle day 29 -> 1
  }

  #[test]
  fn test_day_type_wraps_to_zero() {
    // cycle day 28 maps to 0, which is neither period nor fertile
    assert_eq!(cycle_day_for(24, 10, 14, 28), 0);
    assert_eq!(day_type(24, 10, 14, 28, 5), DayType::None);
  }

  #[test]
  fn test_day_type_before_cycle_start_is_none() {
    // today is cycle day 2; 16 days earlier shifts to -14
    assert_eq!(cycle_day_for(1, 17, 2, 28), -14);
    assert_eq!(day_type(1, 17, 2, 28, 5), DayType::None);
    // still inside the current cycle
    assert_eq!(cycle_day_for(16, 17, 2, 28), 1);
    assert_eq!(day_type(16, 17, 2, 28, 5), DayType::Period);
    // cycle day 0 exactly
    assert_eq!(day_type(15, 17, 2, 28, 5), DayType::None);
  }

  #[test]
  fn test_period_precedes_ovulation() {
    // A 15-day period swallows the ovulation days
    assert_eq!(day_type(14, 14, 14, 28, 15), DayType::Period);
  }

  #[test]
  fn test_cycle_state_validation() {
    assert_eq!(CycleState::new(1, 0, 0), Err(CycleError::ZeroCycleLength));
    assert!(matches!(
      CycleState::new(0, 28, 5),
      Err(CycleError::DayOutOfRange { .. })
    ));
    assert!(matches!(
      CycleState::new(29, 28, 5),
      Err(CycleError::DayOutOfRange { .. })
    ));
    assert!(matches!(
      CycleState::new(3, 28, 29),
      Err(CycleError::PeriodTooLong { .. })
    ));
    assert!(CycleState::new(28, 28, 28).is_ok());
  }

  #[test]
  fn test_countdowns() {
    let state = CycleState::default();
    assert_eq!(state.days_until_next_period(), 14);
    assert_eq!(state.days_until_ovulation(), 0);

    let late = CycleState::new(20, 28, 5).unwrap();
    assert_eq!(late.days_until_ovulation(), -6);
    assert_eq!(late.phase(), CyclePhase::Luteal);
  }

  #[test]
  fn test_summary() {
    let today = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    let summary = CycleState::default().summary(today);

    assert_eq!(summary.phase, CyclePhase::Ovulation);
    assert!(summary.fertile_window_active);
    assert_eq!(summary.next_period_date, NaiveDate::from_ymd_opt(2025, 11, 23).unwrap());
    assert_eq!(summary.ovulation_date, today);
    assert_eq!(summary.phase_name, "Ovulation Phase");
  }

  #[test]
  fn test_month_calendar_current_month() {
    let state = CycleState::default();
    let today = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    let days = month_calendar(&state, today, today);

    assert_eq!(days.len(), 30);
    assert_eq!(days[8].day_type, Some(DayType::Ovulation)); // Nov 9 = cycle day 14
    assert_eq!(days[0].day_type, Some(DayType::None)); // Nov 1 = cycle day 6
    // Nov 24 = cycle day 29 -> 1
    assert_eq!(days[23].day_type, Some(DayType::Period));
  }

  #[test]
  fn test_month_calendar_other_month_unannotated() {
    let state = CycleState::default();
    let today = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    let december = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
    let days = month_calendar(&state, today, december);

    assert_eq!(days.len(), 31);
    assert!(days.iter().all(|d| d.day_type.is_none()));
  }

  #[test]
  fn test_phase_display() {
    assert_eq!(CyclePhase::Luteal.to_string(), "luteal");
  }
}
