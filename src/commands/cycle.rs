//! Cycle screen commands

use chrono::NaiveDate;

use crate::cycle::{month_calendar, CalendarDay, CycleState, CycleSummary};
use crate::state::{lock, AppState};

pub fn get_cycle_summary(state: &AppState) -> Result<CycleSummary, String> {
  let cycle = *lock(&state.cycle)?;
  Ok(cycle.summary(state.clock.now().date_naive()))
}

pub fn update_cycle(
  state: &AppState,
  current_day: u32,
  cycle_length: u32,
  period_length: u32,
) -> Result<CycleSummary, String> {
  let cycle = CycleState::new(current_day, cycle_length, period_length).map_err(|e| e.to_string())?;
  *lock(&state.cycle)? = cycle;

  tracing::info!(current_day, cycle_length, period_length, "cycle updated");
  Ok(cycle.summary(state.clock.now().date_naive()))
}

/// Calendar for the month containing `month`; only the current month is
/// annotated with period and fertility markers.
pub fn get_month_calendar(state: &AppState, month: NaiveDate) -> Result<Vec<CalendarDay>, String> {
  let cycle = *lock(&state.cycle)?;
  Ok(month_calendar(&cycle, state.clock.now().date_naive(), month))
}
