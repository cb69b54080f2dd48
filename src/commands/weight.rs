//! Weight tracker commands

use crate::state::{lock, AppState};
use crate::weight::{EntryWithDelta, WeightEntry, WeightSummary};

/// Record today's weight against the current pregnancy week
pub fn add_weight(state: &AppState, weight_kg: f64) -> Result<WeightEntry, String> {
  let week = *lock(&state.pregnancy_week)?;
  let entry = WeightEntry {
    date: state.clock.now().date_naive(),
    weight_kg,
    week,
  };
  lock(&state.weight)?.add(entry).map_err(|e| e.to_string())?;
  Ok(entry)
}

pub fn get_weight_summary(state: &AppState) -> Result<WeightSummary, String> {
  let week = *lock(&state.pregnancy_week)?;
  Ok(lock(&state.weight)?.summary(week))
}

pub fn get_weight_entries(state: &AppState) -> Result<Vec<EntryWithDelta>, String> {
  Ok(lock(&state.weight)?.with_deltas())
}
