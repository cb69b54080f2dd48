pub mod appointments;
pub mod checklist;
pub mod cycle;
pub mod emergency;
pub mod kicks;
pub mod labour;
pub mod postpartum;
pub mod symptoms;
pub mod weight;

use serde::Serialize;

use crate::pregnancy::PregnancyProgress;
use crate::state::{lock, AppState};
use crate::weight::{MAX_WEEK, MIN_WEEK};

// ---------------------------------------------------------------------------
// Pregnancy Progress Commands
// ---------------------------------------------------------------------------

pub fn get_pregnancy_progress(state: &AppState) -> Result<PregnancyProgress, String> {
  let week = *lock(&state.pregnancy_week)?;
  Ok(PregnancyProgress::compute(week, &state.settings))
}

pub fn set_pregnancy_week(state: &AppState, week: u8) -> Result<PregnancyProgress, String> {
  if !(MIN_WEEK..=MAX_WEEK).contains(&week) {
    return Err(format!("Week {} is outside {}..={}", week, MIN_WEEK, MAX_WEEK));
  }
  *lock(&state.pregnancy_week)? = week;
  tracing::info!(week, "pregnancy week updated");
  Ok(PregnancyProgress::compute(week, &state.settings))
}

/// Everything the dashboard shows at a glance
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
  pub progress: PregnancyProgress,
  pub kick_session_active: bool,
  pub kicks_today: Option<u32>,
  pub hospital_bag_percentage: Option<f64>,
  pub contractions_recorded: Option<usize>,
}

pub fn get_dashboard(state: &AppState) -> Result<DashboardSnapshot, String> {
  let progress = get_pregnancy_progress(state)?;

  let kicks = lock(&state.kicks)?;
  let active = kicks.tracker.active().copied();
  drop(kicks);

  let hospital_bag_percentage = if progress.hospital_bag_available {
    Some(lock(&state.hospital_bag)?.overall_progress().percentage)
  } else {
    None
  };

  let contractions_recorded = if progress.labour_watch_available {
    Some(lock(&state.contractions)?.timer.events().len())
  } else {
    None
  };

  Ok(DashboardSnapshot {
    progress,
    kick_session_active: active.is_some(),
    kicks_today: active.map(|s| s.kicks),
    hospital_bag_percentage,
    contractions_recorded,
  })
}
