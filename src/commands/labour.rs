//! Labour watch commands: the contraction timer and the critical symptom
//! checklist.

use serde::Serialize;

use crate::clock::{elapsed_seconds, ElapsedTicker};
use crate::contractions::{ContractionEvent, ContractionStats};
use crate::emergency::{AlertReason, AlertReceipt, EmergencyAlert};
use crate::state::{lock, AppState};
use crate::symptoms::{LaborAlertState, LaborSymptom, LaborWatch};

// ---------------------------------------------------------------------------
// Contraction Commands
// ---------------------------------------------------------------------------

pub async fn start_contraction(state: &AppState) -> Result<(), String> {
  let mut screen = lock(&state.contractions)?;
  if screen.timer.is_timing() {
    return Err("A contraction is already being timed".into());
  }

  let now = state.clock.now();
  screen.timer.start(now);
  screen.ticker = Some(ElapsedTicker::start(
    state.clock.clone(),
    now,
    state.tick_period(),
  ));
  Ok(())
}

/// `None` when no contraction was being timed
pub fn stop_contraction(state: &AppState) -> Result<Option<ContractionEvent>, String> {
  let mut screen = lock(&state.contractions)?;
  if let Some(mut ticker) = screen.ticker.take() {
    ticker.stop();
  }
  Ok(screen.timer.stop(state.clock.now()))
}

pub fn get_contraction_elapsed(state: &AppState) -> Result<u64, String> {
  let screen = lock(&state.contractions)?;
  Ok(
    screen
      .timer
      .started_at()
      .map(|start| elapsed_seconds(start, state.clock.now()))
      .unwrap_or(0),
  )
}

pub fn get_contraction_stats(state: &AppState) -> Result<ContractionStats, String> {
  Ok(lock(&state.contractions)?.timer.stats())
}

pub fn get_recent_contractions(state: &AppState, limit: usize) -> Result<Vec<ContractionEvent>, String> {
  Ok(lock(&state.contractions)?.timer.recent(limit))
}

// ---------------------------------------------------------------------------
// Labour Symptom Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LaborWatchView {
  pub selected: Vec<String>,
  pub critical_count: usize,
  pub alert: LaborAlertState,
}

impl From<&LaborWatch> for LaborWatchView {
  fn from(watch: &LaborWatch) -> Self {
    Self {
      selected: watch.selected().iter().map(|s| s.id().to_string()).collect(),
      critical_count: watch.critical_count(),
      alert: watch.state(),
    }
  }
}

pub fn toggle_labor_symptom(state: &AppState, id: &str) -> Result<LaborWatchView, String> {
  let symptom = id.parse::<LaborSymptom>().map_err(|e| e.to_string())?;
  let mut watch = lock(&state.labor_watch)?;
  watch.toggle(symptom);
  Ok(LaborWatchView::from(&*watch))
}

pub fn dismiss_labor_alert(state: &AppState) -> Result<LaborWatchView, String> {
  let mut watch = lock(&state.labor_watch)?;
  watch.dismiss();
  Ok(LaborWatchView::from(&*watch))
}

/// Notify emergency contacts about the selected critical symptoms and close
/// the alert.
pub fn send_labor_alert(state: &AppState) -> Result<AlertReceipt, String> {
  let mut watch = lock(&state.labor_watch)?;
  let symptoms: Vec<String> = watch
    .selected()
    .iter()
    .filter(|s| s.is_critical())
    .map(|s| s.name().to_string())
    .collect();

  let alert = EmergencyAlert {
    reason: AlertReason::CriticalLaborSymptoms { symptoms },
    raised_at: state.clock.now(),
    location: *lock(&state.location)?,
    contacts: lock(&state.contacts)?.contacts().to_vec(),
  };

  let receipt = state
    .notifier
    .notify_emergency_contacts(&alert)
    .map_err(|e| e.to_string())?;
  if watch.confirm() {
    tracing::info!(contacts = receipt.contacts_notified, "labour alert sent");
  }

  Ok(receipt)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;
  use chrono::Duration;

  #[tokio::test]
  async fn test_contractions_reach_threshold() {
    let h = setup_test_state();

    let mut minute = 0;
    for start in [0, 4, 9] {
      h.clock.advance(Duration::minutes(start - minute));
      start_contraction(&h.state).await.unwrap();
      h.clock.advance(Duration::seconds(60));
      let event = stop_contraction(&h.state).unwrap().unwrap();
      assert_eq!(event.duration_seconds, 60);
      minute = start + 1;
    }

    let stats = get_contraction_stats(&h.state).unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.average_interval_minutes, Some(5));
    assert!(stats.labor_threshold_reached);

    let recent = get_recent_contractions(&h.state, 2).unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].start_time > recent[1].start_time);
  }

  #[tokio::test]
  async fn test_double_start_rejected() {
    let h = setup_test_state();
    start_contraction(&h.state).await.unwrap();
    assert!(start_contraction(&h.state).await.is_err());

    h.clock.advance(Duration::seconds(45));
    assert_eq!(get_contraction_elapsed(&h.state).unwrap(), 45);
  }

  #[test]
  fn test_stop_without_start() {
    let h = setup_test_state();
    assert_eq!(stop_contraction(&h.state).unwrap(), None);
    assert_eq!(get_contraction_stats(&h.state).unwrap().count, 0);
  }

  #[test]
  fn test_two_critical_symptoms_raise_alert() {
    let h = setup_test_state();

    let view = toggle_labor_symptom(&h.state, "back-pain").unwrap();
    assert_eq!(view.alert, LaborAlertState::Normal);

    let view = toggle_labor_symptom(&h.state, "water-broke").unwrap();
    assert_eq!(view.alert, LaborAlertState::Normal);

    let view = toggle_labor_symptom(&h.state, "bleeding").unwrap();
    assert_eq!(view.alert, LaborAlertState::UrgentAlertShown);
    assert_eq!(view.critical_count, 2);
  }

  #[test]
  fn test_unknown_labor_symptom() {
    let h = setup_test_state();
    let err = toggle_labor_symptom(&h.state, "hiccups").unwrap_err();
    assert_eq!(err, "Unknown labour symptom: hiccups");
  }

  #[test]
  fn test_send_labor_alert_notifies_contacts() {
    let h = setup_test_state();
    lock(&h.state.contacts)
      .unwrap()
      .add(sample_contact("John Smith", "(415) 555-0100"))
      .unwrap();

    toggle_labor_symptom(&h.state, "water-broke").unwrap();
    toggle_labor_symptom(&h.state, "severe-pain").unwrap();

    let receipt = send_labor_alert(&h.state).unwrap();
    assert_eq!(receipt.contacts_notified, 1);

    let alert = h.notifier.last().unwrap();
    assert_eq!(
      alert.reason,
      AlertReason::CriticalLaborSymptoms {
        symptoms: vec!["Water broke".into(), "Severe abdominal pain".into()]
      }
    );
    assert_eq!(
      lock(&h.state.labor_watch).unwrap().state(),
      LaborAlertState::Normal
    );
  }

  #[test]
  fn test_dismiss_keeps_selection() {
    let h = setup_test_state();
    toggle_labor_symptom(&h.state, "water-broke").unwrap();
    toggle_labor_symptom(&h.state, "bleeding").unwrap();

    let view = dismiss_labor_alert(&h.state).unwrap();
    assert_eq!(view.alert, LaborAlertState::Normal);
    assert_eq!(view.selected.len(), 2);
    assert_eq!(h.notifier.count(), 0);
  }
}
