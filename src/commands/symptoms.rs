//! Symptom logging for the pregnancy, postpartum and baby screens

use serde::Serialize;

use crate::emergency::{AlertReason, EmergencyAlert, EMERGENCY_NUMBER, PEDIATRICIAN_NUMBER};
use crate::state::{lock, AppState};
use crate::symptoms::{CatalogEntry, LoggedSymptom, Severity, SymptomCatalog, SymptomEntry};

#[derive(Debug, Clone, Serialize)]
pub struct SymptomHistory {
  pub entries: Vec<SymptomEntry>,
  pub dangerous_count: usize,
  pub severe_count: usize,
}

pub fn get_symptom_catalog(catalog: SymptomCatalog) -> Vec<CatalogEntry> {
  catalog.entries().to_vec()
}

/// Log a symptom. A dangerous pregnancy or postpartum symptom also alerts
/// the emergency contacts; baby symptoms only surface the urgent message.
pub fn log_symptom(
  state: &AppState,
  catalog: SymptomCatalog,
  name: &str,
  severity: Severity,
  notes: Option<String>,
) -> Result<LoggedSymptom, String> {
  let now = state.clock.now();
  let logged = lock(state.symptom_log(catalog))?
    .log(name, severity, notes, now)
    .map_err(|e| e.to_string())?;

  if logged.entry.dangerous && catalog != SymptomCatalog::Baby {
    let alert = EmergencyAlert {
      reason: AlertReason::DangerousSymptom {
        symptom: logged.entry.name.clone(),
      },
      raised_at: now,
      location: *lock(&state.location)?,
      contacts: lock(&state.contacts)?.contacts().to_vec(),
    };
    // Logging succeeded; a failed notification must not lose the entry
    if let Err(e) = state.notifier.notify_emergency_contacts(&alert) {
      tracing::error!(error = %e, "failed to notify emergency contacts");
    }
  }

  Ok(logged)
}

/// Newest first
pub fn get_symptoms(state: &AppState, catalog: SymptomCatalog) -> Result<SymptomHistory, String> {
  let log = lock(state.symptom_log(catalog))?;
  Ok(SymptomHistory {
    entries: log.newest_first(),
    dangerous_count: log.dangerous_count(),
    severe_count: log.count_by_severity(Severity::Severe),
  })
}

/// Call 911 when `emergency`, otherwise the pediatrician. Returns the
/// number dialled.
pub fn call_for_baby(state: &AppState, emergency: bool) -> Result<String, String> {
  let number = if emergency {
    EMERGENCY_NUMBER
  } else {
    PEDIATRICIAN_NUMBER
  };
  state.dialer.place_call(number).map_err(|e| e.to_string())?;
  Ok(number.to_string())
}
