//! Appointment commands

use crate::appointments::{Appointment, AppointmentDraft};
use crate::state::{lock, AppState};

/// Soonest first
pub fn get_appointments(state: &AppState) -> Result<Vec<Appointment>, String> {
  Ok(lock(&state.appointments)?.sorted())
}

pub fn add_appointment(state: &AppState, draft: AppointmentDraft) -> Result<Appointment, String> {
  lock(&state.appointments)?.add(draft).map_err(|e| e.to_string())
}

pub fn update_appointment(state: &AppState, id: u64, draft: AppointmentDraft) -> Result<Appointment, String> {
  lock(&state.appointments)?
    .update(id, draft)
    .map_err(|e| e.to_string())
}

pub fn delete_appointment(state: &AppState, id: u64) -> Result<(), String> {
  lock(&state.appointments)?.remove(id).map_err(|e| e.to_string())?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[test]
  fn test_appointment_lifecycle() {
    let h = setup_test_state();
    let ultrasound = add_appointment(&h.state, sample_appointment("Ultrasound", "2024-11-27")).unwrap();
    add_appointment(&h.state, sample_appointment("Prenatal Checkup", "2024-11-20")).unwrap();

    let list = get_appointments(&h.state).unwrap();
    assert_eq!(list[0].title, "Prenatal Checkup");

    let moved = update_appointment(&h.state, ultrasound.id, sample_appointment("Ultrasound", "2024-11-18")).unwrap();
    assert_eq!(moved.id, ultrasound.id);
    assert_eq!(get_appointments(&h.state).unwrap()[0].title, "Ultrasound");

    delete_appointment(&h.state, ultrasound.id).unwrap();
    assert_eq!(get_appointments(&h.state).unwrap().len(), 1);

    let err = delete_appointment(&h.state, ultrasound.id).unwrap_err();
    assert_eq!(err, format!("Appointment {} not found", ultrasound.id));
  }

  #[test]
  fn test_add_requires_title() {
    let h = setup_test_state();
    let err = add_appointment(&h.state, sample_appointment("", "2024-11-27")).unwrap_err();
    assert_eq!(err, "Appointment title is required");
  }
}
