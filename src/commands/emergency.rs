//! Emergency screen commands: the alert button, contacts and calls

use crate::emergency::{AlertReason, AlertReceipt, EmergencyAlert, EmergencyContact, Location, NewContact};
use crate::state::{lock, AppState};

pub fn trigger_emergency_alert(state: &AppState) -> Result<AlertReceipt, String> {
  let alert = EmergencyAlert {
    reason: AlertReason::Manual,
    raised_at: state.clock.now(),
    location: *lock(&state.location)?,
    contacts: lock(&state.contacts)?.contacts().to_vec(),
  };
  state
    .notifier
    .notify_emergency_contacts(&alert)
    .map_err(|e| e.to_string())
}

pub fn get_emergency_contacts(state: &AppState) -> Result<Vec<EmergencyContact>, String> {
  Ok(lock(&state.contacts)?.contacts().to_vec())
}

pub fn add_emergency_contact(state: &AppState, contact: NewContact) -> Result<EmergencyContact, String> {
  let added = lock(&state.contacts)?.add(contact).map_err(|e| e.to_string())?;
  tracing::info!(id = added.id, primary = added.is_primary, "emergency contact added");
  Ok(added)
}

pub fn remove_emergency_contact(state: &AppState, id: u64) -> Result<(), String> {
  lock(&state.contacts)?.remove(id).map_err(|e| e.to_string())?;
  Ok(())
}

pub fn set_primary_contact(state: &AppState, id: u64) -> Result<(), String> {
  lock(&state.contacts)?.set_primary(id).map_err(|e| e.to_string())
}

pub fn call_contact(state: &AppState, id: u64) -> Result<String, String> {
  let phone = lock(&state.contacts)?
    .get(id)
    .map(|c| c.phone.clone())
    .ok_or_else(|| format!("Contact {} not found", id))?;
  state.dialer.place_call(&phone).map_err(|e| e.to_string())?;
  Ok(phone)
}

/// Last known location, attached to every alert
pub fn set_location(state: &AppState, latitude: f64, longitude: f64) -> Result<(), String> {
  if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
    return Err(format!("Invalid location: {}, {}", latitude, longitude));
  }
  *lock(&state.location)? = Some(Location { latitude, longitude });
  Ok(())
}
