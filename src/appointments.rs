//! Prenatal appointment book

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum AppointmentError {
  #[error("Appointment {0} is required")]
  MissingField(String),

  #[error("Appointment {0} not found")]
  NotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
  pub id: u64,
  pub title: String,
  pub date: NaiveDate,
  pub time: NaiveTime,
  pub location: String,
  pub doctor: String,
  pub notes: String,
}

/// Form input for adding or editing an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
  pub title: String,
  pub date: NaiveDate,
  pub time: NaiveTime,
  pub location: String,
  pub doctor: String,
  #[serde(default)]
  pub notes: String,
}

impl AppointmentDraft {
  /// Everything but the notes must be filled in
  fn validate(&self) -> Result<(), AppointmentError> {
    let required = [
      ("title", &self.title),
      ("location", &self.location),
      ("doctor", &self.doctor),
    ];
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
      Some((field, _)) => Err(AppointmentError::MissingField(field.to_string())),
      None => Ok(()),
    }
  }

  fn into_appointment(self, id: u64) -> Appointment {
    Appointment {
      id,
      title: self.title.trim().to_string(),
      date: self.date,
      time: self.time,
      location: self.location.trim().to_string(),
      doctor: self.doctor.trim().to_string(),
      notes: self.notes.trim().to_string(),
    }
  }
}

/// Appointments in the order they were added
#[derive(Debug, Clone)]
pub struct AppointmentBook {
  appointments: Vec<Appointment>,
  next_id: u64,
}

impl Default for AppointmentBook {
  fn default() -> Self {
    Self::new()
  }
}

impl AppointmentBook {
  pub fn new() -> Self {
    Self {
      appointments: Vec::new(),
      next_id: 1,
    }
  }

  pub fn add(&mut self, draft: AppointmentDraft) -> Result<Appointment, AppointmentError> {
    draft.validate()?;
    let appointment = draft.into_appointment(self.next_id);
    self.next_id += 1;

    tracing::info!(id = appointment.id, date = %appointment.date, "appointment added");
    self.appointments.push(appointment.clone());
    Ok(appointment)
  }

  /// Replace every field of an existing appointment, keeping its id
  pub fn update(&mut self, id: u64, draft: AppointmentDraft) -> Result<Appointment, AppointmentError> {
    let pos = self.position(id)?;
    draft.validate()?;

    let appointment = draft.into_appointment(id);
    self.appointments[pos] = appointment.clone();
    Ok(appointment)
  }

  pub fn remove(&mut self, id: u64) -> Result<Appointment, AppointmentError> {
    let pos = self.position(id)?;
    Ok(self.appointments.remove(pos))
  }

  pub fn get(&self, id: u64) -> Option<&Appointment> {
    self.appointments.iter().find(|a| a.id == id)
  }

  pub fn len(&self) -> usize {
    self.appointments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.appointments.is_empty()
  }

  /// Soonest first. Appointments on the same day keep the order they were
  /// added in.
  pub fn sorted(&self) -> Vec<Appointment> {
    let mut all = self.appointments.clone();
    all.sort_by_key(|a| a.date);
    all
  }

  fn position(&self, id: u64) -> Result<usize, AppointmentError> {
    self
      .appointments
      .iter()
      .position(|a| a.id == id)
      .ok_or(AppointmentError::NotFound(id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(title: &str, date: &str) -> AppointmentDraft {
    AppointmentDraft {
      title: title.into(),
      date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
      time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
      location: "City Hospital".into(),
      doctor: "Dr. Amina Johnson".into(),
      notes: String::new(),
    }
  }

  #[test]
  fn test_sorted_by_date() {
    let mut book = AppointmentBook::new();
    book.add(draft("Ultrasound", "2024-11-27")).unwrap();
    book.add(draft("Prenatal Checkup", "2024-11-20")).unwrap();
    book.add(draft("Glucose Test", "2024-11-27")).unwrap();

    let titles: Vec<_> = book.sorted().into_iter().map(|a| a.title).collect();
    assert_eq!(titles, ["Prenatal Checkup", "Ultrasound", "Glucose Test"]);
  }

  #[test]
  fn test_update_keeps_id() {
    let mut book = AppointmentBook::new();
    let added = book.add(draft("Prenatal Checkup", "2024-11-20")).unwrap();

    let mut edit = draft("Prenatal Checkup", "2024-11-22");
    edit.notes = "  Bring lab results ".into();
    let updated = book.update(added.id, edit).unwrap();

    assert_eq!(updated.id, added.id);
    assert_eq!(updated.notes, "Bring lab results");
    assert_eq!(book.len(), 1);
    assert_eq!(
      book.get(added.id).unwrap().date,
      NaiveDate::from_ymd_opt(2024, 11, 22).unwrap()
    );
  }

  #[test]
  fn test_update_and_remove_unknown_id() {
    let mut book = AppointmentBook::new();
    assert_eq!(
      book.update(7, draft("Ultrasound", "2024-11-27")),
      Err(AppointmentError::NotFound(7))
    );
    assert_eq!(book.remove(7), Err(AppointmentError::NotFound(7)));
  }

  #[test]
  fn test_required_fields() {
    let mut book = AppointmentBook::new();

    let mut missing_doctor = draft("Ultrasound", "2024-11-27");
    missing_doctor.doctor = " ".into();
    assert_eq!(
      book.add(missing_doctor),
      Err(AppointmentError::MissingField("doctor".into()))
    );
    assert!(book.is_empty());
  }

  #[test]
  fn test_ids_not_reused_after_remove() {
    let mut book = AppointmentBook::new();
    let first = book.add(draft("Prenatal Checkup", "2024-11-20")).unwrap();
    book.remove(first.id).unwrap();
    let second = book.add(draft("Ultrasound", "2024-11-27")).unwrap();

    assert_ne!(first.id, second.id);
    assert!(book.get(first.id).is_none());
  }
}
