//! Emergency contacts, alerts and calls
//!
//! Notifying contacts and placing calls are external services. They sit
//! behind `EmergencyNotifier` and `Dialer` so the trackers only decide
//! *when* to raise an alert. The simulated implementations log what a real
//! integration would send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EMERGENCY_NUMBER: &str = "911";
pub const NEAREST_HOSPITAL: &str = "St. Mary's Medical Center";
pub const PEDIATRICIAN_NAME: &str = "Dr. Emily Chen";
pub const PEDIATRICIAN_NUMBER: &str = "(415) 555-0199";

// ---------------------------------------------------------------------------
// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum EmergencyError {
  #[error("Notification failed: {0}")]
  Notify(String),

  #[error("Call failed: {0}")]
  Call(String),
}

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum ContactError {
  #[error("Please fill in at least name and phone number")]
  MissingField,

  #[error("Contact {0} not found")]
  NotFound(u64),
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub latitude: f64,
  pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertReason {
  /// The emergency button on the dashboard
  Manual,
  /// A single dangerous symptom was logged
  DangerousSymptom { symptom: String },
  /// Enough critical labour symptoms selected together
  CriticalLaborSymptoms { symptoms: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAlert {
  pub reason: AlertReason,
  pub raised_at: DateTime<Utc>,
  pub location: Option<Location>,
  pub contacts: Vec<EmergencyContact>,
}

/// What the user is shown after an alert goes out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReceipt {
  pub contacts_notified: usize,
  pub hospital: String,
  pub hotline: String,
}

pub trait EmergencyNotifier: Send + Sync {
  fn notify_emergency_contacts(&self, alert: &EmergencyAlert) -> Result<AlertReceipt, EmergencyError>;
}

pub trait Dialer: Send + Sync {
  fn place_call(&self, number: &str) -> Result<(), EmergencyError>;
}

/// Logs the alert instead of delivering it
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedNotifier;

impl EmergencyNotifier for SimulatedNotifier {
  fn notify_emergency_contacts(&self, alert: &EmergencyAlert) -> Result<AlertReceipt, EmergencyError> {
    let payload = serde_json::to_string(alert).map_err(|e| EmergencyError::Notify(e.to_string()))?;
    tracing::warn!(contacts = alert.contacts.len(), %payload, "emergency alert sent");

    Ok(AlertReceipt {
      contacts_notified: alert.contacts.len(),
      hospital: NEAREST_HOSPITAL.to_string(),
      hotline: EMERGENCY_NUMBER.to_string(),
    })
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedDialer;

impl Dialer for SimulatedDialer {
  fn place_call(&self, number: &str) -> Result<(), EmergencyError> {
    if number.trim().is_empty() {
      return Err(EmergencyError::Call("no number".into()));
    }
    tracing::info!(number, "calling");
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Contact Book
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
  pub id: u64,
  pub name: String,
  pub relationship: String,
  pub phone: String,
  pub email: String,
  pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewContact {
  pub name: String,
  pub relationship: String,
  pub phone: String,
  pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactBook {
  contacts: Vec<EmergencyContact>,
  next_id: u64,
}

impl ContactBook {
  pub fn new() -> Self {
    Self {
      contacts: Vec::new(),
      next_id: 1,
    }
  }

  /// The first contact added becomes primary
  pub fn add(&mut self, new: NewContact) -> Result<EmergencyContact, ContactError> {
    if new.name.trim().is_empty() || new.phone.trim().is_empty() {
      return Err(ContactError::MissingField);
    }

    let contact = EmergencyContact {
      id: self.next_id.max(1),
      name: new.name.trim().to_string(),
      relationship: new.relationship,
      phone: new.phone.trim().to_string(),
      email: new.email,
      is_primary: self.contacts.is_empty(),
    };
    self.next_id = contact.id + 1;
    self.contacts.push(contact.clone());
    Ok(contact)
  }

  pub fn remove(&mut self, id: u64) -> Result<EmergencyContact, ContactError> {
    let pos = self
      .contacts
      .iter()
      .position(|c| c.id == id)
      .ok_or(ContactError::NotFound(id))?;
    Ok(self.contacts.remove(pos))
  }

  pub fn set_primary(&mut self, id: u64) -> Result<(), ContactError> {
    if !self.contacts.iter().any(|c| c.id == id) {
      return Err(ContactError::NotFound(id));
    }
    for contact in &mut self.contacts {
      contact.is_primary = contact.id == id;
    }
    Ok(())
  }

  pub fn get(&self, id: u64) -> Option<&EmergencyContact> {
    self.contacts.iter().find(|c| c.id == id)
  }

  pub fn primary(&self) -> Option<&EmergencyContact> {
    self.contacts.iter().find(|c| c.is_primary)
  }

  pub fn contacts(&self) -> &[EmergencyContact] {
    &self.contacts
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_contact(name: &str, phone: &str) -> NewContact {
    NewContact {
      name: name.into(),
      relationship: "Spouse".into(),
      phone: phone.into(),
      email: String::new(),
    }
  }

  #[test]
  fn test_first_contact_is_primary() {
    let mut book = ContactBook::new();
    let john = book.add(new_contact("John Smith", "(415) 555-0100")).unwrap();
    let sarah = book.add(new_contact("Sarah Johnson", "(415) 555-0200")).unwrap();

    assert!(john.is_primary);
    assert!(!sarah.is_primary);
    assert_eq!(book.primary().unwrap().id, john.id);
  }

  #[test]
  fn test_add_requires_name_and_phone() {
    let mut book = ContactBook::new();
    assert_eq!(
      book.add(new_contact("", "(415) 555-0100")),
      Err(ContactError::MissingField)
    );
    assert_eq!(book.add(new_contact("John", "  ")), Err(ContactError::MissingField));
  }

  #[test]
  fn test_set_primary_is_exclusive() {
    let mut book = ContactBook::new();
    book.add(new_contact("John", "1")).unwrap();
    let sarah = book.add(new_contact("Sarah", "2")).unwrap();

    book.set_primary(sarah.id).unwrap();
    assert_eq!(book.contacts().iter().filter(|c| c.is_primary).count(), 1);
    assert_eq!(book.primary().unwrap().name, "Sarah");
    assert_eq!(book.set_primary(99), Err(ContactError::NotFound(99)));
  }

  #[test]
  fn test_ids_not_reused_after_remove() {
    let mut book = ContactBook::new();
    let first = book.add(new_contact("John", "1")).unwrap();
    book.remove(first.id).unwrap();
    let second = book.add(new_contact("Sarah", "2")).unwrap();

    assert_ne!(first.id, second.id);
    assert!(second.is_primary);
    assert!(book.get(first.id).is_none());
  }

  #[test]
  fn test_simulated_notifier_receipt() {
    let alert = EmergencyAlert {
      reason: AlertReason::Manual,
      raised_at: Utc::now(),
      location: None,
      contacts: Vec::new(),
    };
    let receipt = SimulatedNotifier.notify_emergency_contacts(&alert).unwrap();
    assert_eq!(receipt.hospital, NEAREST_HOSPITAL);
    assert_eq!(receipt.hotline, EMERGENCY_NUMBER);
  }

  #[test]
  fn test_simulated_dialer_rejects_blank() {
    assert!(SimulatedDialer.place_call("911").is_ok());
    assert!(SimulatedDialer.place_call("").is_err());
  }
}
