//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - A manually advanced clock
//! - Recording stand-ins for the notifier and dialer
//! - A ready-to-use `AppState`
//! - Sample data factories

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::appointments::AppointmentDraft;
use crate::clock::Clock;
use crate::emergency::{
  AlertReceipt, Dialer, EmergencyAlert, EmergencyError, EmergencyNotifier, NewContact,
};
use crate::settings::TrackerSettings;
use crate::state::AppState;
use crate::weight::WeightEntry;

/// ---------------------------------------------------------------------------
/// Clock
/// ---------------------------------------------------------------------------

pub struct ManualClock {
  now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      now: Mutex::new(start),
    }
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.now.lock().unwrap();
    *now += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().unwrap()
  }
}

/// Fixed instant used across tests: 2025-11-09 09:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 11, 9, 9, 0, 0).unwrap()
}

/// ---------------------------------------------------------------------------
/// External Collaborators
/// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
  pub alerts: Mutex<Vec<EmergencyAlert>>,
}

impl RecordingNotifier {
  pub fn count(&self) -> usize {
    self.alerts.lock().unwrap().len()
  }

  pub fn last(&self) -> Option<EmergencyAlert> {
    self.alerts.lock().unwrap().last().cloned()
  }
}

impl EmergencyNotifier for RecordingNotifier {
  fn notify_emergency_contacts(&self, alert: &EmergencyAlert) -> Result<AlertReceipt, EmergencyError> {
    self.alerts.lock().unwrap().push(alert.clone());
    Ok(AlertReceipt {
      contacts_notified: alert.contacts.len(),
      hospital: "Test Hospital".into(),
      hotline: "000".into(),
    })
  }
}

#[derive(Default)]
pub struct RecordingDialer {
  pub calls: Mutex<Vec<String>>,
}

impl RecordingDialer {
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

impl Dialer for RecordingDialer {
  fn place_call(&self, number: &str) -> Result<(), EmergencyError> {
    self.calls.lock().unwrap().push(number.to_string());
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// App State
/// ---------------------------------------------------------------------------

pub struct TestHarness {
  pub state: AppState,
  pub clock: Arc<ManualClock>,
  pub notifier: Arc<RecordingNotifier>,
  pub dialer: Arc<RecordingDialer>,
}

/// Build an `AppState` wired to a manual clock and recording services
pub fn setup_test_state() -> TestHarness {
  setup_test_state_with(TrackerSettings::default())
}

pub fn setup_test_state_with(settings: TrackerSettings) -> TestHarness {
  let clock = Arc::new(ManualClock::new(fixed_now()));
  let notifier = Arc::new(RecordingNotifier::default());
  let dialer = Arc::new(RecordingDialer::default());

  let state = AppState::with_services(settings, clock.clone(), notifier.clone(), dialer.clone());

  TestHarness {
    state,
    clock,
    notifier,
    dialer,
  }
}

/// ---------------------------------------------------------------------------
/// Sample Data
/// ---------------------------------------------------------------------------

pub fn sample_contact(name: &str, phone: &str) -> NewContact {
  NewContact {
    name: name.into(),
    relationship: "Spouse".into(),
    phone: phone.into(),
    email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
  }
}

pub fn sample_appointment(title: &str, date: &str) -> AppointmentDraft {
  AppointmentDraft {
    title: title.into(),
    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
    location: "Women's Health Center".into(),
    doctor: "Dr. Adebayo Smith".into(),
    notes: "Anatomy scan".into(),
  }
}

/// The five weigh-ins the weight screen starts with
pub fn sample_weight_entries() -> Vec<WeightEntry> {
  [
    ("2024-09-15", 65.0, 12),
    ("2024-10-01", 67.0, 16),
    ("2024-10-15", 69.0, 18),
    ("2024-11-01", 71.0, 22),
    ("2024-11-13", 73.0, 24),
  ]
  .into_iter()
  .map(|(date, weight_kg, week)| WeightEntry {
    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    weight_kg,
    week,
  })
  .collect()
}
