//! Tracker thresholds and their environment overrides
//!
//! Every number the trackers compare against lives here so a build for a
//! different clinical guideline only has to change `.env`.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_KICK_TARGET: u32 = 10;
pub const DEFAULT_KICK_WINDOW_SECONDS: u64 = 7200;
pub const DEFAULT_CONTRACTION_WINDOW: usize = 5;
pub const DEFAULT_LABOR_THRESHOLD_MINUTES: i64 = 5;
pub const DEFAULT_CRITICAL_SYMPTOM_THRESHOLD: usize = 2;
pub const DEFAULT_HOSPITAL_BAG_WEEK: u8 = 36;
pub const DEFAULT_LABOUR_WATCH_WEEK: u8 = 37;
pub const DEFAULT_FULL_TERM_WEEKS: u8 = 40;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum SettingsError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: String, value: String },

  #[error("Out of range for {key}: {value}")]
  OutOfRange { key: String, value: String },
}

// ---------------------------------------------------------------------------
// Tracker Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSettings {
  /// Kicks needed to close a counting session
  pub kick_target: u32,
  /// Sessions finished within this many seconds are healthy
  pub kick_window_seconds: u64,
  /// How many recent contractions feed the interval average
  pub contraction_window: usize,
  /// Average interval (minutes) at or below which labor is flagged
  pub labor_threshold_minutes: i64,
  /// Simultaneous critical labor symptoms that raise the urgent alert
  pub critical_symptom_threshold: usize,
  pub hospital_bag_week: u8,
  pub labour_watch_week: u8,
  pub full_term_weeks: u8,
  pub tick_interval_ms: u64,
}

impl Default for TrackerSettings {
  fn default() -> Self {
    Self {
      kick_target: DEFAULT_KICK_TARGET,
      kick_window_seconds: DEFAULT_KICK_WINDOW_SECONDS,
      contraction_window: DEFAULT_CONTRACTION_WINDOW,
      labor_threshold_minutes: DEFAULT_LABOR_THRESHOLD_MINUTES,
      critical_symptom_threshold: DEFAULT_CRITICAL_SYMPTOM_THRESHOLD,
      hospital_bag_week: DEFAULT_HOSPITAL_BAG_WEEK,
      labour_watch_week: DEFAULT_LABOUR_WATCH_WEEK,
      full_term_weeks: DEFAULT_FULL_TERM_WEEKS,
      tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
    }
  }
}

impl TrackerSettings {
  /// Load settings from `.env` and the process environment.
  ///
  /// Unset variables keep their defaults.
  pub fn from_env() -> Result<Self, SettingsError> {
    dotenvy::dotenv().ok();

    let defaults = Self::default();
    let settings = Self {
      kick_target: read_var("MATERNAL_KICK_TARGET", defaults.kick_target)?,
      kick_window_seconds: read_var("MATERNAL_KICK_WINDOW_SECONDS", defaults.kick_window_seconds)?,
      contraction_window: read_var("MATERNAL_CONTRACTION_WINDOW", defaults.contraction_window)?,
      labor_threshold_minutes: read_var(
        "MATERNAL_LABOR_THRESHOLD_MINUTES",
        defaults.labor_threshold_minutes,
      )?,
      critical_symptom_threshold: read_var(
        "MATERNAL_CRITICAL_SYMPTOM_THRESHOLD",
        defaults.critical_symptom_threshold,
      )?,
      hospital_bag_week: read_var("MATERNAL_HOSPITAL_BAG_WEEK", defaults.hospital_bag_week)?,
      labour_watch_week: read_var("MATERNAL_LABOUR_WATCH_WEEK", defaults.labour_watch_week)?,
      full_term_weeks: read_var("MATERNAL_FULL_TERM_WEEKS", defaults.full_term_weeks)?,
      tick_interval_ms: read_var("MATERNAL_TICK_INTERVAL_MS", defaults.tick_interval_ms)?,
    };

    settings.validate()?;
    Ok(settings)
  }

  fn validate(&self) -> Result<(), SettingsError> {
    let checks = [
      ("MATERNAL_KICK_TARGET", self.kick_target as u64),
      ("MATERNAL_CONTRACTION_WINDOW", self.contraction_window as u64),
      ("MATERNAL_FULL_TERM_WEEKS", self.full_term_weeks as u64),
      ("MATERNAL_TICK_INTERVAL_MS", self.tick_interval_ms),
    ];

    for (key, value) in checks {
      if value == 0 {
        return Err(SettingsError::OutOfRange {
          key: key.into(),
          value: value.to_string(),
        });
      }
    }

    // A two-point window cannot produce an interval
    if self.contraction_window < 2 {
      return Err(SettingsError::OutOfRange {
        key: "MATERNAL_CONTRACTION_WINDOW".into(),
        value: self.contraction_window.to_string(),
      });
    }

    Ok(())
  }
}

fn read_var<T: FromStr>(key: &str, default: T) -> Result<T, SettingsError> {
  match env::var(key) {
    Ok(raw) => raw.trim().parse().map_err(|_| SettingsError::Invalid {
      key: key.into(),
      value: raw,
    }),
    Err(_) => Ok(default),
  }
}
