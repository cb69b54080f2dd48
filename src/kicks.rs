//! Fetal kick counting
//!
//! A session counts movements until the target (10) is reached and then
//! classifies how long that took. Ten movements within two hours is the
//! healthy reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::elapsed_seconds;
use crate::settings::{TrackerSettings, DEFAULT_KICK_TARGET, DEFAULT_KICK_WINDOW_SECONDS};
use crate::stats::rounded_mean_or_zero;

// ---------------------------------------------------------------------------
// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum KickError {
  #[error("No kick counting session in progress")]
  NotTracking,
}

// ---------------------------------------------------------------------------
// Session Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickClassification {
  Healthy,
  Slow,
}

impl KickClassification {
  pub fn as_str(&self) -> &'static str {
    match self {
      KickClassification::Healthy => "healthy",
      KickClassification::Slow => "slow",
    }
  }
}

/// Thresholds a session is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickRules {
  pub target: u32,
  pub window_seconds: u64,
}

impl Default for KickRules {
  fn default() -> Self {
    Self {
      target: DEFAULT_KICK_TARGET,
      window_seconds: DEFAULT_KICK_WINDOW_SECONDS,
    }
  }
}

impl From<&TrackerSettings> for KickRules {
  fn from(settings: &TrackerSettings) -> Self {
    Self {
      target: settings.kick_target,
      window_seconds: settings.kick_window_seconds,
    }
  }
}

impl KickRules {
  pub fn is_complete(&self, count: u32) -> bool {
    count >= self.target
  }

  /// Inclusive on the window boundary
  pub fn classify(&self, duration_seconds: u64) -> KickClassification {
    if duration_seconds <= self.window_seconds {
      KickClassification::Healthy
    } else {
      KickClassification::Slow
    }
  }
}

pub fn record_kick(count: u32) -> u32 {
  count.saturating_add(1)
}

pub fn is_complete(count: u32) -> bool {
  KickRules::default().is_complete(count)
}

pub fn classify(duration_seconds: u64) -> KickClassification {
  KickRules::default().classify(duration_seconds)
}

// ---------------------------------------------------------------------------
// Session Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KickSessionRecord {
  pub recorded_at: DateTime<Utc>,
  pub kicks: u32,
  pub duration_seconds: u64,
  pub classification: KickClassification,
}

impl KickSessionRecord {
  pub fn duration_minutes(&self) -> u64 {
    self.duration_seconds / 60
  }

  /// Feedback shown when the session closes
  pub fn message(&self) -> String {
    let minutes = self.duration_minutes();
    match self.classification {
      KickClassification::Healthy => format!(
        "Great! Baby kicked {} times in {} minutes.\n\nThis is healthy fetal movement. Baby is active and well!",
        self.kicks, minutes
      ),
      KickClassification::Slow => format!(
        "Session completed: {} kicks in {} minutes.\n\nNote: It took longer than 2 hours to feel 10 movements. If this continues, consult your healthcare provider.",
        self.kicks, minutes
      ),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KickProgress {
  Counting { kicks: u32, remaining: u32 },
  Completed { record: KickSessionRecord, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveKickSession {
  pub started_at: DateTime<Utc>,
  pub kicks: u32,
}

// ---------------------------------------------------------------------------
// Kick Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct KickTracker {
  rules: KickRules,
  active: Option<ActiveKickSession>,
  /// Newest first
  history: Vec<KickSessionRecord>,
}

impl KickTracker {
  pub fn new(rules: KickRules) -> Self {
    Self {
      rules,
      active: None,
      history: Vec::new(),
    }
  }

  pub fn with_history(rules: KickRules, history: Vec<KickSessionRecord>) -> Self {
    Self {
      rules,
      active: None,
      history,
    }
  }

  pub fn rules(&self) -> KickRules {
    self.rules
  }

  /// Begin a new session, discarding any one in progress
  pub fn start(&mut self, now: DateTime<Utc>) -> ActiveKickSession {
    let session = ActiveKickSession {
      started_at: now,
      kicks: 0,
    };
    self.active = Some(session);
    tracing::info!(started_at = %now, "kick session started");
    session
  }

  pub fn active(&self) -> Option<&ActiveKickSession> {
    self.active.as_ref()
  }

  pub fn record_kick(&mut self, now: DateTime<Utc>) -> Result<KickProgress, KickError> {
    let session = self.active.as_mut().ok_or(KickError::NotTracking)?;
    session.kicks = record_kick(session.kicks);

    if !self.rules.is_complete(session.kicks) {
      return Ok(KickProgress::Counting {
        kicks: session.kicks,
        remaining: self.rules.target - session.kicks,
      });
    }

    let duration_seconds = elapsed_seconds(session.started_at, now);
    let record = KickSessionRecord {
      recorded_at: now,
      kicks: session.kicks,
      duration_seconds,
      classification: self.rules.classify(duration_seconds),
    };

    tracing::info!(
      kicks = record.kicks,
      duration_seconds,
      classification = record.classification.as_str(),
      "kick session completed"
    );

    self.history.insert(0, record.clone());
    self.active = None;

    Ok(KickProgress::Completed {
      message: record.message(),
      record,
    })
  }

  pub fn reset(&mut self) {
    if self.active.take().is_some() {
      tracing::debug!("kick session reset");
    }
  }

  pub fn history(&self) -> &[KickSessionRecord] {
    &self.history
  }

  pub fn average_kicks(&self) -> i64 {
    let kicks: Vec<f64> = self.history.iter().map(|s| s.kicks as f64).collect();
    rounded_mean_or_zero(&kicks)
  }

  pub fn average_duration_minutes(&self) -> i64 {
    let minutes: Vec<f64> = self
      .history
      .iter()
      .map(|s| s.duration_minutes() as f64)
      .collect();
    rounded_mean_or_zero(&minutes)
  }
}
