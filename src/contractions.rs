//! Contraction timing and the 5-1-1 early warning
//!
//! Contractions are appended in the order they are timed and never edited.
//! Interval statistics only look at the most recent few so an early, slow
//! phase of labour does not mask a recent speed-up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::elapsed_seconds;
use crate::settings::{DEFAULT_CONTRACTION_WINDOW, DEFAULT_LABOR_THRESHOLD_MINUTES};
use crate::stats::{mean, round_half_up, rounded_mean_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionEvent {
  pub start_time: DateTime<Utc>,
  pub duration_seconds: u64,
}

// ---------------------------------------------------------------------------
// Pure Calculations
// ---------------------------------------------------------------------------

/// Mean gap in whole minutes between consecutive starts of the last
/// `window` events, rounded half-up. `None` with fewer than two events.
pub fn average_interval_over(events: &[ContractionEvent], window: usize) -> Option<i64> {
  if events.len() < 2 {
    return None;
  }

  let recent = &events[events.len().saturating_sub(window)..];
  let gaps: Vec<f64> = recent
    .windows(2)
    .map(|pair| (pair[1].start_time - pair[0].start_time).num_minutes() as f64)
    .collect();

  mean(&gaps).map(round_half_up)
}

pub fn average_interval(events: &[ContractionEvent]) -> Option<i64> {
  average_interval_over(events, DEFAULT_CONTRACTION_WINDOW)
}

/// Mean duration over every recorded contraction, 0 when there are none
pub fn average_duration(events: &[ContractionEvent]) -> i64 {
  let durations: Vec<f64> = events.iter().map(|e| e.duration_seconds as f64).collect();
  rounded_mean_or_zero(&durations)
}

pub fn labor_threshold_reached_at(avg_interval: Option<i64>, threshold_minutes: i64) -> bool {
  matches!(avg_interval, Some(minutes) if minutes <= threshold_minutes)
}

pub fn labor_threshold_reached(avg_interval: Option<i64>) -> bool {
  labor_threshold_reached_at(avg_interval, DEFAULT_LABOR_THRESHOLD_MINUTES)
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractionStats {
  pub count: usize,
  pub average_interval_minutes: Option<i64>,
  pub average_duration_seconds: i64,
  pub labor_threshold_reached: bool,
}

#[derive(Debug, Clone)]
pub struct ContractionTimer {
  window: usize,
  threshold_minutes: i64,
  started_at: Option<DateTime<Utc>>,
  events: Vec<ContractionEvent>,
}

impl Default for ContractionTimer {
  fn default() -> Self {
    Self::new(DEFAULT_CONTRACTION_WINDOW, DEFAULT_LABOR_THRESHOLD_MINUTES)
  }
}

impl ContractionTimer {
  pub fn new(window: usize, threshold_minutes: i64) -> Self {
    Self {
      window,
      threshold_minutes,
      started_at: None,
      events: Vec::new(),
    }
  }

  pub fn is_timing(&self) -> bool {
    self.started_at.is_some()
  }

  pub fn started_at(&self) -> Option<DateTime<Utc>> {
    self.started_at
  }

  pub fn start(&mut self, now: DateTime<Utc>) {
    self.started_at = Some(now);
    tracing::debug!(started_at = %now, "contraction timing started");
  }

  /// Close the running contraction. Without a start this does nothing.
  pub fn stop(&mut self, now: DateTime<Utc>) -> Option<ContractionEvent> {
    let start_time = self.started_at.take()?;
    let event = ContractionEvent {
      start_time,
      duration_seconds: elapsed_seconds(start_time, now),
    };
    self.events.push(event);

    tracing::info!(
      duration_seconds = event.duration_seconds,
      total = self.events.len(),
      "contraction recorded"
    );

    if self.threshold_reached() {
      tracing::warn!(
        average_interval_minutes = ?self.average_interval(),
        "contractions are {} minutes apart or less",
        self.threshold_minutes
      );
    }

    Some(event)
  }

  pub fn events(&self) -> &[ContractionEvent] {
    &self.events
  }

  /// Last `n` events, newest first
  pub fn recent(&self, n: usize) -> Vec<ContractionEvent> {
    self.events.iter().rev().take(n).copied().collect()
  }

  pub fn average_interval(&self) -> Option<i64> {
    average_interval_over(&self.events, self.window)
  }

  pub fn average_duration(&self) -> i64 {
    average_duration(&self.events)
  }

  pub fn threshold_reached(&self) -> bool {
    labor_threshold_reached_at(self.average_interval(), self.threshold_minutes)
  }

  pub fn stats(&self) -> ContractionStats {
    ContractionStats {
      count: self.events.len(),
      average_interval_minutes: self.average_interval(),
      average_duration_seconds: self.average_duration(),
      labor_threshold_reached: self.threshold_reached(),
    }
  }
}
