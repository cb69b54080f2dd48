//! Postpartum feeding sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::rounded_mean_or_zero;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingSide {
  Left,
  Right,
  Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSession {
  pub id: u64,
  pub time: DateTime<Utc>,
  pub duration_minutes: u32,
  pub side: FeedingSide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedingStats {
  pub sessions: usize,
  pub total_minutes: u64,
  pub average_minutes: i64,
}

/// Newest first, like the feeding screen lists them
#[derive(Debug, Clone, Default)]
pub struct FeedingLog {
  sessions: Vec<FeedingSession>,
}

impl FeedingLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, time: DateTime<Utc>, duration_minutes: u32, side: FeedingSide) -> FeedingSession {
    let session = FeedingSession {
      id: self.sessions.len() as u64 + 1,
      time,
      duration_minutes,
      side,
    };
    self.sessions.insert(0, session.clone());
    tracing::info!(duration_minutes, side = ?side, "feeding recorded");
    session
  }

  pub fn sessions(&self) -> &[FeedingSession] {
    &self.sessions
  }

  pub fn total_minutes(&self) -> u64 {
    self.sessions.iter().map(|s| s.duration_minutes as u64).sum()
  }

  pub fn average_minutes(&self) -> i64 {
    let minutes: Vec<f64> = self.sessions.iter().map(|s| s.duration_minutes as f64).collect();
    rounded_mean_or_zero(&minutes)
  }

  pub fn stats(&self) -> FeedingStats {
    FeedingStats {
      sessions: self.sessions.len(),
      total_minutes: self.total_minutes(),
      average_minutes: self.average_minutes(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_feeding_totals() {
    let now = Utc::now();
    let mut log = FeedingLog::new();
    log.record(now - Duration::hours(4), 25, FeedingSide::Right);
    log.record(now - Duration::hours(2), 20, FeedingSide::Left);

    let stats = log.stats();
    assert_eq!(stats.sessions, 2);
    assert_eq!(stats.total_minutes, 45);
    // 22.5 -> 23
    assert_eq!(stats.average_minutes, 23);
    assert_eq!(log.sessions()[0].side, FeedingSide::Left);
  }

  #[test]
  fn test_feeding_empty() {
    let log = FeedingLog::new();
    assert_eq!(log.average_minutes(), 0);
    assert_eq!(log.total_minutes(), 0);
  }
}
