//! Time source and the elapsed-time ticker used by the live timers
//!
//! The kick counter and contraction timer show a running clock. The ticker
//! behind it is a single tokio task that must die with the session; it is
//! aborted on `stop()` and again on drop.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Whole seconds between `started_at` and `now`, never negative
pub fn elapsed_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
  (now - started_at).num_seconds().max(0) as u64
}

// ---------------------------------------------------------------------------
// Elapsed Ticker
// ---------------------------------------------------------------------------

pub struct ElapsedTicker {
  handle: Option<JoinHandle<()>>,
  elapsed: watch::Receiver<u64>,
}

impl ElapsedTicker {
  /// Spawn the ticker on the current tokio runtime.
  ///
  /// Publishes elapsed seconds since `started_at` once per `period`.
  pub fn start(clock: Arc<dyn Clock>, started_at: DateTime<Utc>, period: Duration) -> Self {
    let (tx, rx) = watch::channel(elapsed_seconds(started_at, clock.now()));

    let handle = tokio::spawn(async move {
      let mut interval = tokio::time::interval(period);

      // First tick completes immediately; the initial value is already sent
      interval.tick().await;

      loop {
        interval.tick().await;
        let secs = elapsed_seconds(started_at, clock.now());
        if tx.send(secs).is_err() {
          // Nobody is watching any more
          break;
        }
      }
    });

    tracing::debug!(?period, "elapsed ticker started");

    Self {
      handle: Some(handle),
      elapsed: rx,
    }
  }

  /// Latest published elapsed seconds
  pub fn elapsed(&self) -> u64 {
    *self.elapsed.borrow()
  }

  /// A receiver the UI can await for display updates
  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.elapsed.clone()
  }

  pub fn is_running(&self) -> bool {
    self.handle.as_ref().is_some_and(|h| !h.is_finished())
  }

  pub fn stop(&mut self) {
    if let Some(handle) = self.handle.take() {
      handle.abort();
      tracing::debug!("elapsed ticker stopped");
    }
  }
}

impl Drop for ElapsedTicker {
  fn drop(&mut self) {
    self.stop();
  }
}
