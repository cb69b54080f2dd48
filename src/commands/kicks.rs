//! Kick counter commands
//!
//! Starting a session also starts the elapsed-time ticker; completing or
//! resetting the session stops it.

use serde::Serialize;

use crate::clock::{elapsed_seconds, ElapsedTicker};
use crate::kicks::{ActiveKickSession, KickProgress, KickSessionRecord};
use crate::state::{lock, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct KickHistory {
  pub sessions: Vec<KickSessionRecord>,
  pub average_kicks: i64,
  pub average_duration_minutes: i64,
}

/// Must be called from within the tokio runtime
pub async fn start_kick_session(state: &AppState) -> Result<ActiveKickSession, String> {
  let mut screen = lock(&state.kicks)?;
  let now = state.clock.now();
  let session = screen.tracker.start(now);

  // Replacing the ticker drops (and aborts) any previous one
  screen.ticker = Some(ElapsedTicker::start(
    state.clock.clone(),
    now,
    state.tick_period(),
  ));

  Ok(session)
}

pub fn record_kick(state: &AppState) -> Result<KickProgress, String> {
  let mut screen = lock(&state.kicks)?;
  let progress = screen
    .tracker
    .record_kick(state.clock.now())
    .map_err(|e| e.to_string())?;

  if matches!(progress, KickProgress::Completed { .. }) {
    if let Some(mut ticker) = screen.ticker.take() {
      ticker.stop();
    }
  }

  Ok(progress)
}

pub fn reset_kick_session(state: &AppState) -> Result<(), String> {
  let mut screen = lock(&state.kicks)?;
  screen.tracker.reset();
  if let Some(mut ticker) = screen.ticker.take() {
    ticker.stop();
  }
  Ok(())
}

/// Seconds since the session started, 0 when idle
pub fn get_kick_elapsed(state: &AppState) -> Result<u64, String> {
  let screen = lock(&state.kicks)?;
  Ok(
    screen
      .tracker
      .active()
      .map(|s| elapsed_seconds(s.started_at, state.clock.now()))
      .unwrap_or(0),
  )
}

pub fn get_kick_history(state: &AppState) -> Result<KickHistory, String> {
  let screen = lock(&state.kicks)?;
  Ok(KickHistory {
    sessions: screen.tracker.history().to_vec(),
    average_kicks: screen.tracker.average_kicks(),
    average_duration_minutes: screen.tracker.average_duration_minutes(),
  })
}
