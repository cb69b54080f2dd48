//! Postpartum feeding commands

use crate::feeding::{FeedingSession, FeedingSide, FeedingStats};
use crate::state::{lock, AppState};

pub fn record_feeding(state: &AppState, duration_minutes: u32, side: FeedingSide) -> Result<FeedingSession, String> {
  if duration_minutes == 0 {
    return Err("Feeding duration must be at least one minute".into());
  }
  Ok(lock(&state.feeding)?.record(state.clock.now(), duration_minutes, side))
}

pub fn get_feeding_sessions(state: &AppState) -> Result<Vec<FeedingSession>, String> {
  Ok(lock(&state.feeding)?.sessions().to_vec())
}

pub fn get_feeding_stats(state: &AppState) -> Result<FeedingStats, String> {
  Ok(lock(&state.feeding)?.stats())
}
