pub mod appointments;
pub mod checklist;
pub mod clock;
pub mod commands;
pub mod contractions;
pub mod cycle;
pub mod emergency;
pub mod feeding;
pub mod kicks;
pub mod pregnancy;
pub mod settings;
pub mod state;
pub mod stats;
pub mod symptoms;
pub mod weight;

#[cfg(test)]
mod test_utils;

pub use settings::{SettingsError, TrackerSettings};
pub use state::AppState;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level. Calling this twice is harmless.
pub fn init_tracing() {
  let _ = tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with(tracing_subscriber::fmt::layer().with_target(true).with_line_number(true))
    .try_init();
}

/// Start logging and build the application state from `.env` and the
/// environment.
pub fn init() -> Result<AppState, SettingsError> {
  init_tracing();

  let settings = TrackerSettings::from_env()?;
  tracing::info!(?settings, "tracker settings loaded");
  Ok(AppState::new(settings))
}

/// Print the dashboard as JSON; the entry point for the `maternal-log`
/// binary.
pub fn run() -> Result<(), String> {
  let state = init().map_err(|e| e.to_string())?;
  let dashboard = commands::get_dashboard(&state)?;
  let cycle = commands::cycle::get_cycle_summary(&state)?;

  let out = serde_json::json!({
    "dashboard": dashboard,
    "cycle": cycle,
  });
  println!("{}", serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?);
  Ok(())
}
