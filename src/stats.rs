//! Small numeric helpers shared by the trackers

/// Round half away from negative infinity (`floor(x + 0.5)`).
///
/// Every displayed average in the app uses this rule, so 4.5 rounds to 5
/// and -4.5 rounds to -4.
pub fn round_half_up(value: f64) -> i64 {
  (value + 0.5).floor() as i64
}

/// Arithmetic mean, `None` for an empty input
pub fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean rounded half-up, 0 when there is nothing to average
pub fn rounded_mean_or_zero(values: &[f64]) -> i64 {
  mean(values).map(round_half_up).unwrap_or(0)
}
