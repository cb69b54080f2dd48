//! Hospital bag commands

use crate::checklist::ChecklistReport;
use crate::state::{lock, AppState};

pub fn get_hospital_bag(state: &AppState) -> Result<ChecklistReport, String> {
  Ok(lock(&state.hospital_bag)?.report())
}

pub fn toggle_hospital_bag_item(
  state: &AppState,
  category: &str,
  item_id: &str,
) -> Result<ChecklistReport, String> {
  let mut bag = lock(&state.hospital_bag)?;
  let checked = bag.toggle(category, item_id).map_err(|e| e.to_string())?;

  tracing::debug!(category, item_id, checked, "hospital bag item toggled");
  Ok(bag.report())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[test]
  fn test_toggle_updates_report() {
    let h = setup_test_state();

    let report = toggle_hospital_bag_item(&h.state, "for_partner", "23").unwrap();
    assert_eq!(report.overall.checked_count, 1);
    assert_eq!(report.overall.total, 28);

    let partner = report
      .categories
      .iter()
      .find(|c| c.key == "for_partner")
      .unwrap();
    assert_eq!(partner.progress.percentage, 20.0);
  }

  #[test]
  fn test_toggle_unknown_item() {
    let h = setup_test_state();
    let err = toggle_hospital_bag_item(&h.state, "for_mom", "99").unwrap_err();
    assert_eq!(err, "Unknown item 99 in category for_mom");
  }
}
