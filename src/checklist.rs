//! Packing checklists and their completion ratios

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum ChecklistError {
  #[error("Duplicate item id {id} in category {category}")]
  DuplicateItem { category: String, id: String },

  #[error("Unknown category: {0}")]
  UnknownCategory(String),

  #[error("Unknown item {id} in category {category}")]
  UnknownItem { category: String, id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
  pub id: String,
  pub name: String,
  pub checked: bool,
}

impl ChecklistItem {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      checked: false,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
  pub checked_count: usize,
  pub total: usize,
  /// 0 when there are no items
  pub percentage: f64,
}

pub fn category_progress(items: &[ChecklistItem]) -> Progress {
  let checked_count = items.iter().filter(|item| item.checked).count();
  let total = items.len();
  let percentage = if total > 0 {
    (checked_count as f64 / total as f64) * 100.0
  } else {
    0.0
  };

  Progress {
    checked_count,
    total,
    percentage,
  }
}

pub fn overall_progress(categories: &[ChecklistCategory]) -> Progress {
  let all: Vec<ChecklistItem> = categories
    .iter()
    .flat_map(|c| c.items.iter().cloned())
    .collect();
  category_progress(&all)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCategory {
  pub key: String,
  pub title: String,
  items: Vec<ChecklistItem>,
}

impl ChecklistCategory {
  pub fn new(
    key: impl Into<String>,
    title: impl Into<String>,
    items: Vec<ChecklistItem>,
  ) -> Result<Self, ChecklistError> {
    let key = key.into();
    let mut seen = HashSet::new();
    for item in &items {
      if !seen.insert(item.id.as_str()) {
        return Err(ChecklistError::DuplicateItem {
          category: key,
          id: item.id.clone(),
        });
      }
    }

    Ok(Self {
      key,
      title: title.into(),
      items,
    })
  }

  pub fn items(&self) -> &[ChecklistItem] {
    &self.items
  }

  pub fn progress(&self) -> Progress {
    category_progress(&self.items)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
  pub key: String,
  pub title: String,
  pub progress: Progress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistReport {
  pub overall: Progress,
  pub categories: Vec<CategoryReport>,
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
  categories: Vec<ChecklistCategory>,
}

impl Checklist {
  pub fn new(categories: Vec<ChecklistCategory>) -> Self {
    Self { categories }
  }

  pub fn categories(&self) -> &[ChecklistCategory] {
    &self.categories
  }

  /// Flip an item and return its new checked state
  pub fn toggle(&mut self, category: &str, item_id: &str) -> Result<bool, ChecklistError> {
    let cat = self
      .categories
      .iter_mut()
      .find(|c| c.key == category)
      .ok_or_else(|| ChecklistError::UnknownCategory(category.to_string()))?;

    let item = cat
      .items
      .iter_mut()
      .find(|i| i.id == item_id)
      .ok_or_else(|| ChecklistError::UnknownItem {
        category: category.to_string(),
        id: item_id.to_string(),
      })?;

    item.checked = !item.checked;
    Ok(item.checked)
  }

  pub fn overall_progress(&self) -> Progress {
    overall_progress(&self.categories)
  }

  pub fn report(&self) -> ChecklistReport {
    ChecklistReport {
      overall: self.overall_progress(),
      categories: self
        .categories
        .iter()
        .map(|c| CategoryReport {
          key: c.key.clone(),
          title: c.title.clone(),
          progress: c.progress(),
        })
        .collect(),
    }
  }

  /// The hospital bag list offered from week 36
  pub fn hospital_bag() -> Self {
    let seed: [(&str, &str, &[&str]); 4] = [
      (
        "for_mom",
        "For Mom",
        &[
          "Government-issued ID",
          "Insurance card",
          "Birth plan copies",
          "Maternity pads",
          "Comfortable going-home outfit",
          "Nursing bras",
          "Toiletries (toothbrush, shampoo, etc.)",
          "Phone charger",
          "Slippers/comfortable shoes",
          "Robe or comfortable clothes",
        ],
      ),
      (
        "for_baby",
        "For Baby",
        &[
          "Car seat (must have to leave)",
          "Going-home outfit",
          "Baby blanket",
          "Diapers (hospital usually provides)",
          "Baby wipes",
          "Pacifiers (if using)",
          "Baby mittens",
          "Onesies (2-3)",
        ],
      ),
      (
        "for_partner",
        "For Partner",
        &[
          "Snacks and drinks",
          "Change of clothes",
          "Phone charger",
          "Entertainment (book, tablet)",
          "Camera",
        ],
      ),
      (
        "extras",
        "Extras",
        &[
          "Massage oil",
          "Music playlist",
          "Pillow from home",
          "Breast pump",
          "Nipple cream",
        ],
      ),
    ];

    // Ids run across categories, so they are unique within each one
    let mut next_id = 1;
    let categories = seed
      .iter()
      .map(|(key, title, names)| {
        let items = names
          .iter()
          .map(|name| {
            let item = ChecklistItem::new(next_id.to_string(), *name);
            next_id += 1;
            item
          })
          .collect();
        ChecklistCategory {
          key: key.to_string(),
          title: title.to_string(),
          items,
        }
      })
      .collect();

    Self { categories }
  }
}
