//! Symptom logging and urgent-alert triage
//!
//! Two independent triggers live here:
//! - the per-entry trigger used by the pregnancy, postpartum and baby
//!   loggers, which fires as soon as one dangerous symptom is logged;
//! - the labour-watch trigger, which fires when enough critical symptoms
//!   are selected at the same time.
//!
//! The `dangerous` flag is copied onto each entry when it is logged and is
//! never re-evaluated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_CRITICAL_SYMPTOM_THRESHOLD;

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum SymptomError {
  #[error("Symptom name is required")]
  EmptyName,

  #[error("Unknown labour symptom: {0}")]
  UnknownLaborSymptom(String),
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
  pub name: &'static str,
  pub dangerous: bool,
}

const fn entry(name: &'static str, dangerous: bool) -> CatalogEntry {
  CatalogEntry { name, dangerous }
}

const PREGNANCY: &[CatalogEntry] = &[
  entry("Headache", false),
  entry("Nausea", false),
  entry("Back Pain", false),
  entry("Swelling", false),
  entry("Fatigue", false),
  entry("Severe Headache", true),
  entry("Vision Changes", true),
  entry("Vaginal Bleeding", true),
  entry("Severe Abdominal Pain", true),
  entry("Decreased Fetal Movement", true),
  entry("Chest Pain", true),
  entry("Difficulty Breathing", true),
  entry("Severe Swelling", true),
];

const POSTPARTUM: &[CatalogEntry] = &[
  entry("Mild Cramping", false),
  entry("Breast Tenderness", false),
  entry("Fatigue", false),
  entry("Mood Changes", false),
  entry("Constipation", false),
  entry("Night Sweats", false),
  entry("Heavy Bleeding (soaking pad in 1 hour)", true),
  entry("Severe Headache", true),
  entry("Fever over 100.4°F", true),
  entry("Severe Abdominal Pain", true),
  entry("Chest Pain or Shortness of Breath", true),
  entry("Red/Swollen/Painful Leg", true),
  entry("Severe Depression/Anxiety", true),
  entry("Thoughts of Harming Self/Baby", true),
  entry("Infected C-Section/Episiotomy Site", true),
];

const BABY: &[CatalogEntry] = &[
  entry("Fussy/Crying", false),
  entry("Mild Fever (99-100°F)", false),
  entry("Diaper Rash", false),
  entry("Gas/Colic", false),
  entry("Stuffy Nose", false),
  entry("High Fever (over 100.4°F)", true),
  entry("Difficulty Breathing", true),
  entry("Not Feeding Well", true),
  entry("Excessive Vomiting", true),
  entry("Lethargic/Unresponsive", true),
  entry("Bluish Skin Color", true),
  entry("Seizure/Convulsions", true),
  entry("Severe Diarrhea", true),
  entry("Continuous Crying (3+ hours)", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCatalog {
  Pregnancy,
  Postpartum,
  Baby,
}

impl SymptomCatalog {
  pub fn entries(&self) -> &'static [CatalogEntry] {
    match self {
      SymptomCatalog::Pregnancy => PREGNANCY,
      SymptomCatalog::Postpartum => POSTPARTUM,
      SymptomCatalog::Baby => BABY,
    }
  }

  /// Exact, case-sensitive lookup
  pub fn lookup(&self, name: &str) -> Option<&'static CatalogEntry> {
    self.entries().iter().find(|e| e.name == name)
  }

  /// Unknown names are never dangerous
  pub fn is_dangerous(&self, name: &str) -> bool {
    self.lookup(name).is_some_and(|e| e.dangerous)
  }

  /// Alert text shown when a dangerous symptom is logged
  pub fn urgent_message(&self, name: &str) -> String {
    match self {
      SymptomCatalog::Pregnancy | SymptomCatalog::Postpartum => format!(
        "URGENT ALERT\n\n\"{}\" is a potentially serious symptom.\n\nAction Required:\n- Call your healthcare provider immediately\n- Emergency contacts have been notified\n- Nearest hospital: {}\n\nIf this is an emergency, call {} now.",
        name,
        crate::emergency::NEAREST_HOSPITAL,
        crate::emergency::EMERGENCY_NUMBER
      ),
      SymptomCatalog::Baby => format!(
        "URGENT: \"{}\" needs immediate attention.\n\nCall {} now, or contact your pediatrician at {}.",
        name,
        crate::emergency::EMERGENCY_NUMBER,
        crate::emergency::PEDIATRICIAN_NUMBER
      ),
    }
  }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  Mild,
  Moderate,
  Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
  pub id: u64,
  pub name: String,
  pub severity: Severity,
  pub dangerous: bool,
  pub timestamp: DateTime<Utc>,
  pub notes: Option<String>,
}

/// Append a new entry with its danger flag taken from the catalog now
pub fn log_symptom(
  catalog: SymptomCatalog,
  name: &str,
  severity: Severity,
  history: &mut Vec<SymptomEntry>,
  now: DateTime<Utc>,
) -> SymptomEntry {
  let entry = SymptomEntry {
    id: history.iter().map(|e| e.id).max().unwrap_or(0) + 1,
    name: name.to_string(),
    severity,
    dangerous: catalog.is_dangerous(name),
    timestamp: now,
    notes: None,
  };
  history.push(entry.clone());
  entry
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedSymptom {
  pub entry: SymptomEntry,
  /// Set when the entry needs the urgent path
  pub urgent_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SymptomLog {
  catalog: SymptomCatalog,
  /// Oldest first
  entries: Vec<SymptomEntry>,
}

impl SymptomLog {
  pub fn new(catalog: SymptomCatalog) -> Self {
    Self {
      catalog,
      entries: Vec::new(),
    }
  }

  pub fn catalog(&self) -> SymptomCatalog {
    self.catalog
  }

  pub fn log(
    &mut self,
    name: &str,
    severity: Severity,
    notes: Option<String>,
    now: DateTime<Utc>,
  ) -> Result<LoggedSymptom, SymptomError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(SymptomError::EmptyName);
    }

    let mut entry = log_symptom(self.catalog, name, severity, &mut self.entries, now);
    let notes = notes.filter(|n| !n.trim().is_empty());
    if notes.is_some() {
      entry.notes = notes.clone();
      if let Some(last) = self.entries.last_mut() {
        last.notes = notes;
      }
    }

    let urgent_message = entry.dangerous.then(|| self.catalog.urgent_message(name));
    if entry.dangerous {
      tracing::warn!(catalog = ?self.catalog, symptom = %entry.name, "dangerous symptom logged");
    } else {
      tracing::info!(catalog = ?self.catalog, symptom = %entry.name, "symptom logged");
    }

    Ok(LoggedSymptom {
      entry,
      urgent_message,
    })
  }

  pub fn entries(&self) -> &[SymptomEntry] {
    &self.entries
  }

  pub fn newest_first(&self) -> Vec<SymptomEntry> {
    self.entries.iter().rev().cloned().collect()
  }

  pub fn count_by_severity(&self, severity: Severity) -> usize {
    self.entries.iter().filter(|e| e.severity == severity).count()
  }

  pub fn dangerous_count(&self) -> usize {
    self.entries.iter().filter(|e| e.dangerous).count()
  }
}

// ---------------------------------------------------------------------------
// Labour Watch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaborSymptom {
  RegularContractions,
  WaterBroke,
  Bleeding,
  SeverePain,
  DecreasedMovement,
  BackPain,
  Pressure,
  Nausea,
  BloodyShow,
}

impl LaborSymptom {
  pub const ALL: [LaborSymptom; 9] = [
    LaborSymptom::RegularContractions,
    LaborSymptom::WaterBroke,
    LaborSymptom::Bleeding,
    LaborSymptom::SeverePain,
    LaborSymptom::DecreasedMovement,
    LaborSymptom::BackPain,
    LaborSymptom::Pressure,
    LaborSymptom::Nausea,
    LaborSymptom::BloodyShow,
  ];

  pub fn id(&self) -> &'static str {
    match self {
      LaborSymptom::RegularContractions => "regular-contractions",
      LaborSymptom::WaterBroke => "water-broke",
      LaborSymptom::Bleeding => "bleeding",
      LaborSymptom::SeverePain => "severe-pain",
      LaborSymptom::DecreasedMovement => "decreased-movement",
      LaborSymptom::BackPain => "back-pain",
      LaborSymptom::Pressure => "pressure",
      LaborSymptom::Nausea => "nausea",
      LaborSymptom::BloodyShow => "bloody-show",
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      LaborSymptom::RegularContractions => "Regular contractions (5 mins apart)",
      LaborSymptom::WaterBroke => "Water broke",
      LaborSymptom::Bleeding => "Heavy bleeding",
      LaborSymptom::SeverePain => "Severe abdominal pain",
      LaborSymptom::DecreasedMovement => "Decreased baby movement",
      LaborSymptom::BackPain => "Lower back pain",
      LaborSymptom::Pressure => "Pelvic pressure",
      LaborSymptom::Nausea => "Nausea",
      LaborSymptom::BloodyShow => "Bloody show (mucus plug)",
    }
  }

  pub fn is_critical(&self) -> bool {
    matches!(
      self,
      LaborSymptom::RegularContractions
        | LaborSymptom::WaterBroke
        | LaborSymptom::Bleeding
        | LaborSymptom::SeverePain
        | LaborSymptom::DecreasedMovement
    )
  }
}

impl std::str::FromStr for LaborSymptom {
  type Err = SymptomError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    LaborSymptom::ALL
      .into_iter()
      .find(|sym| sym.id() == s)
      .ok_or_else(|| SymptomError::UnknownLaborSymptom(s.to_string()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum LaborAlertState {
  #[default]
  Normal,
  UrgentAlertShown,
}

#[derive(Debug, Clone)]
pub struct LaborWatch {
  threshold: usize,
  /// Current, unconfirmed selection in the order it was made
  selected: Vec<LaborSymptom>,
  state: LaborAlertState,
}

impl Default for LaborWatch {
  fn default() -> Self {
    Self::new(DEFAULT_CRITICAL_SYMPTOM_THRESHOLD)
  }
}

impl LaborWatch {
  pub fn new(threshold: usize) -> Self {
    Self {
      threshold,
      selected: Vec::new(),
      state: LaborAlertState::Normal,
    }
  }

  pub fn state(&self) -> LaborAlertState {
    self.state
  }

  pub fn selected(&self) -> &[LaborSymptom] {
    &self.selected
  }

  pub fn critical_count(&self) -> usize {
    self.selected.iter().filter(|s| s.is_critical()).count()
  }

  /// Select or deselect a symptom, raising the alert once the critical
  /// selection reaches the threshold.
  pub fn toggle(&mut self, symptom: LaborSymptom) -> LaborAlertState {
    if let Some(pos) = self.selected.iter().position(|s| *s == symptom) {
      self.selected.remove(pos);
    } else {
      self.selected.push(symptom);
    }

    if self.state == LaborAlertState::Normal && self.critical_count() >= self.threshold {
      self.state = LaborAlertState::UrgentAlertShown;
      tracing::warn!(
        critical = self.critical_count(),
        "critical labour symptoms detected"
      );
    }

    self.state
  }

  /// "I'll call myself": close the alert, keep the selection
  pub fn dismiss(&mut self) -> LaborAlertState {
    if self.state == LaborAlertState::UrgentAlertShown {
      tracing::info!("labour alert dismissed");
    }
    self.state = LaborAlertState::Normal;
    self.state
  }

  /// Close the alert after the emergency alert was sent.
  ///
  /// Returns whether an alert was actually showing.
  pub fn confirm(&mut self) -> bool {
    let was_shown = self.state == LaborAlertState::UrgentAlertShown;
    self.state = LaborAlertState::Normal;
    was_shown
  }
}
