use std::sync::{Arc, Mutex, MutexGuard};

use crate::appointments::AppointmentBook;
use crate::checklist::Checklist;
use crate::clock::{Clock, ElapsedTicker, SystemClock};
use crate::contractions::ContractionTimer;
use crate::cycle::CycleState;
use crate::emergency::{ContactBook, Dialer, EmergencyNotifier, Location, SimulatedDialer, SimulatedNotifier};
use crate::feeding::FeedingLog;
use crate::kicks::{KickRules, KickTracker};
use crate::settings::TrackerSettings;
use crate::symptoms::{LaborWatch, SymptomCatalog, SymptomLog};
use crate::weight::WeightLog;

/// Week the pregnancy screens open on until the user sets one
pub const DEFAULT_PREGNANCY_WEEK: u8 = 24;

/// Kick counter screen: the tracker plus its running clock
pub struct KickScreen {
  pub tracker: KickTracker,
  pub ticker: Option<ElapsedTicker>,
}

/// Labour watch contraction timer and its running clock
pub struct ContractionScreen {
  pub timer: ContractionTimer,
  pub ticker: Option<ElapsedTicker>,
}

/// Application state: one lock per screen, nothing shared between them
pub struct AppState {
  pub settings: TrackerSettings,
  pub clock: Arc<dyn Clock>,
  pub notifier: Arc<dyn EmergencyNotifier>,
  pub dialer: Arc<dyn Dialer>,

  pub cycle: Mutex<CycleState>,
  pub pregnancy_week: Mutex<u8>,
  pub kicks: Mutex<KickScreen>,
  pub contractions: Mutex<ContractionScreen>,
  pub labor_watch: Mutex<LaborWatch>,
  pub pregnancy_symptoms: Mutex<SymptomLog>,
  pub postpartum_symptoms: Mutex<SymptomLog>,
  pub baby_symptoms: Mutex<SymptomLog>,
  pub hospital_bag: Mutex<Checklist>,
  pub appointments: Mutex<AppointmentBook>,
  pub weight: Mutex<WeightLog>,
  pub contacts: Mutex<ContactBook>,
  pub feeding: Mutex<FeedingLog>,
  pub location: Mutex<Option<Location>>,
}

impl AppState {
  /// State backed by the system clock and simulated external services
  pub fn new(settings: TrackerSettings) -> Self {
    Self::with_services(
      settings,
      Arc::new(SystemClock),
      Arc::new(SimulatedNotifier),
      Arc::new(SimulatedDialer),
    )
  }

  pub fn with_services(
    settings: TrackerSettings,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn EmergencyNotifier>,
    dialer: Arc<dyn Dialer>,
  ) -> Self {
    let kick_rules = KickRules::from(&settings);
    let timer = ContractionTimer::new(settings.contraction_window, settings.labor_threshold_minutes);
    let labor_watch = LaborWatch::new(settings.critical_symptom_threshold);

    Self {
      clock,
      notifier,
      dialer,
      cycle: Mutex::new(CycleState::default()),
      pregnancy_week: Mutex::new(DEFAULT_PREGNANCY_WEEK),
      kicks: Mutex::new(KickScreen {
        tracker: KickTracker::new(kick_rules),
        ticker: None,
      }),
      contractions: Mutex::new(ContractionScreen { timer, ticker: None }),
      labor_watch: Mutex::new(labor_watch),
      pregnancy_symptoms: Mutex::new(SymptomLog::new(SymptomCatalog::Pregnancy)),
      postpartum_symptoms: Mutex::new(SymptomLog::new(SymptomCatalog::Postpartum)),
      baby_symptoms: Mutex::new(SymptomLog::new(SymptomCatalog::Baby)),
      hospital_bag: Mutex::new(Checklist::hospital_bag()),
      appointments: Mutex::new(AppointmentBook::new()),
      weight: Mutex::new(WeightLog::new()),
      contacts: Mutex::new(ContactBook::new()),
      feeding: Mutex::new(FeedingLog::new()),
      location: Mutex::new(None),
      settings,
    }
  }

  pub fn symptom_log(&self, catalog: SymptomCatalog) -> &Mutex<SymptomLog> {
    match catalog {
      SymptomCatalog::Pregnancy => &self.pregnancy_symptoms,
      SymptomCatalog::Postpartum => &self.postpartum_symptoms,
      SymptomCatalog::Baby => &self.baby_symptoms,
    }
  }

  pub fn tick_period(&self) -> std::time::Duration {
    std::time::Duration::from_millis(self.settings.tick_interval_ms)
  }
}

/// Lock a screen's state, turning poisoning into a command error
pub fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
  mutex.lock().map_err(|e| format!("State lock poisoned: {}", e))
}
