use serde::{ Serialize, Deserialize };
use uuid::Uuid;
use chrono::{NaiveDate, DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFlow {
    None,
    Light,
    Medium,
    Heavy,
    Spotting,
}

impl PeriodFlow {
    pub fn is_bleeding(self) -> bool {
        !matches!(self, PeriodFlow::None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub period_flow: Option<PeriodFlow>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub moods: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CycleEntry {
    // Missing flow and an explicit "none" both mean no bleeding that day.
    pub fn is_flow_day(&self) -> bool {
        self.period_flow.map_or(false, PeriodFlow::is_bleeding)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub period_flow: Option<PeriodFlow>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub moods: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub period_flow: Option<PeriodFlow>,
    pub symptoms: Option<Vec<String>>,
    pub moods: Option<Vec<String>>,
    pub notes: Option<String>,
}

// One gap-tolerant run of flow-days; `length` counts logged days, not the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub start_date: NaiveDate,
    pub length: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionWindow {
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_start_date: NaiveDate,
    pub fertile_end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct CyclePrediction {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub window: PredictionWindow,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseProjection {
    pub name: String,
    pub date: String,
    pub time_until: String,
    pub days_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub cycle_length: i64,
    pub period_length: i64,
    pub current_cycle_day: i64,
    pub total_cycle_days: i64,
    pub next_period: PhaseProjection,
    pub fertility: PhaseProjection,
    pub ovulation: PhaseProjection,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDayView {
    pub date: NaiveDate,
    pub is_period: bool,
    pub is_period_start: bool,
    pub is_period_end: bool,
    pub is_ovulation: bool,
    pub is_fertile: bool,
    pub is_prediction: bool,
    pub is_today: bool,
    pub is_current_month: bool,
    pub entry: Option<CycleEntry>,
}
