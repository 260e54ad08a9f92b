use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Early,
    Late,
    Unspecified,
}

impl Default for ShiftType {
    fn default() -> Self {
        ShiftType::Unspecified
    }
}

/// A shift as it comes out of storage.
///
/// `date` and `tip_amount` are required for statistics but stay optional here
/// so that malformed stored data is caught by the enricher instead of failing
/// the whole file at deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShiftRecord {
    pub id: Uuid,
    pub date: Option<NaiveDate>,
    pub tip_amount: Option<f64>,
    #[serde(default)]
    pub shift_type: ShiftType,

    // Shared shifts are recorded as fractions, e.g. 1.5
    #[serde(default)]
    pub staff_count: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl ShiftRecord {
    pub fn new(date: NaiveDate, tip_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Some(date),
            tip_amount: Some(tip_amount),
            shift_type: ShiftType::default(),
            staff_count: None,
            revenue: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_shift_type(mut self, shift_type: ShiftType) -> Self {
        self.shift_type = shift_type;
        self
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn with_staff_count(mut self, staff_count: f64) -> Self {
        self.staff_count = Some(staff_count);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Validated shift plus the per-record figures the aggregation works from.
/// Built by [`crate::service::enricher::enrich`], never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnrichedShiftRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub tip_amount: f64,
    pub shift_type: ShiftType,
    pub staff_count: Option<f64>,
    pub revenue: Option<f64>,
    pub note: Option<String>,

    pub weekday: Weekday,
    pub weekday_label: String,
    pub hourly_rate: f64,
    pub tip_rate_percent: Option<f64>,
    pub iso_year: i32,
    pub iso_week: u32,
    pub month_label: String,
}
