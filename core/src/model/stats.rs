use serde::{Deserialize, Serialize};
use chrono::Weekday;

/// Aggregate over a non-empty set of shifts. An empty set has no summary at
/// all, so a period without shifts stays distinguishable from one with zero
/// tips.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_tips: f64,
    pub total_revenue: f64, // only shifts with revenue > 0
    pub avg_per_shift: f64,
    pub avg_per_hour: f64,
    pub avg_tip_rate_percent: Option<f64>,
    pub best_shift: f64,
    pub worst_shift: f64,
    pub total_shifts: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeekdayBucket {
    pub weekday: Weekday,
    pub label: String,
    pub avg: f64,
    pub total: f64,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PeriodComparison {
    pub percent_change: f64,
    pub direction: Direction,
}

impl PeriodComparison {
    pub fn flat() -> Self {
        Self {
            percent_change: 0.0,
            direction: Direction::Flat,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ShiftTypeAverage {
    pub avg: f64,
    pub count: usize,
}

/// Early vs. late shifts. Unspecified shifts are in neither side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ShiftTypeComparison {
    pub early: ShiftTypeAverage,
    pub late: ShiftTypeAverage,
}
