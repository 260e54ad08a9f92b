use crate::calendar::{week_bounds, weekday_label, weekday_of, Locale, WEEKDAYS};
use crate::config::StatsConfig;
use crate::model::shift::{EnrichedShiftRecord, ShiftType};
use crate::model::stats::{
    Direction, PeriodComparison, ShiftTypeAverage, ShiftTypeComparison, SummaryStats, WeekdayBucket,
};
use crate::service::enricher::{round1, round2};
use chrono::{Datelike, NaiveDate};

fn sum(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, v| acc + v)
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(sum(values.iter().copied()) / values.len() as f64)
}

pub fn summarize(records: &[EnrichedShiftRecord]) -> Option<SummaryStats> {
    summarize_with_config(records, &StatsConfig::default())
}

/// `None` for an empty set. Revenue-less shifts count towards tips but not
/// towards revenue or the tip rate.
pub fn summarize_with_config(
    records: &[EnrichedShiftRecord],
    config: &StatsConfig,
) -> Option<SummaryStats> {
    if records.is_empty() {
        return None;
    }

    let count = records.len();
    let total_tips = sum(records.iter().map(|r| r.tip_amount));
    let total_revenue = sum(records.iter().filter_map(|r| r.revenue).filter(|r| *r > 0.0));
    let avg_per_shift = total_tips / count as f64;

    let best_shift = records.iter().map(|r| r.tip_amount).fold(f64::MIN, f64::max);
    let worst_shift = records.iter().map(|r| r.tip_amount).fold(f64::MAX, f64::min);

    Some(SummaryStats {
        total_tips: round2(total_tips),
        total_revenue: round2(total_revenue),
        avg_per_shift: round2(avg_per_shift),
        avg_per_hour: round2(avg_per_shift / config.shift_hours),
        // From the totals, not an average of per-shift rates
        avg_tip_rate_percent: if total_revenue > 0.0 {
            Some(round2(total_tips / total_revenue * 100.0))
        } else {
            None
        },
        best_shift: round2(best_shift),
        worst_shift: round2(worst_shift),
        total_shifts: count,
    })
}

pub fn group_by_weekday(records: &[EnrichedShiftRecord]) -> Vec<WeekdayBucket> {
    group_by_weekday_localized(records, Locale::default())
}

/// Always seven buckets, Monday first, empty ones zeroed.
pub fn group_by_weekday_localized(records: &[EnrichedShiftRecord], locale: Locale) -> Vec<WeekdayBucket> {
    let mut grouped: [Vec<f64>; 7] = Default::default();
    for record in records {
        let index = weekday_of(record.date).num_days_from_monday() as usize;
        grouped[index].push(record.tip_amount);
    }

    WEEKDAYS
        .iter()
        .zip(grouped.iter())
        .map(|(day, tips)| WeekdayBucket {
            weekday: *day,
            label: weekday_label(*day, locale).to_string(),
            avg: average(tips),
            total: round2(sum(tips.iter().copied())),
            count: tips.len(),
        })
        .collect()
}

/// `month` is 1-indexed (1 = January). Input order is kept.
pub fn filter_by_month(records: &[EnrichedShiftRecord], year: i32, month: u32) -> Vec<EnrichedShiftRecord> {
    records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .cloned()
        .collect()
}

/// Shifts in the Monday..Sunday week containing `reference`. Input order is
/// kept.
pub fn filter_by_week(records: &[EnrichedShiftRecord], reference: NaiveDate) -> Vec<EnrichedShiftRecord> {
    let (start, end) = week_bounds(reference);
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline always reports a flat 0%, even when `current` is
/// positive.
pub fn calc_change(current: f64, previous: f64) -> PeriodComparison {
    if previous == 0.0 {
        return PeriodComparison::flat();
    }

    let percent_change = round1((current - previous) / previous * 100.0);
    let direction = if percent_change > 0.0 {
        Direction::Up
    } else if percent_change < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };

    PeriodComparison {
        // normalizes -0.0
        percent_change: if percent_change == 0.0 { 0.0 } else { percent_change },
        direction,
    }
}

pub fn compare_shift_types(records: &[EnrichedShiftRecord]) -> Option<ShiftTypeComparison> {
    if records.is_empty() {
        return None;
    }

    let side = |shift_type: ShiftType| {
        let tips: Vec<f64> = records
            .iter()
            .filter(|r| r.shift_type == shift_type)
            .map(|r| r.tip_amount)
            .collect();
        ShiftTypeAverage {
            avg: average(&tips),
            count: tips.len(),
        }
    };

    Some(ShiftTypeComparison {
        early: side(ShiftType::Early),
        late: side(ShiftType::Late),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey {
    Date,
    Tip,
    HourlyRate,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Date
    }
}

/// History view criteria. An empty query keeps every shift, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftQuery {
    pub shift_type: Option<ShiftType>,
    pub search: Option<String>,
    pub sort: SortKey,
}

fn matches_search(record: &EnrichedShiftRecord, needle: &str) -> bool {
    let note_hit = record
        .note
        .as_deref()
        .is_some_and(|n| n.to_lowercase().contains(needle));

    note_hit
        || record.date.format("%Y-%m-%d").to_string().contains(needle)
        || record.date.format("%d.%m.%Y").to_string().contains(needle)
        || record.weekday_label.to_lowercase().contains(needle)
}

/// Filters by shift type and a case-insensitive search over note, date and
/// weekday label, then sorts descending by `query.sort`. Ties keep input
/// order.
pub fn query_shifts(records: &[EnrichedShiftRecord], query: &ShiftQuery) -> Vec<EnrichedShiftRecord> {
    let needle = query
        .search
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut result: Vec<EnrichedShiftRecord> = records
        .iter()
        .filter(|r| query.shift_type.map_or(true, |t| r.shift_type == t))
        .filter(|r| needle.as_deref().map_or(true, |q| matches_search(r, q)))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Date => result.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Tip => result.sort_by(|a, b| b.tip_amount.total_cmp(&a.tip_amount)),
        SortKey::HourlyRate => result.sort_by(|a, b| b.hourly_rate.total_cmp(&a.hourly_rate)),
    }
    result
}

/// Newest first; equal dates keep their input order.
pub fn recent_shifts(records: &[EnrichedShiftRecord], limit: usize) -> Vec<EnrichedShiftRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
