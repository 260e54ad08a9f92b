use crate::calendar::{month_label, weekday_label, weekday_of};
use crate::config::StatsConfig;
use crate::error::{InvalidReason, StatsError};
use crate::model::shift::{EnrichedShiftRecord, ShiftRecord};
use chrono::Datelike;

/// Half-up rounding on the scaled value.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Monetary and percentage figures.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Period-over-period percentages.
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn enrich(record: &ShiftRecord) -> Result<EnrichedShiftRecord, StatsError> {
    enrich_with_config(record, &StatsConfig::default())
}

pub fn enrich_with_config(
    record: &ShiftRecord,
    config: &StatsConfig,
) -> Result<EnrichedShiftRecord, StatsError> {
    let invalid = |reason| StatsError::InvalidRecord { id: record.id, reason };

    let date = record.date.ok_or_else(|| invalid(InvalidReason::MissingDate))?;
    let tip_amount = record.tip_amount.ok_or_else(|| invalid(InvalidReason::MissingTipAmount))?;
    if !tip_amount.is_finite() || tip_amount < 0.0 {
        return Err(invalid(InvalidReason::InvalidTipAmount));
    }
    if record.revenue.is_some_and(|r| !r.is_finite() || r < 0.0) {
        return Err(invalid(InvalidReason::InvalidRevenue));
    }
    if record.staff_count.is_some_and(|s| !s.is_finite() || s <= 0.0) {
        return Err(invalid(InvalidReason::InvalidStaffCount));
    }

    let hourly_rate = if tip_amount > 0.0 {
        round2(tip_amount / config.shift_hours)
    } else {
        0.0
    };

    // Zero revenue means "no basis for a rate", not a 0% rate
    let tip_rate_percent = record
        .revenue
        .filter(|r| *r > 0.0)
        .map(|r| round2(tip_amount / r * 100.0));

    let weekday = weekday_of(date);
    let iso = date.iso_week();

    Ok(EnrichedShiftRecord {
        id: record.id,
        date,
        tip_amount,
        shift_type: record.shift_type,
        staff_count: record.staff_count,
        revenue: record.revenue,
        note: record.note.clone(),
        weekday,
        weekday_label: weekday_label(weekday, config.locale).to_string(),
        hourly_rate,
        tip_rate_percent,
        iso_year: iso.year(),
        iso_week: iso.week(),
        month_label: month_label(date),
    })
}

/// Enriches every record, stopping at the first invalid one.
pub fn enrich_all(
    records: &[ShiftRecord],
    config: &StatsConfig,
) -> Result<Vec<EnrichedShiftRecord>, StatsError> {
    records.iter().map(|r| enrich_with_config(r, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Locale;
    use chrono::{NaiveDate, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235000001), 1.24);
        assert_eq!(round1(10.05000001), 10.1);
        assert_eq!(round1(-2.25), -2.2);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_hourly_rate() {
        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 55.0)).unwrap();
        assert_eq!(e.hourly_rate, 10.0);

        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 20.0)).unwrap();
        assert_eq!(e.hourly_rate, 3.64);

        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 0.0)).unwrap();
        assert_eq!(e.hourly_rate, 0.0);
    }

    #[test]
    fn test_hourly_rate_uses_configured_hours() {
        let config = StatsConfig { shift_hours: 8.0, ..StatsConfig::default() };
        let e = enrich_with_config(&ShiftRecord::new(d(2024, 1, 1), 40.0), &config).unwrap();
        assert_eq!(e.hourly_rate, 5.0);
    }

    #[test]
    fn test_tip_rate() {
        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 30.0).with_revenue(400.0)).unwrap();
        assert_eq!(e.tip_rate_percent, Some(7.5));

        // absent and zero revenue both leave the rate undefined
        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 30.0)).unwrap();
        assert_eq!(e.tip_rate_percent, None);
        let e = enrich(&ShiftRecord::new(d(2024, 1, 1), 30.0).with_revenue(0.0)).unwrap();
        assert_eq!(e.tip_rate_percent, None);
        assert_eq!(e.revenue, Some(0.0));
    }

    #[test]
    fn test_calendar_fields() {
        let e = enrich(&ShiftRecord::new(d(2024, 12, 30), 10.0)).unwrap();
        assert_eq!(e.weekday, Weekday::Mon);
        assert_eq!(e.weekday_label, "Mon");
        assert_eq!((e.iso_year, e.iso_week), (2025, 1));
        assert_eq!(e.month_label, "2024-12");

        let config = StatsConfig { locale: Locale::German, ..StatsConfig::default() };
        let e = enrich_with_config(&ShiftRecord::new(d(2024, 1, 7), 10.0), &config).unwrap();
        assert_eq!(e.weekday_label, "So");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut record = ShiftRecord::new(d(2024, 1, 1), 10.0);
        record.date = None;
        assert_eq!(
            enrich(&record),
            Err(StatsError::InvalidRecord { id: record.id, reason: InvalidReason::MissingDate })
        );

        let mut record = ShiftRecord::new(d(2024, 1, 1), 10.0);
        record.tip_amount = None;
        assert_eq!(
            enrich(&record),
            Err(StatsError::InvalidRecord { id: record.id, reason: InvalidReason::MissingTipAmount })
        );
    }

    #[test]
    fn test_invalid_numbers() {
        let record = ShiftRecord::new(d(2024, 1, 1), -1.0);
        assert!(matches!(
            enrich(&record),
            Err(StatsError::InvalidRecord { reason: InvalidReason::InvalidTipAmount, .. })
        ));

        let record = ShiftRecord::new(d(2024, 1, 1), f64::NAN);
        assert!(enrich(&record).is_err());

        let record = ShiftRecord::new(d(2024, 1, 1), 5.0).with_revenue(-10.0);
        assert!(matches!(
            enrich(&record),
            Err(StatsError::InvalidRecord { reason: InvalidReason::InvalidRevenue, .. })
        ));

        let record = ShiftRecord::new(d(2024, 1, 1), 5.0).with_staff_count(0.0);
        assert!(matches!(
            enrich(&record),
            Err(StatsError::InvalidRecord { reason: InvalidReason::InvalidStaffCount, .. })
        ));

        let record = ShiftRecord::new(d(2024, 1, 1), 5.0).with_staff_count(1.5);
        assert_eq!(enrich(&record).unwrap().staff_count, Some(1.5));
    }

    #[test]
    fn test_enrich_all_fails_fast() {
        let mut bad = ShiftRecord::new(d(2024, 1, 2), 1.0);
        bad.date = None;
        let records = vec![ShiftRecord::new(d(2024, 1, 1), 1.0), bad.clone()];
        let err = enrich_all(&records, &StatsConfig::default()).unwrap_err();
        assert_eq!(err, StatsError::InvalidRecord { id: bad.id, reason: InvalidReason::MissingDate });
        assert_eq!(err.to_string(), format!("invalid shift record {}: date is missing", bad.id));
    }
}
