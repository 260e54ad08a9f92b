use crate::calendar::previous_month;
use crate::config::StatsConfig;
use crate::model::shift::EnrichedShiftRecord;
use crate::model::stats::{PeriodComparison, ShiftTypeComparison, SummaryStats, WeekdayBucket};
use crate::repository::ShiftRepository;
use crate::service::enricher::enrich_all;
use crate::service::stats_service::{
    calc_change, compare_shift_types, filter_by_month, filter_by_week, group_by_weekday_localized,
    summarize_with_config,
};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    All,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub reference: NaiveDate,
    pub shifts: Vec<EnrichedShiftRecord>,
    pub summary: Option<SummaryStats>,
    pub previous_summary: Option<SummaryStats>,
    pub weekdays: Vec<WeekdayBucket>,
    pub shift_types: Option<ShiftTypeComparison>,
    /// Only when both this and the previous period have shifts.
    pub comparison: Option<PeriodComparison>,
}

impl PeriodReport {
    pub fn build(
        records: &[EnrichedShiftRecord],
        period: Period,
        reference: NaiveDate,
        config: &StatsConfig,
    ) -> Self {
        let (current, previous) = match period {
            Period::Week => (
                filter_by_week(records, reference),
                reference
                    .checked_sub_signed(Duration::days(7))
                    .map(|earlier| filter_by_week(records, earlier))
                    .unwrap_or_default(),
            ),
            Period::Month => {
                let (prev_year, prev_month) = previous_month(reference.year(), reference.month());
                (
                    filter_by_month(records, reference.year(), reference.month()),
                    filter_by_month(records, prev_year, prev_month),
                )
            }
            Period::All => (records.to_vec(), records.to_vec()),
        };

        let summary = summarize_with_config(&current, config);
        let previous_summary = summarize_with_config(&previous, config);
        let comparison = match (&summary, &previous_summary) {
            (Some(now), Some(before)) => Some(calc_change(now.total_tips, before.total_tips)),
            _ => None,
        };

        log::debug!(
            "{:?} report for {}: {} shifts, {} in previous period",
            period,
            reference,
            current.len(),
            previous.len()
        );

        PeriodReport {
            period,
            reference,
            weekdays: group_by_weekday_localized(&current, config.locale),
            shift_types: compare_shift_types(&current),
            shifts: current,
            summary,
            previous_summary,
            comparison,
        }
    }
}

pub struct PeriodReportUseCase<'a, R: ShiftRepository> {
    shift_repo: &'a R,
    config: StatsConfig,
}

impl<'a, R: ShiftRepository> PeriodReportUseCase<'a, R> {
    pub fn new(shift_repo: &'a R, config: StatsConfig) -> Self {
        Self { shift_repo, config }
    }

    /// All stored shifts, validated and enriched.
    pub fn load_shifts(&self) -> Result<Vec<EnrichedShiftRecord>> {
        let records = self.shift_repo.list()?;
        Ok(enrich_all(&records, &self.config)?)
    }

    pub fn report(&self, period: Period, reference: NaiveDate) -> Result<PeriodReport> {
        let shifts = self.load_shifts()?;
        Ok(PeriodReport::build(&shifts, period, reference, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::model::shift::{ShiftRecord, ShiftType};
    use crate::model::stats::Direction;
    use crate::repository::ShiftRepository;
    use anyhow::Result;

    struct MockShiftRepo {
        shifts: Vec<ShiftRecord>,
    }

    impl ShiftRepository for MockShiftRepo {
        fn create(&self, _shift: ShiftRecord) -> Result<ShiftRecord> { unimplemented!() }
        fn list(&self) -> Result<Vec<ShiftRecord>> { Ok(self.shifts.clone()) }
        fn update(&self, _shift: &ShiftRecord) -> Result<()> { unimplemented!() }
        fn delete(&self, _id: &uuid::Uuid) -> Result<()> { unimplemented!() }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn repo() -> MockShiftRepo {
        MockShiftRepo {
            shifts: vec![
                ShiftRecord::new(d(2023, 12, 29), 40.0),
                ShiftRecord::new(d(2024, 1, 1), 20.0).with_shift_type(ShiftType::Early),
                ShiftRecord::new(d(2024, 1, 1), 30.0).with_shift_type(ShiftType::Late),
                ShiftRecord::new(d(2024, 1, 8), 10.0),
                ShiftRecord::new(d(2024, 1, 9), 35.0),
            ],
        }
    }

    #[test]
    fn test_month_report_compares_with_previous_month() {
        let repo = repo();
        let usecase = PeriodReportUseCase::new(&repo, StatsConfig::default());
        let report = usecase.report(Period::Month, d(2024, 1, 15)).unwrap();

        let summary = report.summary.unwrap();
        assert_eq!(summary.total_tips, 95.0);
        assert_eq!(summary.total_shifts, 4);
        assert_eq!(report.previous_summary.unwrap().total_tips, 40.0);

        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.percent_change, 137.5);
        assert_eq!(comparison.direction, Direction::Up);

        assert_eq!(report.weekdays[0].count, 3); // Mon
        assert_eq!(report.weekdays[1].count, 1); // Tue

        let types = report.shift_types.unwrap();
        assert_eq!((types.early.count, types.late.count), (1, 1));
    }

    #[test]
    fn test_week_report() {
        let repo = repo();
        let usecase = PeriodReportUseCase::new(&repo, StatsConfig::default());
        // Sunday closes the week of Jan 8
        let report = usecase.report(Period::Week, d(2024, 1, 14)).unwrap();

        assert_eq!(report.shifts.len(), 2);
        assert_eq!(report.summary.as_ref().unwrap().total_tips, 45.0);
        assert_eq!(report.previous_summary.as_ref().unwrap().total_tips, 50.0);
        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.percent_change, -10.0);
        assert_eq!(comparison.direction, Direction::Down);
    }

    #[test]
    fn test_empty_period_has_no_summary_or_comparison() {
        let repo = repo();
        let usecase = PeriodReportUseCase::new(&repo, StatsConfig::default());
        let report = usecase.report(Period::Month, d(2024, 3, 1)).unwrap();

        assert!(report.shifts.is_empty());
        assert_eq!(report.summary, None);
        assert_eq!(report.comparison, None);
        assert_eq!(report.shift_types, None);
        assert_eq!(report.weekdays.len(), 7);
        assert!(report.weekdays.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_all_time_report_is_flat() {
        let repo = repo();
        let usecase = PeriodReportUseCase::new(&repo, StatsConfig::default());
        let report = usecase.report(Period::All, d(2024, 1, 15)).unwrap();

        assert_eq!(report.summary.unwrap().total_shifts, 5);
        assert_eq!(report.comparison, Some(PeriodComparison::flat()));
    }

    #[test]
    fn test_invalid_record_fails_report() {
        let mut bad = ShiftRecord::new(d(2024, 1, 2), 5.0);
        bad.tip_amount = None;
        let repo = MockShiftRepo { shifts: vec![bad] };
        let usecase = PeriodReportUseCase::new(&repo, StatsConfig::default());

        let err = usecase.report(Period::All, d(2024, 1, 15)).unwrap_err();
        assert!(matches!(err.downcast_ref::<StatsError>(), Some(StatsError::InvalidRecord { .. })));
    }
}
