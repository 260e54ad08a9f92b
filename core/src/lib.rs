pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use calendar::{parse_reference_date, Locale};
pub use config::{StatsConfig, SHIFT_HOURS};
pub use error::{InvalidReason, StatsError};
pub use model::shift::{EnrichedShiftRecord, ShiftRecord, ShiftType};
pub use model::stats::{
    Direction, PeriodComparison, ShiftTypeAverage, ShiftTypeComparison, SummaryStats, WeekdayBucket,
};
pub use repository::{FileShiftRepository, ShiftRepository};
pub use service::enricher::{enrich, enrich_all, enrich_with_config};
pub use service::stats_service::{
    calc_change, compare_shift_types, filter_by_month, filter_by_week, group_by_weekday,
    group_by_weekday_localized, query_shifts, recent_shifts, summarize, summarize_with_config,
    ShiftQuery, SortKey,
};
pub use usecase::period_report::{Period, PeriodReport, PeriodReportUseCase};
