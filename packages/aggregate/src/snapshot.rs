//! Everything the dashboard draws, recomputed in one pass per filter.
//!
//! The page never patches a previous snapshot. When the year selector
//! changes, the caller builds a new [`DashboardSnapshot`] from the same
//! records and redraws every widget from it.

use noise_map_aggregate_models::{
    DailyCounts, DayCount, HourlyCounts, LabelCount, LabelField, MonthDayMatrix,
    WeekdayHourMatrix, YearFilter,
};
use noise_map_complaint_models::EventRecord;
use serde::Serialize;

use crate::ParsedRecords;
use crate::counts::{daily_from, hourly_from, labels_from, weekday_hour_from, years_from};
use crate::matrix::month_day_from;
use crate::ranking::rank_days;

/// All dashboard aggregates for one year filter.
///
/// The filter applies to the two matrices. Daily counts, hourly counts,
/// the busiest-days table and the category table always cover every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// The filter the matrices were built with.
    pub year_filter: YearFilter,
    /// Number of input records, including discarded ones.
    pub total_records: u64,
    /// Records skipped due to missing or malformed timestamps.
    pub discarded: u64,
    /// Years present in the data, for the year selector.
    pub available_years: Vec<i32>,
    /// Records per date.
    pub daily: DailyCounts,
    /// Records per hour of day (radial chart).
    pub hourly: HourlyCounts,
    /// Month × day-of-month calendar heatmap.
    pub month_day: MonthDayMatrix,
    /// Weekday × hour heatmap.
    pub weekday_hour: WeekdayHourMatrix,
    /// Busiest dates.
    pub top_days: Vec<DayCount>,
    /// Records per category label.
    pub categories: Vec<LabelCount>,
}

impl DashboardSnapshot {
    /// Builds every aggregate from `records`, parsing each timestamp once.
    #[must_use]
    pub fn build(records: &[EventRecord], year_filter: YearFilter, top_n: usize) -> Self {
        let parsed = ParsedRecords::parse(records);
        let entries = parsed.entries();
        let daily = daily_from(entries);

        log::debug!(
            "Rebuilding dashboard snapshot for year filter {year_filter} ({} records)",
            records.len()
        );

        Self {
            year_filter,
            total_records: records.len() as u64,
            discarded: parsed.discarded(),
            available_years: years_from(entries),
            top_days: rank_days(&daily, top_n),
            daily,
            hourly: hourly_from(entries),
            month_day: month_day_from(entries, year_filter),
            weekday_hour: weekday_hour_from(entries, year_filter),
            categories: labels_from(entries, LabelField::Category),
        }
    }
}
