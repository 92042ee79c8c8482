//! Busiest-day ranking for the summary table.

use noise_map_aggregate_models::{Aggregated, DailyCounts, DayCount};
use noise_map_complaint_models::EventRecord;

use crate::count_by_day;

/// Returns the `n` dates with the most records.
///
/// Sorted by count descending; ties go to the earlier date. `n == 0`
/// yields an empty list, and `n` larger than the number of distinct dates
/// returns every date.
#[must_use]
pub fn top_n_by_day(records: &[EventRecord], n: usize) -> Aggregated<Vec<DayCount>> {
    count_by_day(records).map(|daily| rank_days(&daily, n))
}

/// Ranks existing daily counts. See [`top_n_by_day`].
#[must_use]
pub fn rank_days(daily: &DailyCounts, n: usize) -> Vec<DayCount> {
    let mut rows: Vec<DayCount> = daily
        .iter()
        .map(|(date, count)| DayCount {
            date: *date,
            count: *count,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.date.cmp(&b.date)));
    rows.truncate(n);
    rows
}
