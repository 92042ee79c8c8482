//! Month × day-of-month calendar matrix.

use noise_map_aggregate_models::{Aggregated, MonthDayMatrix, YearFilter};
use noise_map_complaint_models::EventRecord;

use crate::{ParsedEntry, ParsedRecords};

/// Builds the 12×31 month/day matrix, optionally restricted to one year.
///
/// A year with no records produces an all-zero matrix. Records from other
/// years are filtered out, not discarded: `discarded` only counts
/// unparseable timestamps.
#[must_use]
pub fn build_month_day_matrix(
    records: &[EventRecord],
    year_filter: YearFilter,
) -> Aggregated<MonthDayMatrix> {
    ParsedRecords::parse(records).aggregate(|entries| month_day_from(entries, year_filter))
}

pub(crate) fn month_day_from(
    entries: &[ParsedEntry<'_>],
    year_filter: YearFilter,
) -> MonthDayMatrix {
    let mut matrix = MonthDayMatrix::default();
    for (ts, _) in entries {
        if year_filter.matches(ts.year()) {
            matrix.increment((ts.month() - 1) as usize, (ts.day() - 1) as usize);
        }
    }
    matrix
}
