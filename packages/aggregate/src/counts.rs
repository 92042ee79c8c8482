//! Per-day, per-hour, per-weekday and per-label counts.

use std::collections::{BTreeMap, BTreeSet};

use noise_map_aggregate_models::{
    Aggregated, DailyCounts, DateKey, DayCount, HourlyCounts, LabelCount, LabelField,
    WeekdayHourMatrix, YearFilter,
};
use noise_map_complaint_models::EventRecord;

use crate::{ParsedEntry, ParsedRecords};

/// Counts records per calendar date.
///
/// Only dates with at least one record get an entry. The counts sum to
/// `records.len() - discarded`.
#[must_use]
pub fn count_by_day(records: &[EventRecord]) -> Aggregated<DailyCounts> {
    ParsedRecords::parse(records).aggregate(daily_from)
}

pub(crate) fn daily_from(entries: &[ParsedEntry<'_>]) -> DailyCounts {
    let mut daily = DailyCounts::new();
    for (ts, _) in entries {
        *daily.entry(ts.date()).or_insert(0) += 1;
    }
    daily
}

/// Counts records per UTC hour of day. The result always has 24 buckets.
#[must_use]
pub fn count_by_hour(records: &[EventRecord]) -> Aggregated<HourlyCounts> {
    ParsedRecords::parse(records).aggregate(hourly_from)
}

pub(crate) fn hourly_from(entries: &[ParsedEntry<'_>]) -> HourlyCounts {
    let mut hourly = HourlyCounts::default();
    for (ts, _) in entries {
        hourly.increment(ts.hour() as usize);
    }
    hourly
}

/// Counts records per weekday (Sunday first) and UTC hour, optionally
/// restricted to one year.
#[must_use]
pub fn count_by_weekday_hour(
    records: &[EventRecord],
    year_filter: YearFilter,
) -> Aggregated<WeekdayHourMatrix> {
    ParsedRecords::parse(records).aggregate(|entries| weekday_hour_from(entries, year_filter))
}

pub(crate) fn weekday_hour_from(
    entries: &[ParsedEntry<'_>],
    year_filter: YearFilter,
) -> WeekdayHourMatrix {
    let mut matrix = WeekdayHourMatrix::default();
    for (ts, _) in entries {
        if year_filter.matches(ts.year()) {
            matrix.increment(
                ts.weekday().num_days_from_sunday() as usize,
                ts.hour() as usize,
            );
        }
    }
    matrix
}

/// Counts records per category or location label.
///
/// Records without the label are grouped under `""`. Sorted by count
/// descending, then label ascending.
#[must_use]
pub fn count_by_label(records: &[EventRecord], field: LabelField) -> Aggregated<Vec<LabelCount>> {
    ParsedRecords::parse(records).aggregate(|entries| labels_from(entries, field))
}

pub(crate) fn labels_from(entries: &[ParsedEntry<'_>], field: LabelField) -> Vec<LabelCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for (_, record) in entries {
        let label = match field {
            LabelField::Category => record.category_label.as_deref(),
            LabelField::Location => record.location_label.as_deref(),
        };
        *counts.entry(label.unwrap_or_default()).or_insert(0) += 1;
    }

    let mut rows: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration is already label-ascending; the stable sort keeps it on ties.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Distinct years present in the data, ascending.
#[must_use]
pub fn available_years(records: &[EventRecord]) -> Aggregated<Vec<i32>> {
    ParsedRecords::parse(records).aggregate(years_from)
}

pub(crate) fn years_from(entries: &[ParsedEntry<'_>]) -> Vec<i32> {
    entries
        .iter()
        .map(|(ts, _)| ts.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First and last date present in a [`DailyCounts`], if any.
#[must_use]
pub fn daily_range(daily: &DailyCounts) -> Option<(DateKey, DateKey)> {
    let (first, _) = daily.first_key_value()?;
    let (last, _) = daily.last_key_value()?;
    Some((*first, *last))
}

/// Expands daily counts into a contiguous, zero-filled range covering
/// every date from `from` through `to` inclusive.
///
/// Returns an empty vector when `from > to`.
#[must_use]
pub fn fill_daily_range(daily: &DailyCounts, from: DateKey, to: DateKey) -> Vec<DayCount> {
    let mut rows = Vec::new();
    let mut current = Some(from);

    while let Some(date) = current
        && date <= to
    {
        rows.push(DayCount {
            date,
            count: daily.get(&date).copied().unwrap_or(0),
        });
        current = date.succ();
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(timestamps: &[&str]) -> Vec<EventRecord> {
        timestamps.iter().copied().map(EventRecord::at).collect()
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn counts_by_day_with_discards() {
        let input = records(&[
            "2023/01/15 08:00:00+00",
            "2023/01/15 23:00:00+00",
            "bad-date",
        ]);

        let daily = count_by_day(&input);
        assert_eq!(daily.discarded, 1);
        assert_eq!(daily.value.len(), 1);
        assert_eq!(daily.value[&key("2023-01-15")], 2);
        assert_eq!(
            serde_json::to_string(&daily.value).unwrap(),
            r#"{"2023-01-15":2}"#
        );
    }

    #[test]
    fn daily_counts_plus_discards_cover_input() {
        let input = records(&[
            "2023/01/15 08:00:00+00",
            "2023/01/16 08:00:00+00",
            "2022/12/31 23:59:59+00",
            "2023/01/16 09:00:00+00",
            "2023/01/16",
            "nope",
        ]);

        let daily = count_by_day(&input);
        let total: u64 = daily.value.values().sum();
        assert_eq!(total + daily.discarded, input.len() as u64);
    }

    #[test]
    fn counts_by_day_is_idempotent() {
        let input = records(&["2023/03/01 01:00:00+00", "2023/03/02 01:00:00+00"]);
        assert_eq!(count_by_day(&input), count_by_day(&input));
    }

    #[test]
    fn counts_by_hour_scenario() {
        let input = records(&[
            "2023/01/15 08:00:00+00",
            "2023/01/15 23:00:00+00",
            "bad-date",
        ]);

        let hourly = count_by_hour(&input);
        assert_eq!(hourly.discarded, 1);
        assert_eq!(hourly.value[8], 1);
        assert_eq!(hourly.value[23], 1);
        for hour in (0..24).filter(|h| *h != 8 && *h != 23) {
            assert_eq!(hourly.value[hour], 0, "hour {hour}");
        }
        assert_eq!(hourly.value.total(), input.len() as u64 - hourly.discarded);
    }

    #[test]
    fn counts_by_hour_ignores_date() {
        let input = records(&[
            "2021/06/01 13:05:00+00",
            "2023/11/20 13:59:59+00",
            "2019/01/01 00:00:00+00",
        ]);

        let hourly = count_by_hour(&input).into_value();
        assert_eq!(hourly[13], 2);
        assert_eq!(hourly[0], 1);
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        assert!(count_by_day(&[]).value.is_empty());
        assert_eq!(count_by_hour(&[]).value.total(), 0);
        assert_eq!(count_by_hour(&[]).discarded, 0);
    }

    #[test]
    fn weekday_hour_respects_year_filter() {
        let input = records(&[
            // Sunday
            "2023/01/15 22:00:00+00",
            // Monday
            "2023/01/16 07:00:00+00",
            // Sunday, different year
            "2022/01/16 22:00:00+00",
        ]);

        let all = count_by_weekday_hour(&input, YearFilter::All).into_value();
        assert_eq!(all.get(0, 22), 2);
        assert_eq!(all.get(1, 7), 1);

        let only_2023 = count_by_weekday_hour(&input, YearFilter::Year(2023)).into_value();
        assert_eq!(only_2023.get(0, 22), 1);
        assert_eq!(only_2023.total(), 2);
    }

    #[test]
    fn labels_sorted_by_count_then_label() {
        let mut input = records(&[
            "2023/01/15 08:00:00+00",
            "2023/01/15 09:00:00+00",
            "2023/01/15 10:00:00+00",
            "2023/01/15 11:00:00+00",
            "bad-date",
        ]);
        input[0].category_label = Some("LOUD PARTY".to_string());
        input[1].category_label = Some("LOUD MUSIC".to_string());
        input[2].category_label = Some("LOUD PARTY".to_string());
        input[4].category_label = Some("LOUD MUSIC".to_string());

        let labels = count_by_label(&input, LabelField::Category);
        assert_eq!(labels.discarded, 1);
        assert_eq!(
            labels.value,
            vec![
                LabelCount {
                    label: "LOUD PARTY".to_string(),
                    count: 2
                },
                LabelCount {
                    label: String::new(),
                    count: 1
                },
                LabelCount {
                    label: "LOUD MUSIC".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn location_labels_use_location_field() {
        let mut input = records(&["2023/01/15 08:00:00+00"]);
        input[0].location_label = Some("100 FRANKLIN ST".to_string());
        input[0].category_label = Some("LOUD PARTY".to_string());

        let labels = count_by_label(&input, LabelField::Location).into_value();
        assert_eq!(labels[0].label, "100 FRANKLIN ST");
    }

    #[test]
    fn available_years_are_distinct_and_sorted() {
        let input = records(&[
            "2023/01/15 08:00:00+00",
            "2021/01/15 08:00:00+00",
            "2023/05/15 08:00:00+00",
        ]);
        assert_eq!(available_years(&input).value, vec![2021, 2023]);
    }

    #[test]
    fn fills_missing_days_with_zero() {
        let daily = count_by_day(&records(&[
            "2023/02/27 08:00:00+00",
            "2023/03/02 08:00:00+00",
            "2023/03/02 09:00:00+00",
        ]))
        .into_value();

        let (from, to) = daily_range(&daily).unwrap();
        let filled = fill_daily_range(&daily, from, to);

        let rendered: Vec<(String, u64)> = filled
            .iter()
            .map(|row| (row.date.to_string(), row.count))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("2023-02-27".to_string(), 1),
                ("2023-02-28".to_string(), 0),
                ("2023-03-01".to_string(), 0),
                ("2023-03-02".to_string(), 2),
            ]
        );
    }

    #[test]
    fn fill_with_inverted_range_is_empty() {
        let daily = DailyCounts::new();
        assert!(fill_daily_range(&daily, key("2023-01-02"), key("2023-01-01")).is_empty());
        assert!(daily_range(&daily).is_none());
    }
}
