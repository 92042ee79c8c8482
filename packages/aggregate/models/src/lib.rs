#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate result types for the noise complaint dashboard.
//!
//! Every structure here is derived data: the aggregator rebuilds it from
//! scratch on each call and hands ownership to the caller. Fixed-size
//! grids ([`HourlyCounts`], [`MonthDayMatrix`], [`WeekdayHourMatrix`])
//! serialize as plain nested JSON arrays so chart widgets can bind them
//! directly.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{AddAssign, Index};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of hour-of-day buckets.
pub const HOURS_PER_DAY: usize = 24;

/// Number of month rows in a [`MonthDayMatrix`].
pub const MONTHS_PER_YEAR: usize = 12;

/// Number of day-of-month columns in a [`MonthDayMatrix`].
pub const MAX_DAYS_PER_MONTH: usize = 31;

/// Number of weekday rows in a [`WeekdayHourMatrix`].
pub const DAYS_PER_WEEK: usize = 7;

/// The result of an aggregation along with how many input records were
/// excluded because their timestamp was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregated<T> {
    /// The aggregate itself.
    pub value: T,
    /// Number of records skipped due to unparseable timestamps.
    pub discarded: u64,
}

impl<T> Aggregated<T> {
    /// Pairs an aggregate with its discard count.
    #[must_use]
    pub const fn new(value: T, discarded: u64) -> Self {
        Self { value, discarded }
    }

    /// Transforms the aggregate while keeping the discard count.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Aggregated<U> {
        Aggregated {
            value: f(self.value),
            discarded: self.discarded,
        }
    }

    /// Drops the discard count and returns the aggregate.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Error returned when a string is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date key '{value}': expected YYYY-MM-DD")]
pub struct InvalidDateKeyError {
    /// The rejected input.
    pub value: String,
}

/// A UTC calendar date, rendered as `YYYY-MM-DD`.
///
/// Serializes as that string, so it can be used as a JSON object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year/month/day, or `None` if no such date exists.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the following calendar day.
    #[must_use]
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = InvalidDateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvalidDateKeyError {
                value: s.to_string(),
            })
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Record count per calendar date. Only dates with at least one record
/// have an entry.
pub type DailyCounts = BTreeMap<DateKey, u64>;

/// A single date with its record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    /// Calendar date.
    pub date: DateKey,
    /// Records on that date.
    pub count: u64,
}

/// A descriptive label (category or location) with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Label text, passed through unmodified. Empty when the record had none.
    pub label: String,
    /// Records carrying that label.
    pub count: u64,
}

/// Which opaque label a table groups by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LabelField {
    /// The offense/category description.
    Category,
    /// The street/location description.
    Location,
}

/// Record count per UTC hour of day, index 0 through 23.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyCounts([u64; HOURS_PER_DAY]);

impl HourlyCounts {
    /// Adds one record to the given hour. Out-of-range hours are ignored.
    pub fn increment(&mut self, hour: usize) {
        if let Some(slot) = self.0.get_mut(hour) {
            *slot += 1;
        }
    }

    /// Count for an hour; zero when out of range.
    #[must_use]
    pub fn get(&self, hour: usize) -> u64 {
        self.0.get(hour).copied().unwrap_or(0)
    }

    /// Returns the buckets as an array.
    #[must_use]
    pub const fn as_array(&self) -> &[u64; HOURS_PER_DAY] {
        &self.0
    }

    /// Sum over all hours.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// # Panics
///
/// Panics if `hour` is 24 or more. Use [`HourlyCounts::get`] for a
/// non-panicking read.
impl Index<usize> for HourlyCounts {
    type Output = u64;

    fn index(&self, hour: usize) -> &Self::Output {
        &self.0[hour]
    }
}

/// Record count per month and day of month.
///
/// Cell `[month][day - 1]` with `month` zero-based. Slots for days a
/// month does not have (e.g. `[1][30]`, February 31st) always stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthDayMatrix([[u64; MAX_DAYS_PER_MONTH]; MONTHS_PER_YEAR]);

impl MonthDayMatrix {
    /// Adds one record to the cell for a zero-based month and zero-based day.
    pub fn increment(&mut self, month: usize, day: usize) {
        if let Some(cell) = self.0.get_mut(month).and_then(|row| row.get_mut(day)) {
            *cell += 1;
        }
    }

    /// Count for a zero-based month and zero-based day; zero when out of range.
    #[must_use]
    pub fn get(&self, month: usize, day: usize) -> u64 {
        self.0
            .get(month)
            .and_then(|row| row.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the grid rows.
    #[must_use]
    pub const fn rows(&self) -> &[[u64; MAX_DAYS_PER_MONTH]; MONTHS_PER_YEAR] {
        &self.0
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().flatten().sum()
    }

    /// Largest single cell, used to scale the heatmap color range.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl<'a> AddAssign<&'a MonthDayMatrix> for MonthDayMatrix {
    fn add_assign(&mut self, rhs: &'a MonthDayMatrix) {
        for (row, other) in self.0.iter_mut().zip(rhs.0.iter()) {
            for (cell, value) in row.iter_mut().zip(other.iter()) {
                *cell += value;
            }
        }
    }
}

/// Record count per weekday and UTC hour.
///
/// Row 0 is Sunday through row 6 Saturday; the column is the hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayHourMatrix([[u64; HOURS_PER_DAY]; DAYS_PER_WEEK]);

impl WeekdayHourMatrix {
    /// Adds one record to the cell for a weekday (0 = Sunday) and hour.
    pub fn increment(&mut self, weekday: usize, hour: usize) {
        if let Some(cell) = self
            .0
            .get_mut(weekday)
            .and_then(|row| row.get_mut(hour))
        {
            *cell += 1;
        }
    }

    /// Count for a weekday (0 = Sunday) and hour; zero when out of range.
    #[must_use]
    pub fn get(&self, weekday: usize, hour: usize) -> u64 {
        self.0
            .get(weekday)
            .and_then(|row| row.get(hour))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the grid rows.
    #[must_use]
    pub const fn rows(&self) -> &[[u64; HOURS_PER_DAY]; DAYS_PER_WEEK] {
        &self.0
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().flatten().sum()
    }
}

/// Error returned when a year filter string is neither `"all"` nor a year.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid year filter '{value}': expected \"all\" or a year such as 2023")]
pub struct InvalidYearFilterError {
    /// The rejected input.
    pub value: String,
}

/// Restricts an aggregation to one calendar year, or covers every year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum YearFilter {
    /// Aggregate across all years.
    #[default]
    All,
    /// Only records whose parsed year equals this value.
    Year(i32),
}

impl YearFilter {
    /// Returns `true` if a record from `year` passes the filter.
    #[must_use]
    pub const fn matches(self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Year(y) => y == year,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = InvalidYearFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| InvalidYearFilterError {
                value: s.to_string(),
            })
    }
}

impl Serialize for YearFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Year(year) => serializer.serialize_i32(*year),
        }
    }
}

/// Accepts either an integer year or a string (`"all"` or `"2023"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawYearFilter {
    Year(i32),
    Text(String),
}

impl<'de> Deserialize<'de> for YearFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawYearFilter::deserialize(deserializer)? {
            RawYearFilter::Year(year) => Ok(Self::Year(year)),
            RawYearFilter::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
