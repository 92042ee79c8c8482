#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Stateless time-series aggregation over noise complaint records.
//!
//! Every public function takes an immutable slice of
//! [`EventRecord`]s and returns a freshly built aggregate. Nothing is
//! retained between calls, so a year-filter change in the dashboard is
//! just another call.
//!
//! Records whose timestamp is missing or does not match
//! `YYYY/MM/DD HH:MM:SS+00` are skipped. The number skipped is returned
//! alongside every aggregate in [`Aggregated::discarded`] so presentation
//! layers can surface a data-quality indicator.

pub mod counts;
pub mod markers;
pub mod matrix;
pub mod ranking;
pub mod snapshot;
pub mod timestamp;

pub use counts::{
    available_years, count_by_day, count_by_hour, count_by_label, count_by_weekday_hour,
    daily_range, fill_daily_range,
};
pub use markers::{MarkerCollection, build_marker_collection};
pub use matrix::build_month_day_matrix;
pub use noise_map_aggregate_models::Aggregated;
pub use ranking::{rank_days, top_n_by_day};
pub use snapshot::DashboardSnapshot;
pub use timestamp::{OccurrenceTimestamp, parse_record, parse_timestamp};

use noise_map_complaint_models::EventRecord;
use thiserror::Error;

/// Why a record's timestamp could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The record carries no timestamp at all.
    #[error("record has no occurrence timestamp")]
    Missing,

    /// The timestamp is not a valid `YYYY/MM/DD HH:MM:SS+00` value.
    #[error("timestamp '{raw}' does not match YYYY/MM/DD HH:MM:SS+00")]
    FormatMismatch {
        /// The rejected input.
        raw: String,
    },
}

impl ParseError {
    /// Short machine-readable reason code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::FormatMismatch { .. } => "format-mismatch",
        }
    }
}

/// A record whose timestamp parsed successfully.
pub(crate) type ParsedEntry<'a> = (OccurrenceTimestamp, &'a EventRecord);

/// Records split into usable entries and a discard count.
///
/// Built once per aggregation (or once per dashboard snapshot) so that
/// every aggregate derived from it agrees on which records were skipped.
pub(crate) struct ParsedRecords<'a> {
    entries: Vec<ParsedEntry<'a>>,
    discarded: u64,
}

impl<'a> ParsedRecords<'a> {
    pub(crate) fn parse(records: &'a [EventRecord]) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut discarded = 0u64;

        for record in records {
            match parse_record(record) {
                Ok(ts) => entries.push((ts, record)),
                Err(e) => {
                    log::debug!("Skipping record ({}): {e}", e.reason());
                    discarded += 1;
                }
            }
        }

        if discarded > 0 {
            log::debug!(
                "Parsed {} of {} records ({discarded} discarded)",
                entries.len(),
                records.len()
            );
        }

        Self { entries, discarded }
    }

    pub(crate) fn entries(&self) -> &[ParsedEntry<'a>] {
        &self.entries
    }

    pub(crate) const fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Runs `f` over the parsed entries and pairs the result with the
    /// discard count.
    pub(crate) fn aggregate<T>(&self, f: impl FnOnce(&[ParsedEntry<'a>]) -> T) -> Aggregated<T> {
        Aggregated::new(f(&self.entries), self.discarded)
    }
}
