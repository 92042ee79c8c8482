//! Parsing of the portal's fixed occurrence timestamp format.
//!
//! The export always writes `YYYY/MM/DD HH:MM:SS+00`. Anything else,
//! including single-digit fields, surrounding whitespace or a different
//! offset, is rejected rather than guessed at.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc, Weekday};
use noise_map_aggregate_models::DateKey;
use noise_map_complaint_models::EventRecord;

use crate::ParseError;

/// `chrono` format string for the canonical timestamp.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S+00";

/// Byte layout of a canonical timestamp; `d` marks an ASCII digit.
const TIMESTAMP_SHAPE: &[u8; 22] = b"dddd/dd/dd dd:dd:dd+00";

/// A parsed occurrence timestamp. Always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccurrenceTimestamp(NaiveDateTime);

impl OccurrenceTimestamp {
    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1 through 31.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour of day, 0 through 23.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute, 0 through 59.
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second, 0 through 59.
    #[must_use]
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// The calendar date portion.
    #[must_use]
    pub fn date(&self) -> DateKey {
        DateKey::new(self.0.date())
    }

    /// Day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The timestamp as a UTC `DateTime`.
    #[must_use]
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }
}

impl fmt::Display for OccurrenceTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

fn matches_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == TIMESTAMP_SHAPE.len()
        && bytes
            .iter()
            .zip(TIMESTAMP_SHAPE)
            .all(|(byte, expected)| match *expected {
                b'd' => byte.is_ascii_digit(),
                literal => *byte == literal,
            })
}

/// Parses a `YYYY/MM/DD HH:MM:SS+00` timestamp.
///
/// The components must also form a real date and time, so
/// `2023/02/30 10:00:00+00` is rejected. Seconds run 0 through 59; a
/// `:60` leap second is rejected too.
///
/// # Errors
///
/// Returns [`ParseError::FormatMismatch`] if `raw` does not match the
/// format exactly.
pub fn parse_timestamp(raw: &str) -> Result<OccurrenceTimestamp, ParseError> {
    let mismatch = || ParseError::FormatMismatch {
        raw: raw.to_string(),
    };

    if !matches_shape(raw) {
        return Err(mismatch());
    }

    let parsed = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| mismatch())?;

    // chrono reads `:60` as a leap second; the export never writes one.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(mismatch());
    }

    Ok(OccurrenceTimestamp(parsed))
}

/// Parses the occurrence timestamp of a record.
///
/// # Errors
///
/// Returns [`ParseError::Missing`] if the record has no timestamp, or
/// [`ParseError::FormatMismatch`] if it is malformed.
pub fn parse_record(record: &EventRecord) -> Result<OccurrenceTimestamp, ParseError> {
    record
        .occurred_at
        .as_deref()
        .ok_or(ParseError::Missing)
        .and_then(parse_timestamp)
}
