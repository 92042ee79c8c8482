#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loader for the published noise complaint JSON document.
//!
//! The document is a JSON array of [`RawComplaint`] objects. Loading only
//! normalizes coordinates; timestamps and labels are left as written for
//! the aggregator to parse and account for. A record with a mistyped field
//! is still loaded, so only a document that is not an array of objects
//! fails.

pub mod parsing;

use std::path::Path;

use noise_map_complaint_models::{EventRecord, RawComplaint};

use crate::parsing::normalize_complaint;

/// Errors that can occur while loading complaint data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a complaint document held in memory.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if `json` is not an array of complaint
/// objects.
pub fn parse_complaints(json: &str) -> Result<Vec<EventRecord>, SourceError> {
    let raw: Vec<RawComplaint> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(normalize_complaint).collect())
}

/// Reads and parses a complaint document from disk.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed.
pub fn load_complaints(path: &Path) -> Result<Vec<EventRecord>, SourceError> {
    log::info!("Loading complaints from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    let records = parse_complaints(&json)?;

    let located = records.iter().filter(|r| r.coordinates().is_some()).count();
    log::info!(
        "Loaded {} complaints ({located} with coordinates)",
        records.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../fixtures/sample.json");

    #[test]
    fn parses_sample_document() {
        let records = parse_complaints(SAMPLE).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(
            records[0].occurred_at.as_deref(),
            Some("2023/01/15 08:00:00+00")
        );
        assert_eq!(records[0].location_label.as_deref(), Some("100 FRANKLIN ST"));
        assert_eq!(records[0].coordinates(), Some((35.9132, -79.0558)));
    }

    #[test]
    fn sample_keeps_records_with_bad_timestamps() {
        let records = parse_complaints(SAMPLE).unwrap();
        assert!(records.iter().any(|r| r.occurred_at.is_none()));
        assert!(
            records
                .iter()
                .any(|r| r.occurred_at.as_deref() == Some("bad-date"))
        );
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_complaints("[]").unwrap().is_empty());
    }

    #[test]
    fn mistyped_fields_do_not_fail_the_document() {
        let records = parse_complaints(
            r#"[
                {"Date_of_Occurrence": "2023/01/15 08:00:00+00", "Latitude": "35.9132", "Longitude": "-79.0558"},
                {"Date_of_Occurrence": 20230115, "Latitude": [], "Offense": 7}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].coordinates(), Some((35.9132, -79.0558)));
        // Left for the aggregator to discard as malformed.
        assert_eq!(records[1].occurred_at.as_deref(), Some("20230115"));
        assert!(records[1].coordinates().is_none());
        assert_eq!(records[1].category_label.as_deref(), Some("7"));
    }

    #[test]
    fn labels_are_passed_through() {
        let records = parse_complaints(
            r#"[{"Date_of_Occurrence": "2023/01/15 08:00:00+00", "Street": " ROSEMARY ST ", "Offense": ""}]"#,
        )
        .unwrap();

        assert_eq!(records[0].location_label.as_deref(), Some(" ROSEMARY ST "));
        assert_eq!(records[0].category_label.as_deref(), Some(""));
    }

    #[test]
    fn rejects_non_array_document() {
        let err = parse_complaints(r#"{"Date_of_Occurrence": "2023/01/15 08:00:00+00"}"#)
            .unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_complaints(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn loads_fixture_from_disk() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample.json");
        let records = load_complaints(&path).unwrap();
        assert_eq!(records.len(), 6);
    }
}
