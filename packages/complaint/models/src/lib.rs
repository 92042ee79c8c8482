#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Noise complaint record types and the normalized event format.
//!
//! The public data portal publishes complaints as a JSON array of
//! [`RawComplaint`] objects. Every consumer works with the normalized
//! [`EventRecord`] instead, which keeps the occurrence timestamp as the
//! original string so that parsing (and discard accounting) happens in
//! one place: the aggregator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complaint exactly as it appears in the published JSON document.
///
/// Field names follow the portal's export (`Date_of_Occurrence`,
/// `Latitude`, ...). Unknown fields are ignored. Every field is kept as a
/// loose JSON value so that one mistyped record (a numeric timestamp, a
/// quoted coordinate) cannot fail the whole document; the loader decides
/// what each value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComplaint {
    /// Occurrence timestamp, normally `YYYY/MM/DD HH:MM:SS+00`.
    #[serde(rename = "Date_of_Occurrence", default)]
    pub date_of_occurrence: Option<Value>,
    /// Latitude (WGS84), a number or a numeric string.
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<Value>,
    /// Longitude (WGS84), a number or a numeric string.
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<Value>,
    /// Street or block address of the complaint.
    #[serde(rename = "Street", default)]
    pub street: Option<Value>,
    /// Offense description as logged by the department.
    #[serde(rename = "Offense", default)]
    pub offense: Option<Value>,
}

/// One logged occurrence, normalized for aggregation.
///
/// `occurred_at` is kept unparsed. Records with a missing or malformed
/// timestamp are still valid records; they are simply excluded (and
/// counted) by every time-based aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Raw occurrence timestamp. `None` when the source omitted it.
    pub occurred_at: Option<String>,
    /// Latitude (WGS84). `None` if unknown.
    pub latitude: Option<f64>,
    /// Longitude (WGS84). `None` if unknown.
    pub longitude: Option<f64>,
    /// Opaque location description (e.g. "100 FRANKLIN ST").
    pub location_label: Option<String>,
    /// Opaque category description (e.g. "NOISE - LOUD MUSIC").
    pub category_label: Option<String>,
}

impl EventRecord {
    /// Creates a record carrying only a timestamp.
    #[must_use]
    pub fn at(occurred_at: impl Into<String>) -> Self {
        Self {
            occurred_at: Some(occurred_at.into()),
            ..Self::default()
        }
    }

    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}
