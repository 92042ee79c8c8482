//! Field sanitation applied while normalizing raw complaints.

use noise_map_complaint_models::{EventRecord, RawComplaint};
use serde_json::Value;

/// Parses lat/lng from optional f64 fields. Returns `None` if missing or zero.
///
/// The portal writes `0` for complaints it could not place.
#[must_use]
pub fn parse_lat_lng_f64(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    let latitude = lat?;
    let longitude = lng?;
    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    Some((latitude, longitude))
}

/// Reads one coordinate from a JSON number or numeric string.
///
/// Anything else, including non-finite values, is `None`.
#[must_use]
pub fn coordinate_value(value: Option<&Value>) -> Option<f64> {
    let coordinate = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    coordinate.is_finite().then_some(coordinate)
}

/// Parses lat/lng from loose JSON fields. Returns `None` if either is
/// missing, unparseable, or zero.
#[must_use]
pub fn parse_lat_lng(lat: Option<&Value>, lng: Option<&Value>) -> Option<(f64, f64)> {
    parse_lat_lng_f64(coordinate_value(lat), coordinate_value(lng))
}

/// Returns a string field exactly as written. Non-string values keep their
/// JSON text, so a numeric timestamp still reaches the aggregator and is
/// counted as malformed there.
#[must_use]
pub fn text_value(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Converts a raw complaint into an [`EventRecord`], dropping placeholder
/// coordinates. Timestamps and labels are passed through untouched.
#[must_use]
pub fn normalize_complaint(raw: RawComplaint) -> EventRecord {
    let coordinates = parse_lat_lng(raw.latitude.as_ref(), raw.longitude.as_ref());

    EventRecord {
        occurred_at: text_value(raw.date_of_occurrence),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, lng)| lng),
        location_label: text_value(raw.street),
        category_label: text_value(raw.offense),
    }
}
