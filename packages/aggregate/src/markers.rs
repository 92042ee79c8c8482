//! `GeoJSON` point export for the clustered complaint map.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use noise_map_complaint_models::EventRecord;
use serde::Serialize;

/// Map markers for every record that has coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerCollection {
    /// One point feature per located record, in input order.
    pub features: FeatureCollection,
    /// Records skipped because latitude or longitude was missing.
    pub missing_coordinates: u64,
}

fn marker_properties(record: &EventRecord) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert(
        "occurredAt".to_string(),
        serde_json::Value::from(record.occurred_at.clone()),
    );
    properties.insert(
        "location".to_string(),
        serde_json::Value::from(record.location_label.clone()),
    );
    properties.insert(
        "category".to_string(),
        serde_json::Value::from(record.category_label.clone()),
    );
    properties
}

/// Builds a `FeatureCollection` of points (`[longitude, latitude]`).
///
/// Timestamps are not parsed here; the popup shows the raw value.
#[must_use]
pub fn build_marker_collection(records: &[EventRecord]) -> MarkerCollection {
    let mut features = Vec::with_capacity(records.len());
    let mut missing_coordinates = 0u64;

    for record in records {
        let Some((latitude, longitude)) = record.coordinates() else {
            log::warn!(
                "Missing coordinates for complaint at {}",
                record.occurred_at.as_deref().unwrap_or("unknown time")
            );
            missing_coordinates += 1;
            continue;
        };

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![longitude, latitude]))),
            id: None,
            properties: Some(marker_properties(record)),
            foreign_members: None,
        });
    }

    log::debug!(
        "Built {} map markers ({missing_coordinates} without coordinates)",
        features.len()
    );

    MarkerCollection {
        features: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        missing_coordinates,
    }
}
