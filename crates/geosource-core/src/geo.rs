//! Geographic primitives shared by filters, sorts, and geocode metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A geographic coordinate in WGS84.
///
/// Both fields travel together: a location is either a full `Point` or
/// absent entirely (`null` on the wire, `Option<Point>` here).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Per-record geocoding metadata: administrative areas plus representative
/// points.
///
/// `areas` maps an area-type code to the matched area code (e.g.
/// `"lad" -> "E09000001"`). The set of area-type keys is decided by the
/// server's geocoder and is deliberately not enumerated by this schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    #[serde(default)]
    pub areas: HashMap<String, String>,
    /// Centroid of the smallest matched area, if any.
    pub central_point: Option<Point>,
    /// A representative point guaranteed to lie inside the matched area.
    pub sample_point: Option<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_round_trips_through_json() {
        let point = Point::new(51.5074, -0.1278);
        let json = serde_json::to_string(&point).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn geocode_result_accepts_arbitrary_area_keys() {
        let json = r#"{
            "areas": {"lad": "E09000001", "wmc": "E14000639"},
            "centralPoint": {"latitude": 51.5, "longitude": -0.12},
            "samplePoint": null
        }"#;
        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.areas.get("lad").map(String::as_str), Some("E09000001"));
        assert_eq!(result.areas.get("wmc").map(String::as_str), Some("E14000639"));
        assert!(result.central_point.is_some());
        assert!(result.sample_point.is_none());
    }

    #[test]
    fn geocode_result_tolerates_missing_areas() {
        let json = r#"{"centralPoint": null, "samplePoint": null}"#;
        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert!(result.areas.is_empty());
    }
}
