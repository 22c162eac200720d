//! Response envelope: GeoJSON feature collections and the error payload.
//!
//! A success body is an RFC 7946 `FeatureCollection` of point features,
//! served as `application/geo+json`. A failure body is a flat
//! [`ErrorResponse`]. The two shapes share no discriminant field, so
//! [`ResponseBody::from_value`] disambiguates by the presence of the `error`
//! key — the required first step before treating any body as a collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::{GeocodeResult, Point};

/// Discriminant for [`PointGeometry`]; only `"Point"` is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    #[default]
    Point,
}

/// Discriminant for [`Feature`]; only `"Feature"` is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// Discriminant for [`FeatureCollection`]; only `"FeatureCollection"` is
/// valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

/// GeoJSON point geometry.
///
/// `coordinates` follow RFC 7946 axis order: longitude first, then latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

impl From<Point> for PointGeometry {
    fn from(point: Point) -> Self {
        Self {
            kind: GeometryType::Point,
            coordinates: [point.longitude, point.latitude],
        }
    }
}

impl From<PointGeometry> for Point {
    fn from(geometry: PointGeometry) -> Self {
        Self::new(geometry.latitude(), geometry.longitude())
    }
}

/// Properties of a returned feature.
///
/// Three reserved, underscore-prefixed keys are always present;
/// `_geocodeResult` serializes as `null` when absent rather than being
/// dropped. Every other key is passed through untyped from the source
/// record via `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "_dataSourceId")]
    pub data_source_id: String,
    #[serde(rename = "_externalId")]
    pub external_id: String,
    #[serde(rename = "_geocodeResult")]
    pub geocode_result: Option<GeocodeResult>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One located record from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

/// The full success response body: one page of features (or all of them
/// when pagination is bypassed with `all=true`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    pub features: Vec<Feature>,
}

/// Failure payload returned with a 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A decoded response body, either shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Collection(FeatureCollection),
    Error(ErrorResponse),
}

impl ResponseBody {
    /// Decodes a body, checking for the `error` key before attempting the
    /// collection shape.
    ///
    /// The endpoint's success and error bodies carry no shared discriminant;
    /// the presence of `error` is the only reliable signal, and servers have
    /// been observed pairing an error body with a 2xx status. Always decode
    /// through this method rather than straight into [`FeatureCollection`].
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the body matches neither shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.get("error").is_some() {
            serde_json::from_value(value).map(Self::Error)
        } else {
            serde_json::from_value(value).map(Self::Collection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "id": "abc",
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-0.1278, 51.5074]},
            "properties": {
                "_dataSourceId": "ds1",
                "_externalId": "ext1",
                "_geocodeResult": null,
                "name": "Cafe"
            }
        }]
    }"#;

    #[test]
    fn collection_fixture_decodes_reserved_and_passthrough_properties() {
        let collection: FeatureCollection = serde_json::from_str(COLLECTION_FIXTURE).unwrap();
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.id, "abc");
        assert_eq!(feature.properties.data_source_id, "ds1");
        assert_eq!(feature.properties.external_id, "ext1");
        assert!(feature.properties.geocode_result.is_none());
        assert_eq!(
            feature.properties.extra.get("name"),
            Some(&serde_json::Value::String("Cafe".into()))
        );
    }

    #[test]
    fn geometry_coordinates_are_longitude_then_latitude() {
        let collection: FeatureCollection = serde_json::from_str(COLLECTION_FIXTURE).unwrap();
        let geometry = collection.features[0].geometry;
        assert!((geometry.longitude() - -0.1278).abs() < f64::EPSILON);
        assert!((geometry.latitude() - 51.5074).abs() < f64::EPSILON);
        let point = Point::from(geometry);
        assert!((point.latitude - 51.5074).abs() < f64::EPSILON);
    }

    #[test]
    fn geocode_result_null_survives_serialization() {
        let collection: FeatureCollection = serde_json::from_str(COLLECTION_FIXTURE).unwrap();
        let value = serde_json::to_value(&collection).unwrap();
        // Reserved keys are always present, null included.
        assert!(value["features"][0]["properties"]
            .as_object()
            .unwrap()
            .contains_key("_geocodeResult"));
        assert!(value["features"][0]["properties"]["_geocodeResult"].is_null());
    }

    #[test]
    fn error_body_is_distinguished_by_error_key_alone() {
        let body = ResponseBody::from_value(serde_json::json!({"error": "Not found"})).unwrap();
        assert!(matches!(body, ResponseBody::Error(ref e) if e.error == "Not found"));

        let collection_value: serde_json::Value =
            serde_json::from_str(COLLECTION_FIXTURE).unwrap();
        let body = ResponseBody::from_value(collection_value).unwrap();
        assert!(matches!(body, ResponseBody::Collection(ref c) if c.features.len() == 1));
    }

    #[test]
    fn error_details_are_opaque() {
        let body = ResponseBody::from_value(serde_json::json!({
            "error": "Bad filter",
            "details": {"node": 3, "reason": "unknown column"}
        }))
        .unwrap();
        let ResponseBody::Error(error) = body else {
            panic!("expected error body");
        };
        assert_eq!(error.details.unwrap()["reason"], "unknown column");
    }

    #[test]
    fn wrong_discriminant_is_rejected() {
        let result: Result<FeatureCollection, _> =
            serde_json::from_str(r#"{"type": "NotACollection", "features": []}"#);
        assert!(result.is_err());
    }
}
