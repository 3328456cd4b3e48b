//! Map features representing ward boundaries.
//!
//! Features come from a `GeoJSON` `FeatureCollection` sourced independently
//! of the backend's ward data. Each one is given a session-stable ID
//! (`feature-{index}` when the file doesn't carry one) and its polygon is
//! converted once up front for point-in-polygon queries.

use aqi_map_air_quality_models::{Coordinates, ward_number_from_f64};
use geo::{Contains, MultiPolygon};
use geojson::{GeoJson, Geometry, JsonObject, JsonValue, feature::Id};

use crate::EstimationError;

/// Property holding the ward number in ward boundary files.
pub const WARD_NO_PROPERTY: &str = "Ward_No";

/// A ward boundary feature.
#[derive(Debug, Clone)]
pub struct WardFeature {
    /// Session-stable identifier.
    pub id: String,
    /// Feature properties.
    pub properties: JsonObject,
    /// Boundary geometry, as given.
    pub geometry: Option<Geometry>,
    polygon: Option<MultiPolygon<f64>>,
}

impl WardFeature {
    /// Creates a feature from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, properties: JsonObject, geometry: Option<Geometry>) -> Self {
        let polygon = geometry.as_ref().and_then(to_multi_polygon);
        Self {
            id: id.into(),
            properties,
            geometry,
            polygon,
        }
    }

    /// Converts a parsed `GeoJSON` feature, assigning `feature-{index}` as
    /// the ID when the feature has none.
    #[must_use]
    pub fn from_geojson(feature: geojson::Feature, index: usize) -> Self {
        let id = match feature.id {
            Some(Id::String(id)) => id,
            Some(Id::Number(number)) => number.to_string(),
            None => format!("feature-{index}"),
        };
        Self::new(id, feature.properties.unwrap_or_default(), feature.geometry)
    }

    /// The feature's ward number, stringified.
    ///
    /// `None` when the property is missing, null, empty, or not a scalar.
    #[must_use]
    pub fn ward_no(&self) -> Option<String> {
        self.properties
            .get(WARD_NO_PROPERTY)
            .and_then(stringify_scalar)
    }

    /// The first non-empty string among the given properties.
    #[must_use]
    pub fn display_name(&self, keys: &[String]) -> Option<String> {
        keys.iter().find_map(|key| {
            self.properties
                .get(key)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
        })
    }

    /// Representative point for interpolation. See [`crate::centroid`].
    #[must_use]
    pub fn centroid(&self) -> Option<Coordinates> {
        crate::centroid::centroid(self.geometry.as_ref())
    }

    /// The boundary as a multi-polygon, if it is polygonal.
    #[must_use]
    pub const fn polygon(&self) -> Option<&MultiPolygon<f64>> {
        self.polygon.as_ref()
    }

    /// Whether a point lies inside the boundary.
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.polygon
            .as_ref()
            .is_some_and(|polygon| polygon.contains(&geo::Point::new(point.lon, point.lat)))
    }
}

/// Parses a `GeoJSON` document into ward features.
///
/// Accepts a `FeatureCollection` or a single `Feature`.
///
/// # Errors
///
/// Returns an error if the text is not valid `GeoJSON`, or is a bare
/// geometry.
pub fn parse_features(geojson_str: &str) -> Result<Vec<WardFeature>, EstimationError> {
    let features = match geojson_str.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(EstimationError::Conversion {
                message: "expected a Feature or FeatureCollection, found a bare geometry"
                    .to_string(),
            });
        }
    };

    let features: Vec<WardFeature> = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| WardFeature::from_geojson(feature, index))
        .collect();

    log::debug!("Parsed {} ward features", features.len());
    Ok(features)
}

/// Stringifies a scalar JSON value the way a browser would.
fn stringify_scalar(value: &JsonValue) -> Option<String> {
    let text = match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Number(number) => {
            if let Some(n) = number.as_i64() {
                n.to_string()
            } else if let Some(n) = number.as_u64() {
                n.to_string()
            } else {
                ward_number_from_f64(number.as_f64()?)
            }
        }
        JsonValue::Bool(flag) => flag.to_string(),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multi_polygon(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARDS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"Ward_No": "7", "Ward_Name": "Chandni Chowk"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[77.0, 28.0], [77.0, 29.0], [78.0, 29.0], [78.0, 28.0], [77.0, 28.0]]]
                }
            },
            {
                "type": "Feature",
                "id": "ward-b",
                "properties": {"Ward_No": 12},
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": {"Ward_No": null, "name": "  "},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn assigns_ids_and_stringifies_ward_numbers() {
        let features = parse_features(WARDS).unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0].id, "feature-0");
        assert_eq!(features[0].ward_no().as_deref(), Some("7"));

        assert_eq!(features[1].id, "ward-b");
        assert_eq!(features[1].ward_no().as_deref(), Some("12"));

        assert_eq!(features[2].id, "feature-2");
        assert_eq!(features[2].ward_no(), None);
    }

    #[test]
    fn display_name_skips_blank_values() {
        let features = parse_features(WARDS).unwrap();
        let keys = vec!["name".to_string(), "Ward_Name".to_string()];
        assert_eq!(
            features[0].display_name(&keys).as_deref(),
            Some("Chandni Chowk")
        );
        assert_eq!(features[2].display_name(&keys), None);
    }

    #[test]
    fn point_in_polygon() {
        let features = parse_features(WARDS).unwrap();
        assert!(features[0].contains(&Coordinates::new(28.5, 77.5)));
        assert!(!features[0].contains(&Coordinates::new(30.0, 77.5)));
        assert!(!features[1].contains(&Coordinates::new(28.5, 77.5)));
    }

    #[test]
    fn float_ward_numbers_drop_integral_fraction() {
        let mut properties = JsonObject::new();
        properties.insert(WARD_NO_PROPERTY.to_string(), serde_json::json!(7.0));
        let feature = WardFeature::new("f", properties, None);
        assert_eq!(feature.ward_no().as_deref(), Some("7"));

        let mut properties = JsonObject::new();
        properties.insert(WARD_NO_PROPERTY.to_string(), serde_json::json!(""));
        let feature = WardFeature::new("f", properties, None);
        assert_eq!(feature.ward_no(), None);
    }

    #[test]
    fn rejects_bare_geometry() {
        let result = parse_features(r#"{"type": "Point", "coordinates": [77.0, 28.0]}"#);
        assert!(matches!(result, Err(EstimationError::Conversion { .. })));
    }
}
