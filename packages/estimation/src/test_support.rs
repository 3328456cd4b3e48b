//! Fixtures shared by the unit tests.

use aqi_map_air_quality_models::{
    PollutantReadings, PollutionBreakdown, SourceKind, Station, WardRecord,
};
use geojson::JsonObject;

use crate::feature::WardFeature;

pub fn ward(id: i64, ward_no: &str, name: &str, aqi: u32) -> WardRecord {
    WardRecord {
        id,
        ward_no: ward_no.to_string(),
        name: name.to_string(),
        coordinates: None,
        aqi,
        pollutants: PollutantReadings::default(),
        pollution_breakdown: PollutionBreakdown::GENERIC,
        dominant_source: None,
        population: 100_000,
        area_sq_km: 5.0,
        trend: "+5%".to_string(),
        recommendations: vec!["Keep windows closed".to_string()],
        last_updated: None,
    }
}

pub fn ward_with_source(id: i64, ward_no: &str, aqi: u32, source: SourceKind) -> WardRecord {
    WardRecord {
        dominant_source: Some(source),
        ..ward(id, ward_no, &format!("Ward {ward_no}"), aqi)
    }
}

pub fn station(name: &str, lat: f64, lon: f64, aqi: Option<f64>) -> Station {
    Station {
        id: String::new(),
        name: name.to_string(),
        lat,
        lon,
        aqi,
        pollutants: PollutantReadings::default(),
        source: None,
        reliability_score: None,
        timestamp: None,
    }
}

pub fn feature(id: &str, properties: serde_json::Value, geometry: Option<serde_json::Value>) -> WardFeature {
    let properties: JsonObject = serde_json::from_value(properties).unwrap();
    let geometry = geometry.map(|value| serde_json::from_value::<geojson::Geometry>(value).unwrap());
    WardFeature::new(id, properties, geometry)
}

/// A square polygon `[lon, lat]` ring, left unclosed.
pub fn square(lat: f64, lon: f64, size: f64) -> serde_json::Value {
    serde_json::json!({
        "type": "Polygon",
        "coordinates": [[
            [lon, lat],
            [lon, lat + size],
            [lon + size, lat + size],
            [lon + size, lat]
        ]]
    })
}
