#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Types produced by the ward estimation engine.
//!
//! A [`ResolvedWard`] is either the backend's authoritative record for a
//! map feature or an estimate synthesized from nearby stations. Display
//! directives ([`FeatureStyle`], [`Tooltip`]) are derived from it and
//! serialized with the field names the map layer expects.

use aqi_map_air_quality_models::{
    AqiCategory, Coordinates, PollutantReadings, PollutionBreakdown, SourceKind, WardRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The station closest to an estimated ward's interpolation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestStation {
    /// Station name.
    pub name: String,
    /// Euclidean distance in degrees.
    pub distance_deg: f64,
}

/// A ward-like placeholder synthesized for a feature with no backend match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedWard {
    /// Identifier of the map feature this estimate was built for.
    pub id: String,
    /// Name from the feature properties, or `"Ward {ward_no}"`.
    pub name: String,
    /// The feature's `Ward_No`, or its ID when it has none.
    pub ward_no: String,
    /// Point the estimate was interpolated at.
    pub coordinates: Coordinates,
    /// Interpolated AQI after the traffic scenario was applied.
    pub aqi: u32,
    /// Interpolated AQI before the traffic scenario was applied.
    pub raw_aqi: u32,
    /// Interpolated pollutant readings.
    pub pollutants: PollutantReadings,
    /// Generic source attribution.
    pub pollution_breakdown: PollutionBreakdown,
    /// Placeholder population derived from the ward number.
    pub estimated_population: u64,
    /// Placeholder area in square kilometres derived from the ward number.
    pub estimated_area_sq_km: f64,
    /// Always `"Stable"`.
    pub trend: String,
    /// Generic recommendations.
    pub recommendations: Vec<String>,
    /// Closest station, if any stations were available.
    pub nearest_station: Option<NearestStation>,
    /// Number of stations located inside the feature polygon.
    pub stations_within: usize,
    /// When this estimate was generated.
    pub generated_at: DateTime<Utc>,
}

/// The display entity for a map feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedWard {
    /// The backend's record for this feature's ward number.
    Authoritative(WardRecord),
    /// Interpolated from station readings.
    Estimated(EstimatedWard),
}

impl ResolvedWard {
    /// Whether this ward was interpolated rather than matched.
    #[must_use]
    pub const fn is_estimated(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Authoritative(ward) => &ward.name,
            Self::Estimated(ward) => &ward.name,
        }
    }

    /// Ward number.
    #[must_use]
    pub fn ward_no(&self) -> &str {
        match self {
            Self::Authoritative(ward) => &ward.ward_no,
            Self::Estimated(ward) => &ward.ward_no,
        }
    }

    /// Current AQI.
    #[must_use]
    pub const fn aqi(&self) -> u32 {
        match self {
            Self::Authoritative(ward) => ward.aqi,
            Self::Estimated(ward) => ward.aqi,
        }
    }

    /// AQI category for the current AQI.
    #[must_use]
    pub const fn category(&self) -> AqiCategory {
        AqiCategory::from_aqi(self.aqi())
    }

    /// Per-channel pollutant readings.
    #[must_use]
    pub const fn pollutants(&self) -> &PollutantReadings {
        match self {
            Self::Authoritative(ward) => &ward.pollutants,
            Self::Estimated(ward) => &ward.pollutants,
        }
    }

    /// Dominant pollution source. Only known for authoritative wards; the
    /// generic breakdown of an estimate says nothing about the ward.
    #[must_use]
    pub fn dominant_source(&self) -> Option<SourceKind> {
        match self {
            Self::Authoritative(ward) => Some(ward.dominant_source()),
            Self::Estimated(_) => None,
        }
    }
}

/// Interaction state of a feature on the map.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SelectionState {
    /// Neither hovered nor selected
    #[default]
    Idle,
    /// Under the pointer
    Hovered,
    /// Clicked for detail display
    Selected,
}

/// Path styling for a ward polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    /// Fill color from the AQI category table.
    pub fill_color: String,
    /// Fill opacity, 0-1.
    pub fill_opacity: f64,
    /// Border color.
    pub color: String,
    /// Border width in pixels.
    pub weight: f64,
    /// Border opacity, 0-1.
    pub opacity: f64,
}

/// Hover tooltip content for a ward polygon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// Ward name.
    pub name: String,
    /// Current AQI.
    pub aqi: u32,
    /// AQI category label (e.g. "Very Poor").
    pub category: String,
    /// Whether the values are interpolated estimates.
    pub estimated: bool,
    /// Dominant source label, for authoritative wards only.
    pub dominant_source: Option<String>,
}

/// Everything the map layer needs for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFeature {
    /// Map feature identifier.
    pub feature_id: String,
    /// Resolved ward.
    pub ward: ResolvedWard,
    /// Path styling.
    pub style: FeatureStyle,
    /// Tooltip content.
    pub tooltip: Tooltip,
}

/// Aggregate statistics over a set of resolved wards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionSummary {
    /// Number of wards.
    pub total_wards: usize,
    /// How many of them are estimates.
    pub estimated_wards: usize,
    /// Mean AQI to one decimal place, 0 when there are no wards.
    pub average_aqi: f64,
    /// Highest AQI, 0 when there are no wards.
    pub max_aqi: u32,
    /// Lowest AQI, 0 when there are no wards.
    pub min_aqi: u32,
    /// Wards with AQI above 300.
    pub critical_wards: usize,
    /// Wards with AQI at or below 100.
    pub good_wards: usize,
    /// Stations in the snapshot used for resolution.
    pub stations_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ward(aqi: u32) -> WardRecord {
        WardRecord {
            id: 7,
            ward_no: "7".to_string(),
            name: "Chandni Chowk".to_string(),
            coordinates: None,
            aqi,
            pollutants: PollutantReadings::default(),
            pollution_breakdown: PollutionBreakdown::GENERIC,
            dominant_source: Some(SourceKind::Industrial),
            population: 120_000,
            area_sq_km: 3.2,
            trend: "+5%".to_string(),
            recommendations: vec![],
            last_updated: None,
        }
    }

    #[test]
    fn authoritative_accessors() {
        let resolved = ResolvedWard::Authoritative(ward(210));
        assert!(!resolved.is_estimated());
        assert_eq!(resolved.name(), "Chandni Chowk");
        assert_eq!(resolved.ward_no(), "7");
        assert_eq!(resolved.category(), AqiCategory::VeryPoor);
        assert_eq!(resolved.dominant_source(), Some(SourceKind::Industrial));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ResolvedWard::Authoritative(ward(90))).unwrap();
        assert_eq!(json["kind"], "authoritative");
        assert_eq!(json["ward_no"], "7");
        assert_eq!(json["aqi"], 90);
    }

    #[test]
    fn selection_state_strings() {
        assert_eq!(SelectionState::Selected.to_string(), "selected");
        assert_eq!(
            "hovered".parse::<SelectionState>().unwrap(),
            SelectionState::Hovered
        );
        assert_eq!(SelectionState::default(), SelectionState::Idle);
    }
}
