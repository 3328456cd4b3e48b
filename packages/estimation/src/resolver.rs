//! Resolves map features into display-ready wards.
//!
//! A feature whose `Ward_No` matches a backend ward gets that record
//! unchanged. Any other feature gets an [`EstimatedWard`] interpolated from
//! the station snapshot at its centroid, with the traffic scenario applied
//! to the AQI. Resolution never fails: every step has a fallback.
//!
//! [`FeatureResolver`] returns authoritative records as given. The backend
//! applies the scenario to them server-side (see [`crate::simulate`]);
//! [`resolve_scenario`] does both halves in one pass.

use aqi_map_air_quality_models::{Coordinates, PollutionBreakdown, WardRecord};
use aqi_map_estimation_models::{EstimatedWard, NearestStation, ResolvedWard};
use chrono::{DateTime, Utc};

use crate::config::EstimationConfig;
use crate::feature::WardFeature;
use crate::idw::Interpolator;
use crate::matcher::match_ward;
use crate::recommend;
use crate::scenario::ScenarioAdjuster;
use crate::simulate::simulate_wards;
use crate::stations::StationSnapshot;

/// City-center point used when a feature has no usable geometry.
pub const CITY_CENTER: Coordinates = Coordinates::new(28.7041, 77.1025);

/// Trend label for estimated wards.
pub const ESTIMATED_TREND: &str = "Stable";

/// Resolves features against one refresh's wards and stations under one
/// scenario setting.
pub struct FeatureResolver<'a> {
    wards: &'a [WardRecord],
    stations: &'a StationSnapshot,
    traffic_reduction_percent: f64,
    config: &'a EstimationConfig,
    interpolator: Interpolator,
    adjuster: ScenarioAdjuster,
}

impl<'a> FeatureResolver<'a> {
    /// Creates a resolver over immutable snapshots.
    #[must_use]
    pub fn new(
        wards: &'a [WardRecord],
        stations: &'a StationSnapshot,
        traffic_reduction_percent: f64,
        config: &'a EstimationConfig,
    ) -> Self {
        Self {
            wards,
            stations,
            traffic_reduction_percent,
            config,
            interpolator: Interpolator::new(&config.interpolation),
            adjuster: ScenarioAdjuster::new(&config.scenario),
        }
    }

    /// Resolves a feature, stamping estimates with the current time.
    #[must_use]
    pub fn resolve(&self, feature: &WardFeature) -> ResolvedWard {
        self.resolve_at(feature, Utc::now())
    }

    /// Resolves a feature, stamping estimates with `now`.
    #[must_use]
    pub fn resolve_at(&self, feature: &WardFeature, now: DateTime<Utc>) -> ResolvedWard {
        if let Some(ward) = match_ward(feature, self.wards) {
            log::debug!(
                "Feature {} matched backend ward {} ({})",
                feature.id,
                ward.ward_no,
                ward.name
            );
            return ResolvedWard::Authoritative(ward.clone());
        }

        log::debug!(
            "Feature {} has no backend ward; interpolating from {} stations",
            feature.id,
            self.stations.len()
        );
        ResolvedWard::Estimated(self.estimate(feature, now))
    }

    /// Resolves every feature with a single generation timestamp.
    #[must_use]
    pub fn resolve_all(&self, features: &[WardFeature]) -> Vec<ResolvedWard> {
        let now = Utc::now();
        features
            .iter()
            .map(|feature| self.resolve_at(feature, now))
            .collect()
    }

    fn estimate(&self, feature: &WardFeature, now: DateTime<Utc>) -> EstimatedWard {
        let point = feature.centroid().unwrap_or_else(|| {
            log::warn!(
                "Feature {} has no usable geometry; interpolating at the fallback point",
                feature.id
            );
            self.config.resolver.fallback_point()
        });

        let stations = self.stations.stations();
        let raw_aqi = self.interpolator.aqi(&point, stations);
        let aqi = self
            .adjuster
            .adjust(raw_aqi, self.traffic_reduction_percent);
        let pollutants = self.interpolator.pollutants(&point, stations);

        let ward_no = feature.ward_no().unwrap_or_else(|| feature.id.clone());
        let name = feature
            .display_name(&self.config.resolver.name_properties)
            .unwrap_or_else(|| format!("Ward {ward_no}"));

        let nearest_station = self
            .stations
            .nearest(&point)
            .map(|(station, distance_deg)| NearestStation {
                name: station.name.clone(),
                distance_deg,
            });

        EstimatedWard {
            id: feature.id.clone(),
            name,
            coordinates: point,
            aqi,
            raw_aqi,
            pollutants,
            pollution_breakdown: PollutionBreakdown::GENERIC,
            estimated_population: estimated_population(&ward_no),
            estimated_area_sq_km: estimated_area_sq_km(&ward_no),
            ward_no,
            trend: ESTIMATED_TREND.to_string(),
            recommendations: recommend::generic(),
            nearest_station,
            stations_within: self.stations.count_within(feature),
            generated_at: now,
        }
    }
}

/// Resolves every feature under a traffic scenario.
///
/// With a positive reduction the ward listing is simulated first, so
/// matched wards carry the backend's per-source adjustment while estimates
/// get the flat traffic-share adjustment.
#[must_use]
pub fn resolve_scenario(
    features: &[WardFeature],
    wards: &[WardRecord],
    stations: &StationSnapshot,
    traffic_reduction_percent: f64,
    config: &EstimationConfig,
) -> Vec<ResolvedWard> {
    let simulated;
    let wards = if traffic_reduction_percent > 0.0 {
        simulated = simulate_wards(wards, traffic_reduction_percent, &config.simulation);
        simulated.as_slice()
    } else {
        wards
    };

    FeatureResolver::new(wards, stations, traffic_reduction_percent, config).resolve_all(features)
}

/// Sum of the UTF-16 code units of a ward number.
fn ward_number_hash(ward_no: &str) -> u64 {
    ward_no.encode_utf16().map(u64::from).sum()
}

/// Placeholder population derived from a ward number. Not measured data.
#[must_use]
pub fn estimated_population(ward_no: &str) -> u64 {
    80_000 + (ward_number_hash(ward_no) * 1234) % 400_000
}

/// Placeholder area in km², to one decimal, derived from a ward number.
/// Not measured data.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimated_area_sq_km(ward_no: &str) -> f64 {
    let h = ward_number_hash(ward_no) as f64;
    let area = 2.5 + (h * 0.17) % 12.0;
    (area * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use aqi_map_air_quality_models::{PollutantReadings, SourceKind};

    use super::*;
    use crate::test_support::{feature, square, station, ward, ward_with_source};

    fn config() -> EstimationConfig {
        EstimationConfig::default()
    }

    fn two_stations() -> StationSnapshot {
        StationSnapshot::new(vec![
            station("North", 28.70, 77.10, Some(100.0)),
            station("South", 28.71, 77.11, Some(300.0)),
        ])
    }

    #[test]
    fn matched_feature_returns_record_untouched() {
        let wards = vec![ward(1, "3", "Three", 150), ward(7, "7", "Chandni Chowk", 210)];
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&wards, &stations, 50.0, &config);

        let f = feature(
            "feature-3",
            serde_json::json!({"Ward_No": "7"}),
            Some(square(28.70, 77.10, 0.01)),
        );
        match resolver.resolve(&f) {
            ResolvedWard::Authoritative(record) => {
                assert_eq!(record, wards[1]);
                assert_eq!(record.aqi, 210);
            }
            ResolvedWard::Estimated(_) => panic!("expected an authoritative ward"),
        }
    }

    #[test]
    fn unmatched_feature_is_interpolated_at_centroid() {
        let wards = vec![ward(7, "7", "Chandni Chowk", 210)];
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&wards, &stations, 0.0, &config);

        // Vertex average of this ring is (28.705, 77.105); both stations
        // sit strictly inside it.
        let f = feature(
            "feature-9",
            serde_json::json!({}),
            Some(square(28.695, 77.095, 0.02)),
        );
        let resolved = resolver.resolve(&f);
        assert!(resolved.is_estimated());

        let ResolvedWard::Estimated(estimate) = resolved else {
            unreachable!();
        };
        assert!((estimate.coordinates.lat - 28.705).abs() < 1e-9);
        assert!((estimate.coordinates.lon - 77.105).abs() < 1e-9);
        assert_eq!(estimate.raw_aqi, 200);
        assert_eq!(estimate.aqi, 200);
        assert_eq!(estimate.id, "feature-9");
        assert_eq!(estimate.ward_no, "feature-9");
        assert_eq!(estimate.name, "Ward feature-9");
        assert_eq!(estimate.trend, "Stable");
        assert_eq!(estimate.pollution_breakdown, PollutionBreakdown::GENERIC);
        assert_eq!(estimate.pollutants, PollutantReadings::default());
        assert_eq!(estimate.stations_within, 2);
        assert!(!estimate.recommendations.is_empty());
    }

    #[test]
    fn scenario_applies_to_interpolated_aqi() {
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&[], &stations, 50.0, &config);

        let f = feature(
            "feature-9",
            serde_json::json!({}),
            Some(square(28.70, 77.10, 0.01)),
        );
        let ResolvedWard::Estimated(estimate) = resolver.resolve(&f) else {
            panic!("expected an estimate");
        };
        assert_eq!(estimate.raw_aqi, 200);
        assert_eq!(estimate.aqi, 160);
    }

    #[test]
    fn unmatched_ward_no_is_kept_for_display() {
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&[], &stations, 0.0, &config);

        let f = feature(
            "feature-4",
            serde_json::json!({"Ward_No": 12, "Ward_Name": "Sita Puri"}),
            None,
        );
        let ResolvedWard::Estimated(estimate) = resolver.resolve(&f) else {
            panic!("expected an estimate");
        };
        assert_eq!(estimate.ward_no, "12");
        assert_eq!(estimate.name, "Sita Puri");
        assert_eq!(estimate.estimated_population, 202_166);
        assert!((estimate.estimated_area_sq_km - 7.3).abs() < 1e-9);
    }

    #[test]
    fn missing_geometry_uses_city_center() {
        let config = config();
        let stations = StationSnapshot::new(vec![]);
        let resolver = FeatureResolver::new(&[], &stations, 0.0, &config);

        let f = feature("feature-1", serde_json::json!({}), None);
        let ResolvedWard::Estimated(estimate) = resolver.resolve(&f) else {
            panic!("expected an estimate");
        };
        assert_eq!(estimate.coordinates, CITY_CENTER);
        assert_eq!(estimate.aqi, 180);
        assert_eq!(estimate.nearest_station, None);
        assert_eq!(estimate.stations_within, 0);
    }

    #[test]
    fn pollutants_absent_unless_reported() {
        let mut reporting = station("Reporting", 28.6, 77.2, Some(250.0));
        reporting.pollutants.pm10 = Some(180.0);
        let stations = StationSnapshot::new(vec![reporting]);
        let config = config();
        let resolver = FeatureResolver::new(&[], &stations, 0.0, &config);

        let f = feature("feature-2", serde_json::json!({}), Some(square(28.6, 77.2, 0.02)));
        let ResolvedWard::Estimated(estimate) = resolver.resolve(&f) else {
            panic!("expected an estimate");
        };
        assert_eq!(estimate.pollutants.pm10, Some(180.0));
        assert_eq!(estimate.pollutants.pm25, None);
        assert_eq!(estimate.pollutants.co, None);
        assert_eq!(
            estimate.nearest_station.map(|s| s.name).as_deref(),
            Some("Reporting")
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let wards = vec![ward(7, "7", "Chandni Chowk", 210)];
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&wards, &stations, 30.0, &config);
        let now = Utc::now();

        let features = [
            feature("feature-3", serde_json::json!({"Ward_No": "7"}), None),
            feature("feature-9", serde_json::json!({}), Some(square(28.70, 77.10, 0.01))),
            feature("feature-10", serde_json::json!({}), None),
        ];
        for f in &features {
            assert_eq!(resolver.resolve_at(f, now), resolver.resolve_at(f, now));
        }
    }

    #[test]
    fn resolve_all_shares_one_timestamp() {
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&[], &stations, 0.0, &config);

        let features = [
            feature("feature-1", serde_json::json!({}), None),
            feature("feature-2", serde_json::json!({}), Some(square(28.70, 77.10, 0.01))),
        ];
        let resolved = resolver.resolve_all(&features);
        assert_eq!(resolved.len(), 2);

        let stamps: Vec<_> = resolved
            .iter()
            .map(|ward| match ward {
                ResolvedWard::Estimated(estimate) => estimate.generated_at,
                ResolvedWard::Authoritative(_) => panic!("expected estimates"),
            })
            .collect();
        assert_eq!(stamps[0], stamps[1]);
    }

    #[test]
    fn authoritative_dominant_source_survives() {
        let mut record = ward(7, "7", "Chandni Chowk", 210);
        record.dominant_source = Some(SourceKind::BiomassBurning);
        let wards = vec![record];
        let stations = two_stations();
        let config = config();
        let resolver = FeatureResolver::new(&wards, &stations, 0.0, &config);

        let f = feature("feature-3", serde_json::json!({"Ward_No": "7"}), None);
        assert_eq!(
            resolver.resolve(&f).dominant_source(),
            Some(SourceKind::BiomassBurning)
        );
    }

    #[test]
    fn scenario_adjusts_matched_and_estimated_wards() {
        let wards = vec![ward_with_source(7, "7", 300, SourceKind::Traffic)];
        let stations = two_stations();
        let config = config();
        let features = [
            feature("feature-3", serde_json::json!({"Ward_No": "7"}), None),
            feature("feature-9", serde_json::json!({}), Some(square(28.70, 77.10, 0.01))),
        ];

        let resolved = resolve_scenario(&features, &wards, &stations, 50.0, &config);
        let ResolvedWard::Authoritative(matched) = &resolved[0] else {
            panic!("expected an authoritative ward");
        };
        assert_eq!(matched.aqi, 240);
        assert_eq!(matched.trend, "-20%");

        let ResolvedWard::Estimated(estimate) = &resolved[1] else {
            panic!("expected an estimate");
        };
        assert_eq!(estimate.raw_aqi, 200);
        assert_eq!(estimate.aqi, 160);

        // The caller's listing is left as given.
        assert_eq!(wards[0].aqi, 300);
    }

    #[test]
    fn zero_scenario_leaves_matched_wards_untouched() {
        let wards = vec![ward_with_source(7, "7", 300, SourceKind::Traffic)];
        let stations = two_stations();
        let config = config();
        let features = [feature("feature-3", serde_json::json!({"Ward_No": "7"}), None)];

        let resolved = resolve_scenario(&features, &wards, &stations, 0.0, &config);
        assert_eq!(resolved, vec![ResolvedWard::Authoritative(wards[0].clone())]);
    }

    #[test]
    fn placeholder_demographics() {
        assert_eq!(estimated_population("7"), 147_870);
        assert_eq!(estimated_population("12"), 202_166);
        assert!((estimated_area_sq_km("12") - 7.3).abs() < 1e-9);
        assert_eq!(estimated_population(""), 80_000);
        assert!((estimated_area_sq_km("") - 2.5).abs() < 1e-9);
    }
}
