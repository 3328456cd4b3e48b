//! Server-side traffic scenario over the ward listing.
//!
//! Unlike the client-side [`crate::scenario`] adjustment, the traffic share
//! depends on each ward's dominant source, and AQI is truncated rather than
//! rounded. Recommendations are regenerated for the simulated AQI.

use aqi_map_air_quality_models::{SourceKind, WardRecord};

use crate::config::SimulationConfig;
use crate::recommend;

/// Returns a copy of `ward` under a traffic reduction of
/// `traffic_reduction_percent` (clamped to 0-100).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn simulate_ward(
    ward: &WardRecord,
    traffic_reduction_percent: f64,
    config: &SimulationConfig,
) -> WardRecord {
    let percent = if traffic_reduction_percent.is_nan() {
        0.0
    } else {
        traffic_reduction_percent.clamp(0.0, 100.0)
    };

    let dominant = ward.dominant_source();
    let share = if dominant == SourceKind::Traffic {
        config.vehicular_traffic_share
    } else {
        config.other_traffic_share
    };
    let factor = share * (percent / 100.0);

    let aqi = (f64::from(ward.aqi) * (1.0 - factor))
        .trunc()
        .clamp(0.0, f64::from(config.max_aqi)) as u32;

    let trend = if factor > 0.0 {
        format!("-{}%", (factor * 100.0).trunc() as u32)
    } else {
        ward.trend.clone()
    };

    WardRecord {
        aqi,
        trend,
        recommendations: recommend::recommend(aqi, dominant),
        ..ward.clone()
    }
}

/// Simulates every ward in the listing.
#[must_use]
pub fn simulate_wards(
    wards: &[WardRecord],
    traffic_reduction_percent: f64,
    config: &SimulationConfig,
) -> Vec<WardRecord> {
    log::debug!(
        "Simulating {}% traffic reduction over {} wards",
        traffic_reduction_percent,
        wards.len()
    );
    wards
        .iter()
        .map(|ward| simulate_ward(ward, traffic_reduction_percent, config))
        .collect()
}
