//! Aggregate statistics over resolved wards.

use aqi_map_estimation_models::{ResolutionSummary, ResolvedWard};

/// AQI above which a ward counts as critical.
pub const CRITICAL_AQI: u32 = 300;

/// AQI at or below which a ward counts as good.
pub const GOOD_AQI: u32 = 100;

/// Summarizes a resolved ward set. Every statistic is 0 for an empty set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(wards: &[ResolvedWard], stations_count: usize) -> ResolutionSummary {
    let aqis: Vec<u32> = wards.iter().map(ResolvedWard::aqi).collect();

    let average_aqi = if aqis.is_empty() {
        0.0
    } else {
        let total: u64 = aqis.iter().copied().map(u64::from).sum();
        ((total as f64 / aqis.len() as f64) * 10.0).round() / 10.0
    };

    ResolutionSummary {
        total_wards: wards.len(),
        estimated_wards: wards.iter().filter(|ward| ward.is_estimated()).count(),
        average_aqi,
        max_aqi: aqis.iter().copied().max().unwrap_or(0),
        min_aqi: aqis.iter().copied().min().unwrap_or(0),
        critical_wards: aqis.iter().filter(|&&aqi| aqi > CRITICAL_AQI).count(),
        good_wards: aqis.iter().filter(|&&aqi| aqi <= GOOD_AQI).count(),
        stations_count,
    }
}
