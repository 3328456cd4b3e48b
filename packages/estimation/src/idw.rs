//! Inverse-distance-weighted interpolation over station readings.
//!
//! Each station reporting a channel contributes with weight
//! `1 / max(d², epsilon)`, where `d²` is the squared Euclidean distance in
//! (lat, lon) degree space. The epsilon floor does more than keep the
//! division finite: every station within `sqrt(epsilon)` degrees of the
//! query point (about 1km at the default) weighs the same, so a station
//! sitting on the point is capped rather than drowning out its neighbors.
//! That capping is intended behavior.

use aqi_map_air_quality_models::{Channel, Coordinates, PollutantReadings, Station};

use crate::config::InterpolationConfig;

/// Default floor for squared degree distances.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// AQI reported when no station has an AQI reading.
pub const DEFAULT_AQI: u32 = 180;

/// Interpolates station readings at arbitrary points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    epsilon: f64,
    default_aqi: u32,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            default_aqi: DEFAULT_AQI,
        }
    }
}

impl Interpolator {
    /// Creates an interpolator from configuration.
    ///
    /// An epsilon that is not finite and positive would let a coincident
    /// station produce `inf / inf`, so [`DEFAULT_EPSILON`] is used instead.
    #[must_use]
    pub fn new(config: &InterpolationConfig) -> Self {
        let epsilon = if config.epsilon.is_finite() && config.epsilon > 0.0 {
            config.epsilon
        } else {
            log::warn!(
                "Ignoring unusable interpolation epsilon {}; using {DEFAULT_EPSILON}",
                config.epsilon
            );
            DEFAULT_EPSILON
        };
        Self {
            epsilon,
            default_aqi: config.default_aqi,
        }
    }

    /// Weighted average of `channel` at `point`, rounded to the nearest
    /// integer.
    ///
    /// Stations without a finite reading for the channel are skipped.
    /// Returns `None` when no station contributes.
    #[must_use]
    pub fn interpolate(
        &self,
        point: &Coordinates,
        stations: &[Station],
        channel: Channel,
    ) -> Option<f64> {
        let mut weight_sum = 0.0;
        let mut weighted_value_sum = 0.0;

        for station in stations {
            let Some(value) = station.reading(channel).filter(|v| v.is_finite()) else {
                continue;
            };
            let distance_squared = station.coordinates().distance_squared(point);
            if !distance_squared.is_finite() {
                continue;
            }
            let weight = 1.0 / distance_squared.max(self.epsilon);
            weight_sum += weight;
            weighted_value_sum += weight * value;
        }

        if weight_sum > 0.0 {
            Some((weighted_value_sum / weight_sum).round())
        } else {
            None
        }
    }

    /// Interpolated AQI, or the configured default when no station reports
    /// one.
    #[must_use]
    pub fn aqi(&self, point: &Coordinates, stations: &[Station]) -> u32 {
        self.interpolate(point, stations, Channel::Aqi)
            .map_or(self.default_aqi, to_aqi)
    }

    /// Interpolates each pollutant channel independently. A channel no
    /// station reports stays `None`.
    #[must_use]
    pub fn pollutants(&self, point: &Coordinates, stations: &[Station]) -> PollutantReadings {
        let mut readings = PollutantReadings::default();
        for channel in Channel::POLLUTANTS {
            readings.set(*channel, self.interpolate(point, stations, *channel));
        }
        readings
    }
}

/// Interpolates with the default epsilon. See [`Interpolator::interpolate`].
#[must_use]
pub fn interpolate(point: &Coordinates, stations: &[Station], channel: Channel) -> Option<f64> {
    Interpolator::default().interpolate(point, stations, channel)
}

/// Converts an already rounded value to an AQI, clamping negatives to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_aqi(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
