//! Station intake and the immutable per-refresh station snapshot.
//!
//! Stations arrive wholesale from the backend on every refresh. Intake
//! derives missing AQI values from PM2.5, drops stations without a usable
//! AQI, and optionally collapses duplicates reported by more than one
//! upstream API. The resulting [`StationSnapshot`] is never mutated; the
//! next refresh builds a new one.

use aqi_map_air_quality_models::{Channel, Coordinates, Station};
use geo::{BoundingRect, Contains};
use rstar::{AABB, RTree, primitives::GeomWithData};

use crate::config::IntakeConfig;
use crate::feature::WardFeature;

/// Degree offset within which two stations count as the same site (~1km).
pub const DUPLICATE_PROXIMITY_DEG: f64 = 0.01;

/// Station position (`[lon, lat]`) tagged with its index in the snapshot.
type IndexedStation = GeomWithData<[f64; 2], usize>;

/// An immutable set of stations with a spatial index over their positions.
pub struct StationSnapshot {
    stations: Vec<Station>,
    index: RTree<IndexedStation>,
}

impl StationSnapshot {
    /// Builds a snapshot from stations exactly as given.
    #[must_use]
    pub fn new(stations: Vec<Station>) -> Self {
        let entries = stations
            .iter()
            .enumerate()
            .filter(|(_, station)| station.lat.is_finite() && station.lon.is_finite())
            .map(|(i, station)| GeomWithData::new([station.lon, station.lat], i))
            .collect();

        Self {
            stations,
            index: RTree::bulk_load(entries),
        }
    }

    /// Runs intake over a raw backend listing and builds a snapshot.
    #[must_use]
    pub fn from_stations(raw: Vec<Station>, config: &IntakeConfig) -> Self {
        Self::new(prepare(raw, config))
    }

    /// All stations in the snapshot.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the snapshot has no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The station closest to `point` and its distance in degrees.
    #[must_use]
    pub fn nearest(&self, point: &Coordinates) -> Option<(&Station, f64)> {
        let entry = self.index.nearest_neighbor(&[point.lon, point.lat])?;
        let station = &self.stations[entry.data];
        Some((station, station.coordinates().distance_squared(point).sqrt()))
    }

    /// Number of stations located inside a feature's boundary.
    #[must_use]
    pub fn count_within(&self, feature: &WardFeature) -> usize {
        let Some(polygon) = feature.polygon() else {
            return 0;
        };
        let Some(rect) = polygon.bounding_rect() else {
            return 0;
        };
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        self.index
            .locate_in_envelope(&envelope)
            .filter(|entry| {
                let [lon, lat] = *entry.geom();
                polygon.contains(&geo::Point::new(lon, lat))
            })
            .count()
    }
}

/// Applies intake rules to a raw station listing.
#[must_use]
pub fn prepare(raw: Vec<Station>, config: &IntakeConfig) -> Vec<Station> {
    let received = raw.len();
    let mut stations: Vec<Station> = raw.into_iter().map(fill_aqi_from_pm25).collect();

    if config.drop_invalid_aqi {
        stations.retain(|station| {
            station
                .reading(Channel::Aqi)
                .is_some_and(|aqi| aqi.is_finite() && aqi > 0.0)
        });
    }

    if config.deduplicate {
        stations = deduplicate(stations);
    }

    log::info!(
        "Station intake kept {} of {received} stations",
        stations.len()
    );
    stations
}

/// Derives AQI from PM2.5 for a station that reports PM2.5 but no AQI.
fn fill_aqi_from_pm25(mut station: Station) -> Station {
    if station.aqi.is_none() {
        if let Some(pm25) = station.pollutants.pm25.filter(|v| v.is_finite()) {
            station.aqi = Some(f64::from(pm25_to_aqi(pm25)));
        }
    }
    station
}

/// Converts a PM2.5 concentration (µg/m³) to an approximate AQI.
///
/// Linear within each breakpoint band, truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pm25_to_aqi(pm25: f64) -> u32 {
    let aqi = if pm25 <= 12.0 {
        pm25 * 50.0 / 12.0
    } else if pm25 <= 35.4 {
        50.0 + (pm25 - 12.0) * 50.0 / 23.4
    } else if pm25 <= 55.4 {
        100.0 + (pm25 - 35.4) * 50.0 / 20.0
    } else if pm25 <= 150.4 {
        150.0 + (pm25 - 55.4) * 50.0 / 95.0
    } else if pm25 <= 250.4 {
        200.0 + (pm25 - 150.4) * 100.0 / 100.0
    } else if pm25 <= 350.4 {
        300.0 + (pm25 - 250.4) * 100.0 / 100.0
    } else {
        400.0 + (pm25 - 350.4) * 100.0 / 150.0
    };
    aqi.max(0.0) as u32
}

/// Collapses stations that share a name (case-insensitive) or sit within
/// [`DUPLICATE_PROXIMITY_DEG`] of each other on both axes.
///
/// The first station seen for a site keeps its slot; a later duplicate
/// replaces it when more reliable, or equally reliable with a higher AQI.
#[must_use]
pub fn deduplicate(stations: Vec<Station>) -> Vec<Station> {
    let received = stations.len();
    let mut unique: Vec<Station> = Vec::with_capacity(stations.len());

    for station in stations {
        let name = station.name.trim().to_lowercase();
        let existing = unique.iter_mut().find(|kept| {
            kept.name.trim().to_lowercase() == name
                || ((kept.lat - station.lat).abs() < DUPLICATE_PROXIMITY_DEG
                    && (kept.lon - station.lon).abs() < DUPLICATE_PROXIMITY_DEG)
        });

        match existing {
            Some(kept) => {
                if supersedes(&station, kept) {
                    *kept = station;
                }
            }
            None => unique.push(station),
        }
    }

    log::info!(
        "Deduplicated {received} stations down to {}",
        unique.len()
    );
    unique
}

fn supersedes(candidate: &Station, kept: &Station) -> bool {
    let (candidate_reliability, kept_reliability) = (candidate.reliability(), kept.reliability());
    if candidate_reliability > kept_reliability {
        return true;
    }
    #[allow(clippy::float_cmp)]
    let same_reliability = candidate_reliability == kept_reliability;
    same_reliability && candidate.aqi.unwrap_or(0.0) > kept.aqi.unwrap_or(0.0)
}
