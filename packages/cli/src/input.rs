//! JSON input files for the harness.

use std::path::Path;

use aqi_map_air_quality_models::{Station, WardRecord};
use serde::Deserialize;

/// A ward listing served as a bare array or as `{"wards": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WardListing {
    Bare(Vec<WardRecord>),
    Wrapped { wards: Vec<WardRecord> },
}

/// A station listing served as a bare array or as `{"stations": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StationListing {
    Bare(Vec<Station>),
    Wrapped { stations: Vec<Station> },
}

/// Parses a ward listing.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or is not a ward listing.
pub fn parse_wards(json: &str) -> Result<Vec<WardRecord>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        WardListing::Bare(wards) | WardListing::Wrapped { wards } => wards,
    })
}

/// Parses a station listing.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or is not a station listing.
pub fn parse_stations(json: &str) -> Result<Vec<Station>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        StationListing::Bare(stations) | StationListing::Wrapped { stations } => stations,
    })
}

/// Reads and parses a ward listing file.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed.
pub fn load_wards(path: &Path) -> Result<Vec<WardRecord>, Box<dyn std::error::Error>> {
    let wards = parse_wards(&std::fs::read_to_string(path)?)?;
    log::info!("Loaded {} wards from {}", wards.len(), path.display());
    Ok(wards)
}

/// Reads and parses a station listing file.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed.
pub fn load_stations(path: &Path) -> Result<Vec<Station>, Box<dyn std::error::Error>> {
    let stations = parse_stations(&std::fs::read_to_string(path)?)?;
    log::info!("Loaded {} stations from {}", stations.len(), path.display());
    Ok(stations)
}
