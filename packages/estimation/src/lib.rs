#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spatial estimation engine for the ward air quality map.
//!
//! Binds map features to authoritative ward records by ward number, and
//! synthesizes estimates for the rest by inverse-distance-weighted
//! interpolation over station readings. A traffic-reduction scenario can
//! be applied on top of either path. Every operation here is a pure
//! function of explicitly passed snapshots; only configuration loading
//! and input parsing can fail.

pub mod centroid;
pub mod config;
pub mod display;
pub mod feature;
pub mod idw;
pub mod matcher;
pub mod recommend;
pub mod resolver;
pub mod scenario;
pub mod simulate;
pub mod stations;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use config::EstimationConfig;
pub use feature::WardFeature;
pub use resolver::FeatureResolver;
pub use stations::StationSnapshot;

use thiserror::Error;

/// Errors that can occur while loading estimation inputs.
#[derive(Debug, Error)]
pub enum EstimationError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration TOML failed to parse.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// `GeoJSON` failed to parse.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Input had an unexpected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
