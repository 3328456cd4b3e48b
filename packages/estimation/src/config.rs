//! Tunable constants for the estimation engine, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard dashboard behavior. A partial file overrides only the keys
//! it names:
//!
//! ```toml
//! [interpolation]
//! default_aqi = 200
//!
//! [intake]
//! deduplicate = true
//! ```

use std::path::Path;

use aqi_map_air_quality_models::Coordinates;
use serde::{Deserialize, Serialize};

use crate::EstimationError;

/// Top-level estimation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// IDW interpolation settings.
    pub interpolation: InterpolationConfig,
    /// Client-side traffic scenario settings.
    pub scenario: ScenarioConfig,
    /// Feature resolution settings.
    pub resolver: ResolverConfig,
    /// Station intake settings.
    pub intake: IntakeConfig,
    /// Server-side ward simulation settings.
    pub simulation: SimulationConfig,
}

impl EstimationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a key has the wrong type.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, EstimationError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but can't be used.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::Conversion`] if the interpolation epsilon
    /// is not a finite positive number.
    pub fn validate(&self) -> Result<(), EstimationError> {
        let epsilon = self.interpolation.epsilon;
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(EstimationError::Conversion {
                message: format!("interpolation.epsilon must be positive, got {epsilon}"),
            });
        }
        Ok(())
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or fails to parse.
    pub fn load(path: &Path) -> Result<Self, EstimationError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded estimation config from {}", path.display());
        Ok(config)
    }
}

/// IDW interpolation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Floor applied to squared distances before weighting.
    pub epsilon: f64,
    /// AQI reported when no station has an AQI reading.
    pub default_aqi: u32,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            epsilon: crate::idw::DEFAULT_EPSILON,
            default_aqi: crate::idw::DEFAULT_AQI,
        }
    }
}

/// Client-side traffic scenario settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Assumed fraction of pollution attributable to traffic.
    pub traffic_share: f64,
    /// Reduction percentages above this are clamped.
    pub max_reduction_percent: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            traffic_share: crate::scenario::TRAFFIC_SHARE,
            max_reduction_percent: 100.0,
        }
    }
}

/// Feature resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Latitude used when a feature has no usable geometry.
    pub fallback_lat: f64,
    /// Longitude used when a feature has no usable geometry.
    pub fallback_lon: f64,
    /// Feature properties checked, in order, for a display name.
    pub name_properties: Vec<String>,
}

impl ResolverConfig {
    /// The fallback interpolation point.
    #[must_use]
    pub const fn fallback_point(&self) -> Coordinates {
        Coordinates::new(self.fallback_lat, self.fallback_lon)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_lat: crate::resolver::CITY_CENTER.lat,
            fallback_lon: crate::resolver::CITY_CENTER.lon,
            name_properties: ["Ward_Name", "WARD_NAME", "name", "Name"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Station intake settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Collapse stations with the same name or within ~1km of each other.
    pub deduplicate: bool,
    /// Drop stations whose AQI is missing or not positive.
    pub drop_invalid_aqi: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            deduplicate: false,
            drop_invalid_aqi: true,
        }
    }
}

/// Server-side ward simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Traffic share for wards dominated by vehicular pollution.
    pub vehicular_traffic_share: f64,
    /// Traffic share for every other ward.
    pub other_traffic_share: f64,
    /// Upper bound on simulated AQI.
    pub max_aqi: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicular_traffic_share: 0.40,
            other_traffic_share: 0.25,
            max_aqi: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EstimationConfig::from_toml_str("").unwrap();
        assert_eq!(config, EstimationConfig::default());
        assert!((config.interpolation.epsilon - 1e-4).abs() < f64::EPSILON);
        assert_eq!(config.interpolation.default_aqi, 180);
        assert!((config.scenario.traffic_share - 0.40).abs() < f64::EPSILON);
        assert_eq!(
            config.resolver.fallback_point(),
            Coordinates::new(28.7041, 77.1025)
        );
        assert!(!config.intake.deduplicate);
        assert!(config.intake.drop_invalid_aqi);
    }

    #[test]
    fn partial_toml_overrides_named_keys_only() {
        let config = EstimationConfig::from_toml_str(
            r#"
            [interpolation]
            default_aqi = 200

            [intake]
            deduplicate = true

            [resolver]
            name_properties = ["WardName"]
            "#,
        )
        .unwrap();
        assert_eq!(config.interpolation.default_aqi, 200);
        assert!((config.interpolation.epsilon - 1e-4).abs() < f64::EPSILON);
        assert!(config.intake.deduplicate);
        assert!(config.intake.drop_invalid_aqi);
        assert_eq!(config.resolver.name_properties, vec!["WardName"]);
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn rejects_unusable_epsilon() {
        for epsilon in ["0.0", "-1e-4", "nan", "inf"] {
            let result =
                EstimationConfig::from_toml_str(&format!("[interpolation]\nepsilon = {epsilon}"));
            assert!(
                matches!(result, Err(EstimationError::Conversion { .. })),
                "epsilon = {epsilon} should be rejected"
            );
        }
        assert!(EstimationConfig::from_toml_str("[interpolation]\nepsilon = 1e-6").is_ok());
    }

    #[test]
    fn rejects_wrong_types() {
        let result = EstimationConfig::from_toml_str("[interpolation]\nepsilon = \"tiny\"");
        assert!(matches!(result, Err(EstimationError::Config(_))));
    }
}
