#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Air quality station, pollutant channel, and ward record types.
//!
//! These are the read-only inputs handed to the estimation engine by the
//! backend aggregation service: monitoring stations with per-channel
//! readings, and authoritative ward records. Missing readings are always
//! modeled as `None`, never as zero.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Coordinates {
    /// Creates a new point.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Squared Euclidean distance in degree space.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        d_lat.mul_add(d_lat, d_lon * d_lon)
    }
}

/// A scalar field reported by monitoring stations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Channel {
    /// Composite Air Quality Index
    #[serde(rename = "aqi")]
    #[strum(serialize = "aqi")]
    Aqi,
    /// Fine particulate matter (PM2.5)
    #[serde(rename = "pm25")]
    #[strum(serialize = "pm25")]
    Pm25,
    /// Coarse particulate matter (PM10)
    #[serde(rename = "pm10")]
    #[strum(serialize = "pm10")]
    Pm10,
    /// Nitrogen dioxide
    #[serde(rename = "no2")]
    #[strum(serialize = "no2")]
    No2,
    /// Sulfur dioxide
    #[serde(rename = "so2")]
    #[strum(serialize = "so2")]
    So2,
    /// Carbon monoxide
    #[serde(rename = "co")]
    #[strum(serialize = "co")]
    Co,
    /// Ozone
    #[serde(rename = "o3")]
    #[strum(serialize = "o3")]
    O3,
}

impl Channel {
    /// The six individual pollutant channels, excluding the AQI composite.
    pub const POLLUTANTS: &[Self] = &[
        Self::Pm25,
        Self::Pm10,
        Self::No2,
        Self::So2,
        Self::Co,
        Self::O3,
    ];

    /// Human-readable label (e.g. "PM2.5").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aqi => "AQI",
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
            Self::O3 => "O3",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Aqi,
            Self::Pm25,
            Self::Pm10,
            Self::No2,
            Self::So2,
            Self::Co,
            Self::O3,
        ]
    }
}

/// Per-channel pollutant readings. Each value is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReadings {
    /// PM2.5 concentration.
    #[serde(default)]
    pub pm25: Option<f64>,
    /// PM10 concentration.
    #[serde(default)]
    pub pm10: Option<f64>,
    /// NO2 concentration.
    #[serde(default)]
    pub no2: Option<f64>,
    /// SO2 concentration.
    #[serde(default)]
    pub so2: Option<f64>,
    /// CO concentration.
    #[serde(default)]
    pub co: Option<f64>,
    /// O3 concentration.
    #[serde(default)]
    pub o3: Option<f64>,
}

impl PollutantReadings {
    /// Returns the reading for a pollutant channel.
    ///
    /// Always `None` for [`Channel::Aqi`], which is not a pollutant.
    #[must_use]
    pub const fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Aqi => None,
            Channel::Pm25 => self.pm25,
            Channel::Pm10 => self.pm10,
            Channel::No2 => self.no2,
            Channel::So2 => self.so2,
            Channel::Co => self.co,
            Channel::O3 => self.o3,
        }
    }

    /// Sets the reading for a pollutant channel. Ignores [`Channel::Aqi`].
    pub const fn set(&mut self, channel: Channel, value: Option<f64>) {
        match channel {
            Channel::Aqi => {}
            Channel::Pm25 => self.pm25 = value,
            Channel::Pm10 => self.pm10 = value,
            Channel::No2 => self.no2 = value,
            Channel::So2 => self.so2 = value,
            Channel::Co => self.co = value,
            Channel::O3 => self.o3 = value,
        }
    }
}

/// Reliability assumed for stations that don't report one.
pub const DEFAULT_RELIABILITY: f64 = 0.8;

/// A monitoring station sample as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier. Empty when the backend doesn't assign one.
    #[serde(default)]
    pub id: String,
    /// Station name.
    #[serde(alias = "station_name")]
    pub name: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Composite AQI reading.
    #[serde(default)]
    pub aqi: Option<f64>,
    /// Individual pollutant readings.
    #[serde(flatten)]
    pub pollutants: PollutantReadings,
    /// Upstream API the reading came from (e.g. "aqicn").
    #[serde(default)]
    pub source: Option<String>,
    /// Relative trust in this station's readings, 0-1.
    #[serde(default)]
    pub reliability_score: Option<f64>,
    /// When the reading was taken.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Station {
    /// Returns the station position.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// Returns the reading for any channel, including AQI.
    #[must_use]
    pub const fn reading(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Aqi => self.aqi,
            _ => self.pollutants.get(channel),
        }
    }

    /// Returns the reliability score, falling back to
    /// [`DEFAULT_RELIABILITY`].
    #[must_use]
    pub fn reliability(&self) -> f64 {
        self.reliability_score.unwrap_or(DEFAULT_RELIABILITY)
    }
}

/// A named pollution source category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SourceKind {
    /// Vehicle exhaust and road traffic
    #[serde(rename = "Vehicular", alias = "traffic")]
    #[strum(to_string = "Vehicular", serialize = "traffic")]
    Traffic,
    /// Factories and power generation
    #[serde(rename = "Industrial", alias = "industrial")]
    #[strum(to_string = "Industrial", serialize = "industrial")]
    Industrial,
    /// Construction sites and road dust
    #[serde(rename = "Construction Dust", alias = "construction_dust")]
    #[strum(to_string = "Construction Dust", serialize = "construction_dust")]
    ConstructionDust,
    /// Stubble, waste, and other open burning
    #[serde(rename = "Biomass Burning", alias = "biomass_burning")]
    #[strum(to_string = "Biomass Burning", serialize = "biomass_burning")]
    BiomassBurning,
    /// Everything else
    #[serde(rename = "Other", alias = "other")]
    #[strum(to_string = "Other", serialize = "other")]
    Other,
}

impl SourceKind {
    /// Returns all variants of this enum, in breakdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Traffic,
            Self::Industrial,
            Self::ConstructionDust,
            Self::BiomassBurning,
            Self::Other,
        ]
    }
}

/// Percentage share of each pollution source. Shares sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutionBreakdown {
    /// Vehicular traffic share.
    pub traffic: f64,
    /// Industrial share.
    pub industrial: f64,
    /// Construction dust share.
    pub construction_dust: f64,
    /// Biomass burning share.
    pub biomass_burning: f64,
    /// Unattributed share.
    pub other: f64,
}

impl PollutionBreakdown {
    /// Generic breakdown used when no ward-specific attribution exists.
    pub const GENERIC: Self = Self {
        traffic: 30.0,
        industrial: 20.0,
        construction_dust: 20.0,
        biomass_burning: 15.0,
        other: 15.0,
    };

    /// Returns the share attributed to a source.
    #[must_use]
    pub const fn share(&self, kind: SourceKind) -> f64 {
        match kind {
            SourceKind::Traffic => self.traffic,
            SourceKind::Industrial => self.industrial,
            SourceKind::ConstructionDust => self.construction_dust,
            SourceKind::BiomassBurning => self.biomass_burning,
            SourceKind::Other => self.other,
        }
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total(&self) -> f64 {
        SourceKind::all().iter().map(|kind| self.share(*kind)).sum()
    }

    /// The source with the largest share. Ties go to the earlier source in
    /// [`SourceKind::all`] order.
    #[must_use]
    pub fn dominant(&self) -> SourceKind {
        let mut best = SourceKind::Traffic;
        for kind in SourceKind::all() {
            if self.share(*kind) > self.share(best) {
                best = *kind;
            }
        }
        best
    }
}

impl Default for PollutionBreakdown {
    fn default() -> Self {
        Self::GENERIC
    }
}

/// An authoritative ward record supplied by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardRecord {
    /// Backend ward ID.
    pub id: i64,
    /// Ward number. JSON numbers are stringified on deserialization.
    #[serde(deserialize_with = "deserialize_ward_no")]
    pub ward_no: String,
    /// Ward name.
    pub name: String,
    /// Representative point, when the backend provides one.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Current AQI.
    pub aqi: u32,
    /// Per-channel pollutant readings.
    #[serde(default)]
    pub pollutants: PollutantReadings,
    /// Pollution source attribution.
    #[serde(default)]
    pub pollution_breakdown: PollutionBreakdown,
    /// Dominant source as labeled by the backend. Derived from the
    /// breakdown when absent.
    #[serde(default)]
    pub dominant_source: Option<SourceKind>,
    /// Resident population.
    #[serde(default)]
    pub population: u64,
    /// Area in square kilometres.
    #[serde(default, alias = "area_sqkm")]
    pub area_sq_km: f64,
    /// Trend indicator (e.g. "+5%", "Stable").
    #[serde(default)]
    pub trend: String,
    /// Recommendation text.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// When the backend last refreshed this ward.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl WardRecord {
    /// Returns the labeled dominant source, or the largest share of the
    /// breakdown.
    #[must_use]
    pub fn dominant_source(&self) -> SourceKind {
        self.dominant_source
            .unwrap_or_else(|| self.pollution_breakdown.dominant())
    }
}

/// Stringifies a numeric ward number the way a JSON consumer would:
/// integral values lose their fractional part (`7.0` becomes `"7"`).
#[must_use]
pub fn ward_number_from_f64(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        #[allow(clippy::cast_possible_truncation)]
        let integral = value as i64;
        integral.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WardNumberRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn deserialize_ward_no<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WardNumberRepr::deserialize(deserializer)? {
        WardNumberRepr::Text(text) => text,
        WardNumberRepr::Integer(value) => value.to_string(),
        WardNumberRepr::Float(value) => ward_number_from_f64(value),
    })
}

/// Parses an RFC 3339 timestamp, or a zone-less ISO 8601 one taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// AQI category, following the national breakpoints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Satisfactory,
    /// 101-150
    Moderate,
    /// 151-200
    Poor,
    /// 201-300
    VeryPoor,
    /// Above 300
    Severe,
}

impl AqiCategory {
    /// Classifies an AQI value.
    #[must_use]
    pub const fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Satisfactory,
            101..=150 => Self::Moderate,
            151..=200 => Self::Poor,
            201..=300 => Self::VeryPoor,
            _ => Self::Severe,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Severe => "Severe",
        }
    }

    /// Map fill color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#00e400",
            Self::Satisfactory => "#ffff00",
            Self::Moderate => "#ff7e00",
            Self::Poor => "#ff0000",
            Self::VeryPoor => "#8f3f97",
            Self::Severe => "#7e0023",
        }
    }
}
