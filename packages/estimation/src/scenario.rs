//! Traffic-reduction "what-if" adjustment.
//!
//! A linear approximation, not a causal model: traffic is assumed to make
//! up a fixed share of every ward's pollution regardless of its actual
//! source breakdown, and a reduction removes that fraction of the share.

use crate::config::ScenarioConfig;

/// Assumed fraction of pollution attributable to traffic.
pub const TRAFFIC_SHARE: f64 = 0.40;

/// Applies a traffic-reduction percentage to raw values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioAdjuster {
    traffic_share: f64,
    max_reduction_percent: f64,
}

impl Default for ScenarioAdjuster {
    fn default() -> Self {
        Self::new(&ScenarioConfig::default())
    }
}

impl ScenarioAdjuster {
    /// Creates an adjuster from configuration.
    #[must_use]
    pub const fn new(config: &ScenarioConfig) -> Self {
        Self {
            traffic_share: config.traffic_share,
            max_reduction_percent: config.max_reduction_percent,
        }
    }

    /// Fraction removed from a value for the given reduction percentage.
    ///
    /// 0 when the percentage is not positive.
    #[must_use]
    pub fn reduction_factor(&self, traffic_reduction_percent: f64) -> f64 {
        if traffic_reduction_percent.is_nan() || traffic_reduction_percent <= 0.0 {
            return 0.0;
        }
        let percent = traffic_reduction_percent.min(self.max_reduction_percent);
        self.traffic_share * (percent / 100.0)
    }

    /// Returns `raw` reduced by the scenario, rounded to the nearest
    /// integer. A non-positive percentage leaves `raw` untouched.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn adjust(&self, raw: u32, traffic_reduction_percent: f64) -> u32 {
        let factor = self.reduction_factor(traffic_reduction_percent);
        if factor <= 0.0 {
            return raw;
        }
        (f64::from(raw) * (1.0 - factor)).round().max(0.0) as u32
    }
}

/// Adjusts with the default 40% traffic share. See
/// [`ScenarioAdjuster::adjust`].
#[must_use]
pub fn adjust(raw: u32, traffic_reduction_percent: f64) -> u32 {
    ScenarioAdjuster::default().adjust(raw, traffic_reduction_percent)
}
