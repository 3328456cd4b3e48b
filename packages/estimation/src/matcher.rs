//! Binds map features to authoritative ward records.
//!
//! Matching is by exact ward number only. There is no fallback to names or
//! positions: attaching a feature to the wrong ward's data is worse than
//! showing an estimate.

use aqi_map_air_quality_models::WardRecord;

use crate::feature::WardFeature;

/// Returns the first ward whose number equals the feature's `Ward_No`.
#[must_use]
pub fn match_ward<'a>(feature: &WardFeature, wards: &'a [WardRecord]) -> Option<&'a WardRecord> {
    let ward_no = feature.ward_no()?;
    wards.iter().find(|ward| ward.ward_no == ward_no)
}
