//! Style and tooltip directives for the map layer.

use aqi_map_estimation_models::{
    FeatureStyle, ResolvedFeature, ResolvedWard, SelectionState, Tooltip,
};

/// Border color for selected features.
pub const SELECTED_BORDER_COLOR: &str = "#1e293b";

/// Border color for idle and hovered features.
pub const DEFAULT_BORDER_COLOR: &str = "#ffffff";

/// Path style for a resolved ward in the given interaction state.
#[must_use]
pub fn style_for(ward: &ResolvedWard, selection: SelectionState) -> FeatureStyle {
    let (fill_opacity, color, weight, opacity) = match selection {
        SelectionState::Idle => (0.6, DEFAULT_BORDER_COLOR, 1.0, 0.8),
        SelectionState::Hovered => (0.75, DEFAULT_BORDER_COLOR, 2.0, 1.0),
        SelectionState::Selected => (0.85, SELECTED_BORDER_COLOR, 3.0, 1.0),
    };

    FeatureStyle {
        fill_color: ward.category().color().to_string(),
        fill_opacity,
        color: color.to_string(),
        weight,
        opacity,
    }
}

/// Tooltip content for a resolved ward.
#[must_use]
pub fn tooltip_for(ward: &ResolvedWard) -> Tooltip {
    Tooltip {
        name: ward.name().to_string(),
        aqi: ward.aqi(),
        category: ward.category().label().to_string(),
        estimated: ward.is_estimated(),
        dominant_source: ward.dominant_source().map(|source| source.to_string()),
    }
}

/// Bundles a resolved ward with its directives.
#[must_use]
pub fn describe(
    feature_id: impl Into<String>,
    ward: ResolvedWard,
    selection: SelectionState,
) -> ResolvedFeature {
    ResolvedFeature {
        feature_id: feature_id.into(),
        style: style_for(&ward, selection),
        tooltip: tooltip_for(&ward),
        ward,
    }
}
