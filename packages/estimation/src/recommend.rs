//! Rule-based recommendation text.

use aqi_map_air_quality_models::SourceKind;

/// Maximum number of recommendation lines for one ward.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Recommendations shown for interpolated wards, which have no reliable
/// source attribution.
pub const GENERIC_RECOMMENDATIONS: &[&str] = &[
    "Limit prolonged outdoor activity during peak pollution hours",
    "Keep windows closed while AQI is elevated",
    "Sensitive groups should wear N95 masks outdoors",
    "Values are estimated from nearby monitoring stations",
];

/// Severity-tier advice for an AQI, followed by advice targeting the
/// dominant source. Capped at [`MAX_RECOMMENDATIONS`] lines.
#[must_use]
pub fn recommend(aqi: u32, dominant_source: SourceKind) -> Vec<String> {
    let tier: &[&str] = match aqi {
        401.. => &[
            "EMERGENCY: Declare a public health emergency",
            "Close all schools and non-essential businesses",
            "Implement odd-even vehicle restrictions immediately",
            "Deploy industrial-grade air purifiers in public spaces",
        ],
        301..=400 => &[
            "Close primary schools",
            "Cancel outdoor events and sports",
            "Mandate N95 masks outdoors",
            "Issue a work-from-home advisory",
        ],
        201..=300 => &[
            "Issue a health advisory for sensitive groups",
            "Discourage outdoor exercise",
            "Increase hospital preparedness",
        ],
        151..=200 => &[
            "Keep children and elderly indoors during peak hours",
            "Keep windows closed",
        ],
        _ => &[],
    };

    let targeted: &[&str] = match dominant_source {
        SourceKind::Traffic => &[
            "Increase traffic police deployment",
            "Promote public transport",
        ],
        SourceKind::Industrial => &[
            "Conduct industrial emission audits",
            "Enforce stricter emission norms",
        ],
        SourceKind::ConstructionDust => &[
            "Deploy smog guns and water sprinklers",
            "Mandate dust barriers at construction sites",
        ],
        SourceKind::BiomassBurning => &[
            "Intensify stubble burning monitoring",
            "Deploy ground patrol teams",
        ],
        SourceKind::Other => &[],
    };

    tier.iter()
        .chain(targeted)
        .take(MAX_RECOMMENDATIONS)
        .map(ToString::to_string)
        .collect()
}

/// [`GENERIC_RECOMMENDATIONS`] as owned strings.
#[must_use]
pub fn generic() -> Vec<String> {
    GENERIC_RECOMMENDATIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}
