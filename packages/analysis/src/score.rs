//! Weighted sustainability score.

use urban_map_analysis_models::{IndicatorReading, IndicatorStatus, SustainabilityClass};
use urban_map_zone_models::{Indicator, ZoneProfile};

/// Weight of each indicator in the score, in percent. The weights sum to 100.
pub const WEIGHTS: [(Indicator, u32); 9] = [
    (Indicator::GreenAreas, 15),
    (Indicator::VegetationCover, 10),
    (Indicator::AirQuality, 15),
    (Indicator::TransitAccessibility, 12),
    (Indicator::SanitationInfrastructure, 13),
    (Indicator::SoilPermeability, 10),
    (Indicator::UrbanNoise, 10),
    (Indicator::ConstructionDensity, 8),
    (Indicator::PopulationDensity, 7),
];

/// Returns the weight of `indicator` as a fraction of 1.0.
#[must_use]
pub fn weight(indicator: Indicator) -> f64 {
    WEIGHTS
        .iter()
        .find(|(i, _)| *i == indicator)
        .map_or(0.0, |(_, pct)| f64::from(*pct) / 100.0)
}

/// Computes the 0-100 sustainability score of a profile.
///
/// "Lower is better" indicators are inverted as `100 - value` before
/// weighting. The weighted sum is accumulated in hundredths so that exact
/// halves round up. Inputs and weights are bounded, so the result never
/// leaves `[0, 100]`.
#[must_use]
pub fn sustainability_score(profile: &ZoneProfile) -> u8 {
    let hundredths: u32 = WEIGHTS
        .iter()
        .map(|(indicator, pct)| u32::from(indicator.effective_value(profile.get(*indicator))) * pct)
        .sum();

    let score = ((hundredths + 50) / 100).min(100);
    u8::try_from(score).unwrap_or(100)
}

/// Qualitative label for a score.
#[must_use]
pub const fn classify_score(score: u8) -> SustainabilityClass {
    SustainabilityClass::from_score(score)
}

/// Status of a single indicator value.
#[must_use]
pub const fn indicator_status(indicator: Indicator, value: u8) -> IndicatorStatus {
    IndicatorStatus::from_effective_value(indicator.effective_value(value))
}

/// Per-indicator breakdown of a profile, in declaration order.
#[must_use]
pub fn breakdown(profile: &ZoneProfile) -> Vec<IndicatorReading> {
    profile
        .iter()
        .map(|(indicator, value)| IndicatorReading {
            indicator,
            name: indicator.display_name().to_string(),
            value,
            status: indicator_status(indicator, value),
        })
        .collect()
}
