//! What-if projection for city-wide improvements.

use urban_map_analysis_models::{SimulationOutcome, SimulationParams};

/// Air quality index before any simulated change.
pub const BASELINE_AIR_QUALITY: f64 = 50.0;

/// Sustainability index before any simulated change.
pub const BASELINE_SUSTAINABILITY: f64 = 60.0;

/// City-wide sustainability score before any simulated change.
pub const BASELINE_CITY_SCORE: f64 = 72.0;

/// Projects air quality, sustainability, and the city score for `params`.
///
/// Inputs are not clamped; the projected indices are capped at 100.
#[must_use]
pub fn simulate(params: &SimulationParams) -> SimulationOutcome {
    let g = params.green_areas;
    let t = params.public_transport;
    let p = params.pollution_reduction;

    let air_quality = 0.3f64.mul_add(p, 0.2f64.mul_add(g, BASELINE_AIR_QUALITY)).min(100.0);
    let sustainability = 0.1f64
        .mul_add(p, 0.2f64.mul_add(t, 0.15f64.mul_add(g, BASELINE_SUSTAINABILITY)))
        .min(100.0);
    let city = 0.2f64
        .mul_add(p, 0.15f64.mul_add(t, 0.1f64.mul_add(g, BASELINE_CITY_SCORE)))
        .min(100.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let outcome = SimulationOutcome {
        air_quality,
        sustainability,
        air_quality_gain: (air_quality - BASELINE_AIR_QUALITY).round() as i32,
        sustainability_gain: (sustainability - BASELINE_SUSTAINABILITY).round() as i32,
        city_score: city.round().clamp(0.0, 100.0) as u8,
    };

    log::debug!("Simulation {params:?} -> {outcome:?}");

    outcome
}
