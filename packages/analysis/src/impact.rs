//! Environmental impact projections and trend labels.

use urban_map_analysis_models::{
    BiodiversityLevel, EnvironmentalImpact, GreenTrend, MobilityTrend, QualityOfLife, Trends,
};
use urban_map_zone_models::ZoneProfile;

/// Projects CO₂, water, waste, and biodiversity for an area of `area_km2`.
///
/// Non-finite areas are not guarded and propagate into the result.
#[must_use]
pub fn environmental_impact(profile: &ZoneProfile, area_km2: f64) -> EnvironmentalImpact {
    let construction = f64::from(profile.construction_density);
    let population = f64::from(profile.population_density);

    EnvironmentalImpact {
        carbon_tons: (construction * area_km2 * 0.8 / 10.0).round(),
        water_liters_per_day: (population * area_km2 * 150.0 / 1000.0).round(),
        waste_tons_per_day: (population * area_km2 * 1.2).round(),
        biodiversity: biodiversity(profile.green_areas),
    }
}

/// Biodiversity level from green-area percentage.
#[must_use]
pub const fn biodiversity(green_areas: u8) -> BiodiversityLevel {
    if green_areas > 50 {
        BiodiversityLevel::High
    } else if green_areas > 30 {
        BiodiversityLevel::Medium
    } else {
        BiodiversityLevel::Low
    }
}

/// Trend labels for a profile.
#[must_use]
pub const fn trends(profile: &ZoneProfile) -> Trends {
    Trends {
        green: if profile.green_areas > 60 {
            GreenTrend::Positive
        } else {
            GreenTrend::Stable
        },
        mobility: if profile.transit_accessibility > 75 {
            MobilityTrend::Efficient
        } else {
            MobilityTrend::NeedsImprovement
        },
        quality_of_life: if profile.air_quality > 70 && profile.urban_noise < 60 {
            QualityOfLife::High
        } else {
            QualityOfLife::Medium
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: ZoneProfile = ZoneProfile {
        construction_density: 100,
        green_areas: 40,
        transit_accessibility: 80,
        air_quality: 75,
        urban_noise: 50,
        sanitation_infrastructure: 70,
        vegetation_cover: 40,
        soil_permeability: 40,
        population_density: 50,
    };

    #[test]
    fn carbon_for_full_construction_on_one_km2() {
        let impact = environmental_impact(&BASE, 1.0);
        assert!((impact.carbon_tons - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn water_and_waste() {
        let impact = environmental_impact(&BASE, 2.0);
        // 50 * 2 * 150 / 1000 = 15; 50 * 2 * 1.2 = 120
        assert!((impact.water_liters_per_day - 15.0).abs() < f64::EPSILON);
        assert!((impact.waste_tons_per_day - 120.0).abs() < f64::EPSILON);
        assert_eq!(impact.biodiversity, BiodiversityLevel::Medium);
    }

    #[test]
    fn non_finite_area_propagates() {
        let impact = environmental_impact(&BASE, f64::NAN);
        assert!(impact.carbon_tons.is_nan());
        assert!(impact.waste_tons_per_day.is_nan());
    }

    #[test]
    fn biodiversity_thresholds_are_strict() {
        assert_eq!(biodiversity(51), BiodiversityLevel::High);
        assert_eq!(biodiversity(50), BiodiversityLevel::Medium);
        assert_eq!(biodiversity(31), BiodiversityLevel::Medium);
        assert_eq!(biodiversity(30), BiodiversityLevel::Low);
    }

    #[test]
    fn trend_labels() {
        let t = trends(&BASE);
        assert_eq!(t.green, GreenTrend::Stable);
        assert_eq!(t.mobility, MobilityTrend::Efficient);
        assert_eq!(t.quality_of_life, QualityOfLife::High);

        let noisy = ZoneProfile {
            urban_noise: 60,
            green_areas: 61,
            ..BASE
        };
        let t = trends(&noisy);
        assert_eq!(t.green, GreenTrend::Positive);
        assert_eq!(t.quality_of_life, QualityOfLife::Medium);
    }
}
