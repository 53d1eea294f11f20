//! Threshold-driven recommendations.
//!
//! Each weakness predicate is checked in a fixed order and contributes one
//! template. Order follows the predicates, not severity.

use urban_map_zone_models::{Zone, ZoneProfile};

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A weakness detected in a zone profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weakness {
    /// Green areas below 30.
    GreenAreas,
    /// Vegetation cover below 25.
    VegetationCover,
    /// Air quality below 60.
    AirQuality,
    /// Soil permeability below 30.
    SoilPermeability,
    /// Urban noise above 70.
    NoisePollution,
    /// Construction density above 80.
    ConstructionDensity,
}

impl Weakness {
    /// All weaknesses in evaluation order.
    pub const ALL: [Self; 6] = [
        Self::GreenAreas,
        Self::VegetationCover,
        Self::AirQuality,
        Self::SoilPermeability,
        Self::NoisePollution,
        Self::ConstructionDensity,
    ];

    /// Whether the profile exhibits this weakness.
    #[must_use]
    pub const fn applies(self, profile: &ZoneProfile) -> bool {
        match self {
            Self::GreenAreas => profile.green_areas < 30,
            Self::VegetationCover => profile.vegetation_cover < 25,
            Self::AirQuality => profile.air_quality < 60,
            Self::SoilPermeability => profile.soil_permeability < 30,
            Self::NoisePollution => profile.urban_noise > 70,
            Self::ConstructionDensity => profile.construction_density > 80,
        }
    }

    /// The recommendation addressing this weakness.
    #[must_use]
    pub fn recommendation(self, zone: Zone) -> String {
        match self {
            Self::GreenAreas => {
                format!("Implementar parques lineares e aumentar áreas verdes em 20% na {zone}")
            }
            Self::VegetationCover => {
                "Promover programa de arborização urbana e telhados verdes".to_string()
            }
            Self::AirQuality => {
                "Criar zonas de baixa emissão e incentivar transporte sustentável".to_string()
            }
            Self::SoilPermeability => {
                "Implementar pavimentos permeáveis e jardins de chuva".to_string()
            }
            Self::NoisePollution => {
                "Instalar barreiras acústicas e regular tráfego pesado".to_string()
            }
            Self::ConstructionDensity => {
                "Revisar plano diretor para controle de densidade".to_string()
            }
        }
    }
}

/// Weaknesses of a profile, in evaluation order.
#[must_use]
pub fn weaknesses(profile: &ZoneProfile) -> Vec<Weakness> {
    Weakness::ALL
        .into_iter()
        .filter(|w| w.applies(profile))
        .collect()
}

/// Generates up to [`MAX_RECOMMENDATIONS`] recommendations for a zone.
///
/// When no weakness applies, two generic "keep going" recommendations are
/// returned instead.
#[must_use]
pub fn generate_recommendations(profile: &ZoneProfile, zone: Zone) -> Vec<String> {
    let mut recommendations: Vec<String> = weaknesses(profile)
        .into_iter()
        .map(|w| w.recommendation(zone))
        .collect();

    if recommendations.is_empty() {
        recommendations.push(
            "Manter políticas de sustentabilidade e monitorar indicadores".to_string(),
        );
        recommendations.push(format!(
            "Expandir programas de eficiência energética na {zone}"
        ));
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use urban_map_zone::ZoneTable;

    const HEALTHY: ZoneProfile = ZoneProfile {
        construction_density: 50,
        green_areas: 60,
        transit_accessibility: 60,
        air_quality: 80,
        urban_noise: 40,
        sanitation_infrastructure: 80,
        vegetation_cover: 60,
        soil_permeability: 60,
        population_density: 50,
    };

    #[test]
    fn low_green_areas_recommends_more_green() {
        let profile = ZoneProfile {
            green_areas: 10,
            ..HEALTHY
        };
        let recs = generate_recommendations(&profile, Zone::Taguatinga);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("aumentar áreas verdes"));
        assert!(recs[0].ends_with("na Taguatinga"));
    }

    #[test]
    fn healthy_profile_gets_two_generic_recommendations() {
        let recs = generate_recommendations(&HEALTHY, Zone::LagoSul);
        assert_eq!(
            recs,
            vec![
                "Manter políticas de sustentabilidade e monitorar indicadores".to_string(),
                "Expandir programas de eficiência energética na Lago Sul".to_string(),
            ]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let profile = ZoneProfile {
            green_areas: 30,
            vegetation_cover: 25,
            air_quality: 60,
            soil_permeability: 30,
            urban_noise: 70,
            construction_density: 80,
            ..HEALTHY
        };
        assert!(weaknesses(&profile).is_empty());
    }

    #[test]
    fn all_weaknesses_truncate_to_five_in_order() {
        let profile = ZoneProfile {
            green_areas: 0,
            vegetation_cover: 0,
            air_quality: 0,
            soil_permeability: 0,
            urban_noise: 100,
            construction_density: 100,
            ..HEALTHY
        };
        assert_eq!(weaknesses(&profile).len(), 6);
        let recs = generate_recommendations(&profile, Zone::Ceilandia);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs[0].contains("parques lineares"));
        assert!(recs[4].contains("barreiras acústicas"));
    }

    #[test]
    fn aguas_claras_weaknesses() {
        let table = ZoneTable::embedded();
        let profile = table.profile(Zone::AguasClaras).unwrap();
        assert_eq!(
            weaknesses(profile),
            vec![
                Weakness::GreenAreas,
                Weakness::VegetationCover,
                Weakness::SoilPermeability,
                Weakness::NoisePollution,
                Weakness::ConstructionDensity,
            ]
        );
    }
}
