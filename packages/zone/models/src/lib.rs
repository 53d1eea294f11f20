#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Zone, indicator, and indicator-profile types.
//!
//! This crate defines the named zones of the study area, the nine
//! sustainability indicators measured for each zone, and the TOML schema
//! used to embed the zone table and the ordered classification rules.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A point in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }

    /// Whether the point lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// The named zones of the study area.
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
pub enum Zone {
    /// Central planned area of Brasília.
    #[serde(rename = "Plano Piloto")]
    #[strum(serialize = "Plano Piloto")]
    PlanoPiloto,
    /// High-rise residential district.
    #[serde(rename = "Águas Claras")]
    #[strum(serialize = "Águas Claras")]
    AguasClaras,
    /// Low-density lakeside residential district.
    #[serde(rename = "Lago Sul")]
    #[strum(serialize = "Lago Sul")]
    LagoSul,
    /// Dense satellite city.
    #[serde(rename = "Taguatinga")]
    #[strum(serialize = "Taguatinga")]
    Taguatinga,
    /// Most populous satellite city.
    #[serde(rename = "Ceilândia")]
    #[strum(serialize = "Ceilândia")]
    Ceilandia,
    /// Large urban park.
    #[serde(rename = "Parque da Cidade")]
    #[strum(serialize = "Parque da Cidade")]
    ParqueDaCidade,
}

impl Zone {
    /// Zone assigned when no classification rule matches.
    pub const DEFAULT: Self = Self::PlanoPiloto;

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PlanoPiloto,
            Self::AguasClaras,
            Self::LagoSul,
            Self::Taguatinga,
            Self::Ceilandia,
            Self::ParqueDaCidade,
        ]
    }
}

/// Whether a higher or lower indicator value is better for sustainability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Higher values are better.
    HigherIsBetter,
    /// Lower values are better; the value is inverted as `100 - value`
    /// before weighting.
    LowerIsBetter,
}

/// One dimension of urban sustainability, measured on a 0-100 scale.
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
pub enum Indicator {
    /// Built-up density.
    #[serde(rename = "densidade_construcao")]
    #[strum(serialize = "densidade_construcao")]
    ConstructionDensity,
    /// Share of green areas.
    #[serde(rename = "areas_verdes")]
    #[strum(serialize = "areas_verdes")]
    GreenAreas,
    /// Access to public transport.
    #[serde(rename = "acessibilidade_transporte")]
    #[strum(serialize = "acessibilidade_transporte")]
    TransitAccessibility,
    /// Air quality.
    #[serde(rename = "qualidade_ar")]
    #[strum(serialize = "qualidade_ar")]
    AirQuality,
    /// Urban noise level.
    #[serde(rename = "ruido_urbano")]
    #[strum(serialize = "ruido_urbano")]
    UrbanNoise,
    /// Water and sewage infrastructure coverage.
    #[serde(rename = "infraestrutura_saneamento")]
    #[strum(serialize = "infraestrutura_saneamento")]
    SanitationInfrastructure,
    /// Tree and vegetation canopy.
    #[serde(rename = "cobertura_vegetal")]
    #[strum(serialize = "cobertura_vegetal")]
    VegetationCover,
    /// Soil permeability.
    #[serde(rename = "permeabilidade_solo")]
    #[strum(serialize = "permeabilidade_solo")]
    SoilPermeability,
    /// Resident population density.
    #[serde(rename = "densidade_populacional")]
    #[strum(serialize = "densidade_populacional")]
    PopulationDensity,
}

impl Indicator {
    /// Returns the polarity of this indicator.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::UrbanNoise | Self::ConstructionDensity | Self::PopulationDensity => {
                Polarity::LowerIsBetter
            }
            Self::GreenAreas
            | Self::TransitAccessibility
            | Self::AirQuality
            | Self::SanitationInfrastructure
            | Self::VegetationCover
            | Self::SoilPermeability => Polarity::HigherIsBetter,
        }
    }

    /// Returns the value with polarity applied, so that higher is always
    /// better.
    #[must_use]
    pub const fn effective_value(self, value: u8) -> u8 {
        match self.polarity() {
            Polarity::HigherIsBetter => value,
            Polarity::LowerIsBetter => 100u8.saturating_sub(value),
        }
    }

    /// Human-readable name shown in the dashboard.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ConstructionDensity => "Densidade Construtiva",
            Self::GreenAreas => "Áreas Verdes",
            Self::TransitAccessibility => "Transporte Público",
            Self::AirQuality => "Qualidade do Ar",
            Self::UrbanNoise => "Poluição Sonora",
            Self::SanitationInfrastructure => "Saneamento Básico",
            Self::VegetationCover => "Cobertura Vegetal",
            Self::SoilPermeability => "Permeabilidade do Solo",
            Self::PopulationDensity => "Densidade Populacional",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ConstructionDensity,
            Self::GreenAreas,
            Self::TransitAccessibility,
            Self::AirQuality,
            Self::UrbanNoise,
            Self::SanitationInfrastructure,
            Self::VegetationCover,
            Self::SoilPermeability,
            Self::PopulationDensity,
        ]
    }
}

/// The nine-indicator profile of a zone. Every field is in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneProfile {
    /// Built-up density.
    #[serde(rename = "densidade_construcao")]
    pub construction_density: u8,
    /// Share of green areas.
    #[serde(rename = "areas_verdes")]
    pub green_areas: u8,
    /// Access to public transport.
    #[serde(rename = "acessibilidade_transporte")]
    pub transit_accessibility: u8,
    /// Air quality.
    #[serde(rename = "qualidade_ar")]
    pub air_quality: u8,
    /// Urban noise level.
    #[serde(rename = "ruido_urbano")]
    pub urban_noise: u8,
    /// Sanitation infrastructure coverage.
    #[serde(rename = "infraestrutura_saneamento")]
    pub sanitation_infrastructure: u8,
    /// Vegetation cover.
    #[serde(rename = "cobertura_vegetal")]
    pub vegetation_cover: u8,
    /// Soil permeability.
    #[serde(rename = "permeabilidade_solo")]
    pub soil_permeability: u8,
    /// Population density.
    #[serde(rename = "densidade_populacional")]
    pub population_density: u8,
}

impl ZoneProfile {
    /// Returns the value of a single indicator.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> u8 {
        match indicator {
            Indicator::ConstructionDensity => self.construction_density,
            Indicator::GreenAreas => self.green_areas,
            Indicator::TransitAccessibility => self.transit_accessibility,
            Indicator::AirQuality => self.air_quality,
            Indicator::UrbanNoise => self.urban_noise,
            Indicator::SanitationInfrastructure => self.sanitation_infrastructure,
            Indicator::VegetationCover => self.vegetation_cover,
            Indicator::SoilPermeability => self.soil_permeability,
            Indicator::PopulationDensity => self.population_density,
        }
    }

    /// Iterates over `(indicator, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, u8)> + '_ {
        Indicator::all().iter().map(|i| (*i, self.get(*i)))
    }

    /// Returns the first indicator whose value exceeds 100, if any.
    #[must_use]
    pub fn first_out_of_range(&self) -> Option<(Indicator, u8)> {
        self.iter().find(|(_, value)| *value > 100)
    }
}

/// Static metadata shared by every zone of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Region or city name (e.g., "Brasília").
    pub name: String,
    /// Approximate altitude label (e.g., "~1000m").
    pub altitude: String,
    /// Climate classification.
    pub climate: String,
    /// Biome.
    pub biome: String,
}

/// The test performed by a single classification rule.
///
/// All bounds are strict comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleTest {
    /// Intersection of optional latitude/longitude half-planes.
    Bounds {
        /// Matches when `latitude > lat_above`.
        lat_above: Option<f64>,
        /// Matches when `latitude < lat_below`.
        lat_below: Option<f64>,
        /// Matches when `longitude > lng_above`.
        lng_above: Option<f64>,
        /// Matches when `longitude < lng_below`.
        lng_below: Option<f64>,
    },
    /// Square neighbourhood around a center point.
    Near {
        /// Center latitude.
        latitude: f64,
        /// Center longitude.
        longitude: f64,
        /// Maximum absolute difference on each axis (exclusive).
        tolerance: f64,
    },
}

impl RuleTest {
    /// Whether the point satisfies this test.
    #[must_use]
    pub fn matches(&self, point: GeoPoint) -> bool {
        match *self {
            Self::Bounds {
                lat_above,
                lat_below,
                lng_above,
                lng_below,
            } => {
                lat_above.is_none_or(|b| point.latitude > b)
                    && lat_below.is_none_or(|b| point.latitude < b)
                    && lng_above.is_none_or(|b| point.longitude > b)
                    && lng_below.is_none_or(|b| point.longitude < b)
            }
            Self::Near {
                latitude,
                longitude,
                tolerance,
            } => {
                (point.latitude - latitude).abs() < tolerance
                    && (point.longitude - longitude).abs() < tolerance
            }
        }
    }
}

/// An ordered classification rule. The first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRule {
    /// Zone assigned when the rule matches.
    pub zone: Zone,
    /// The geometric test.
    #[serde(flatten)]
    pub test: RuleTest,
}

/// A zone and its indicator profile, as written in the zone table TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// The zone.
    pub zone: Zone,
    /// Its indicator profile.
    pub profile: ZoneProfile,
}

/// The zone table TOML schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTableDefinition {
    /// Region metadata.
    pub region: RegionInfo,
    /// One entry per zone.
    pub zones: Vec<ZoneEntry>,
    /// Ordered classification rules.
    pub rules: Vec<ZoneRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_names_roundtrip() {
        for zone in Zone::all() {
            let name = zone.to_string();
            let parsed: Zone = name.parse().unwrap();
            assert_eq!(parsed, *zone);
        }
        assert_eq!(Zone::AguasClaras.to_string(), "Águas Claras");
    }

    #[test]
    fn exactly_three_indicators_are_inverted() {
        let inverted: Vec<Indicator> = Indicator::all()
            .iter()
            .copied()
            .filter(|i| i.polarity() == Polarity::LowerIsBetter)
            .collect();
        assert_eq!(
            inverted,
            vec![
                Indicator::ConstructionDensity,
                Indicator::UrbanNoise,
                Indicator::PopulationDensity,
            ]
        );
    }

    #[test]
    fn indicator_keys_match_between_serde_and_display() {
        for indicator in Indicator::all() {
            let json = serde_json::to_string(indicator).unwrap();
            assert_eq!(json, format!("\"{indicator}\""));
            let parsed: Indicator = indicator.as_ref().parse().unwrap();
            assert_eq!(parsed, *indicator);
        }
        assert_eq!(Indicator::SoilPermeability.to_string(), "permeabilidade_solo");
    }

    #[test]
    fn effective_value_inverts_lower_is_better() {
        assert_eq!(Indicator::UrbanNoise.effective_value(75), 25);
        assert_eq!(Indicator::GreenAreas.effective_value(75), 75);
    }

    #[test]
    fn near_rule_is_strict() {
        let test = RuleTest::Near {
            latitude: -15.79,
            longitude: -47.90,
            tolerance: 0.02,
        };
        assert!(test.matches(GeoPoint::new(-15.79, -47.91)));
        assert!(!test.matches(GeoPoint::new(-15.76, -47.90)));
    }

    #[test]
    fn bounds_rule_ignores_missing_edges() {
        let test = RuleTest::Bounds {
            lat_above: None,
            lat_below: Some(-15.85),
            lng_above: None,
            lng_below: None,
        };
        assert!(test.matches(GeoPoint::new(-16.5, 10.0)));
        assert!(!test.matches(GeoPoint::new(-15.85, -48.0)));
    }

    #[test]
    fn profile_serializes_with_indicator_keys() {
        let profile = ZoneProfile {
            construction_density: 1,
            green_areas: 2,
            transit_accessibility: 3,
            air_quality: 4,
            urban_noise: 5,
            sanitation_infrastructure: 6,
            vegetation_cover: 7,
            soil_permeability: 8,
            population_density: 9,
        };
        let json = serde_json::to_value(profile).unwrap();
        for (indicator, value) in profile.iter() {
            assert_eq!(json[indicator.as_ref()], u64::from(value));
        }
    }

    #[test]
    fn bounding_box_center() {
        let bbox = BoundingBox::new(-48.0, -16.0, -47.0, -15.0);
        let center = bbox.center();
        assert!((center.latitude - -15.5).abs() < 1e-12);
        assert!((center.longitude - -47.5).abs() < 1e-12);
        assert!(bbox.contains(center));
    }
}
