#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City environmental datasets.
//!
//! Datasets are embedded TOML files, one per supported city, loaded through
//! the [`registry`]. Only Brasília is available; any other city name is
//! rejected with [`CityError::NotAvailable`].
//!
//! Also provides the city-name autocomplete list ([`suggest`]), randomized
//! live-style readouts ([`sample`]), and the Overpass road client with its
//! simulated fallback ([`overpass`]).

pub mod overpass;
pub mod registry;
pub mod sample;
pub mod suggest;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use urban_map_city_models::{
    HeatIsland, HeatIslandReport, IndicatorsReport, MonitoringStation, NaturalResourcesReport,
    PollutantReading, PollutionReport, PopulationFeedbackReport, RoadTraffic,
    SanitationEnergyReport, StationsReport, TrafficReport, WeatherReport,
};
use urban_map_zone_models::GeoPoint;

/// City used when the user submits an empty name.
pub const DEFAULT_CITY: &str = "Brasília";

/// Errors from loading or querying city datasets.
#[derive(Debug, Error)]
pub enum CityError {
    /// Failed to parse a city dataset.
    #[error("City dataset parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// No dataset exists for the requested city.
    #[error("Cidade não disponível: {0}. Use 'Brasília'")]
    NotAvailable(String),
}

/// Traffic readouts without the request timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrafficSection {
    #[serde(rename = "nivel_congestionamento")]
    pub congestion: u8,
    #[serde(rename = "principais_vias")]
    pub main_roads: Vec<RoadTraffic>,
    #[serde(rename = "horario_pico")]
    pub rush_hour: bool,
}

/// Every dataset known for one city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityDataset {
    /// Canonical city name.
    pub name: String,
    /// Lowercase names accepted for this city.
    pub aliases: Vec<String>,
    /// Reference point used for map centering and road queries.
    pub center: GeoPoint,
    #[serde(rename = "clima")]
    pub weather: WeatherReport,
    #[serde(rename = "poluentes")]
    pub pollutants: Vec<PollutantReading>,
    #[serde(rename = "estacoes")]
    pub stations: Vec<MonitoringStation>,
    #[serde(rename = "indicadores")]
    pub indicators: IndicatorsReport,
    #[serde(rename = "transito")]
    pub traffic: TrafficSection,
    #[serde(rename = "temperatura")]
    pub heat_islands: HeatIslandReport,
    /// Located heat islands for the map layer.
    #[serde(rename = "ilhas_calor")]
    pub heat_island_points: Vec<HeatIsland>,
    #[serde(rename = "recursos_naturais")]
    pub natural_resources: NaturalResourcesReport,
    #[serde(rename = "saneamento_energia")]
    pub sanitation_energy: SanitationEnergyReport,
    #[serde(rename = "feedback_populacao")]
    pub population_feedback: PopulationFeedbackReport,
}

impl CityDataset {
    /// Parses a dataset from TOML.
    ///
    /// # Errors
    ///
    /// * If the TOML is malformed or does not match the dataset schema
    pub fn from_toml(toml_str: &str) -> Result<Self, CityError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Whether `query` names this city (trimmed, case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        self.name.to_lowercase() == query || self.aliases.iter().any(|a| *a == query)
    }

    #[must_use]
    pub fn pollution(&self) -> PollutionReport {
        PollutionReport {
            city: self.name.clone(),
            pollutants: self.pollutants.clone(),
            total: self.pollutants.len(),
        }
    }

    #[must_use]
    pub fn stations_report(&self) -> StationsReport {
        StationsReport {
            city: self.name.clone(),
            stations: self.stations.clone(),
            total: self.stations.len(),
        }
    }

    /// Traffic summary stamped with `now`.
    #[must_use]
    pub fn traffic_report(&self, now: DateTime<Utc>) -> TrafficReport {
        TrafficReport {
            city: self.name.clone(),
            congestion: self.traffic.congestion,
            main_roads: self.traffic.main_roads.clone(),
            rush_hour: self.traffic.rush_hour,
            timestamp: now,
        }
    }
}

/// Resolves a user-entered city name.
///
/// The input is trimmed; an empty name selects [`DEFAULT_CITY`].
///
/// # Errors
///
/// * If no embedded dataset matches the name
pub fn resolve_city(input: &str) -> Result<&'static CityDataset, CityError> {
    let query = input.trim();
    let query = if query.is_empty() { DEFAULT_CITY } else { query };

    registry::cities()
        .iter()
        .find(|c| c.matches(query))
        .ok_or_else(|| {
            log::info!("City '{query}' not available");
            CityError::NotAvailable(query.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_brasilia_variants() {
        for input in ["Brasília", "brasilia", "  BRASÍLIA ", "BrAsIlIa", ""] {
            let city = resolve_city(input).unwrap();
            assert_eq!(city.name, "Brasília", "input {input:?}");
        }
    }

    #[test]
    fn rejects_other_cities() {
        let err = resolve_city("São Paulo").unwrap_err();
        assert!(matches!(err, CityError::NotAvailable(ref c) if c == "São Paulo"));
        assert!(err.to_string().contains("Brasília"));
    }

    #[test]
    fn derived_reports_count_entries() {
        let city = resolve_city("Brasília").unwrap();
        let pollution = city.pollution();
        assert_eq!(pollution.total, 2);
        assert!((pollution.reading("pm25").unwrap().value - 12.5).abs() < f64::EPSILON);
        assert_eq!(city.stations_report().total, 2);

        let now = Utc::now();
        let traffic = city.traffic_report(now);
        assert_eq!(traffic.congestion, 65);
        assert_eq!(traffic.main_roads.len(), 4);
        assert_eq!(traffic.timestamp, now);
    }

    #[test]
    fn malformed_dataset_is_a_parse_error() {
        assert!(matches!(
            CityDataset::from_toml("name = 1"),
            Err(CityError::Parse(_))
        ));
    }
}
