#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City-level environmental datasets.
//!
//! These are the readouts shown on the dashboard outside of area analysis:
//! weather, air pollutants, monitoring stations, consolidated indicators,
//! traffic, heat islands, natural resources, sanitation and energy, and a
//! resident survey. Serialized keys are the Portuguese names used by the
//! dashboard's JSON endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use urban_map_zone_models::GeoPoint;

/// Latitude/longitude pair in the short `lat`/`lon` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(rename = "cidade")]
    pub city: String,
    /// Temperature in °C.
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    /// Relative humidity in %.
    #[serde(rename = "umidade")]
    pub humidity: f64,
    /// Pressure in hPa.
    #[serde(rename = "pressao")]
    pub pressure: f64,
    /// Wind speed.
    #[serde(rename = "vento")]
    pub wind: f64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: LatLon,
}

/// One pollutant measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Pollutant code (`pm25`, `pm10`, ...).
    #[serde(rename = "parametro")]
    pub parameter: String,
    #[serde(rename = "valor")]
    pub value: f64,
    #[serde(rename = "unidade")]
    pub unit: String,
    /// Name of the measuring location.
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: GeoPoint,
    #[serde(rename = "ultima_atualizacao")]
    pub last_updated: String,
}

/// Pollutant measurements for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "poluentes")]
    pub pollutants: Vec<PollutantReading>,
    #[serde(rename = "total_registros")]
    pub total: usize,
}

impl PollutionReport {
    /// The first reading of `parameter`, if any.
    #[must_use]
    pub fn reading(&self, parameter: &str) -> Option<&PollutantReading> {
        self.pollutants.iter().find(|p| p.parameter == parameter)
    }
}

/// One weighted point of the pollution heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    #[serde(rename = "coordenadas")]
    pub coordinates: GeoPoint,
    /// Relative intensity in `[0, 10)`.
    #[serde(rename = "intensidade")]
    pub intensity: f64,
}

/// A parameter measured by a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationParameter {
    pub name: String,
}

/// An air-quality monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringStation {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: GeoPoint,
    #[serde(rename = "parametros")]
    pub parameters: Vec<StationParameter>,
    #[serde(rename = "contagem_medicoes")]
    pub measurement_count: u32,
}

/// Monitoring stations of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationsReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estacoes")]
    pub stations: Vec<MonitoringStation>,
    #[serde(rename = "total_estacoes")]
    pub total: usize,
}

/// Consolidated urban indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrbanIndicators {
    #[serde(rename = "qualidade_ar")]
    pub air_quality: String,
    #[serde(rename = "indice_poluicao")]
    pub pollution_index: u8,
    /// Inhabitants per km².
    #[serde(rename = "densidade_populacional")]
    pub population_density: f64,
    /// Square metres of green area per inhabitant.
    #[serde(rename = "area_verde_per_capita")]
    pub green_area_per_capita: f64,
    #[serde(rename = "transporte_publico")]
    pub public_transport: u8,
    #[serde(rename = "infraestrutura_cicloviaria")]
    pub cycling_infrastructure: u8,
}

/// Consolidated indicators with recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorsReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "indicadores")]
    pub indicators: UrbanIndicators,
    #[serde(rename = "recomendacoes")]
    pub recommendations: Vec<String>,
}

/// Traffic on one road.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadTraffic {
    #[serde(rename = "via")]
    pub road: String,
    /// Congestion in %.
    #[serde(rename = "congestionamento")]
    pub congestion: u8,
    /// Average speed in km/h.
    #[serde(rename = "velocidade_media")]
    pub average_speed: u32,
}

/// Traffic summary for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficReport {
    #[serde(rename = "cidade")]
    pub city: String,
    /// Overall congestion in %.
    #[serde(rename = "nivel_congestionamento")]
    pub congestion: u8,
    #[serde(rename = "principais_vias")]
    pub main_roads: Vec<RoadTraffic>,
    #[serde(rename = "horario_pico")]
    pub rush_hour: bool,
    pub timestamp: DateTime<Utc>,
}

/// Summary record of one heat island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatIslandSummary {
    pub area: String,
    /// Temperature difference to the surroundings in °C.
    pub temp_diff: f64,
    /// Dominant surface cover.
    #[serde(rename = "cobertura")]
    pub cover: String,
    /// Vegetation in %.
    #[serde(rename = "vegetacao")]
    pub vegetation: u8,
}

/// Heat-island summary for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatIslandReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "ilhas_calor")]
    pub islands: Vec<HeatIslandSummary>,
    /// Mean temperature in °C.
    #[serde(rename = "temp_media")]
    pub mean_temperature: f64,
    #[serde(rename = "recomendacoes")]
    pub recommendations: Vec<String>,
}

/// A located heat island for the map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatIsland {
    pub area: String,
    pub temp_diff: f64,
    #[serde(rename = "cobertura")]
    pub cover: String,
    #[serde(rename = "vegetacao")]
    pub vegetation: u8,
    #[serde(rename = "coordenadas")]
    pub coordinates: GeoPoint,
    /// Relative intensity in `[0, 1]`.
    #[serde(rename = "intensidade")]
    pub intensity: f64,
}

impl HeatIsland {
    #[must_use]
    pub fn band(&self) -> HeatBand {
        HeatBand::from_temp_diff(self.temp_diff)
    }
}

/// Heat-island intensity band, by temperature difference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum HeatBand {
    /// ≥ 3.0 °C.
    #[strum(serialize = "Muito Alta")]
    VeryHigh,
    /// ≥ 2.5 °C.
    #[strum(serialize = "Alta")]
    High,
    /// ≥ 2.0 °C.
    #[strum(serialize = "Moderada-Alta")]
    ModeratelyHigh,
    /// ≥ 1.5 °C.
    #[strum(serialize = "Moderada")]
    Moderate,
    /// ≥ 1.0 °C.
    #[strum(serialize = "Baixa")]
    Low,
    /// Below 1.0 °C.
    #[strum(serialize = "Muito Baixa")]
    VeryLow,
}

impl HeatBand {
    /// Band for a temperature difference in °C.
    #[must_use]
    pub fn from_temp_diff(temp_diff: f64) -> Self {
        if temp_diff >= 3.0 {
            Self::VeryHigh
        } else if temp_diff >= 2.5 {
            Self::High
        } else if temp_diff >= 2.0 {
            Self::ModeratelyHigh
        } else if temp_diff >= 1.5 {
            Self::Moderate
        } else if temp_diff >= 1.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Map color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryHigh => "#ff0000",
            Self::High => "#ff4500",
            Self::ModeratelyHigh => "#ff8c00",
            Self::Moderate => "#ffd700",
            Self::Low => "#ffff00",
            Self::VeryLow => "#90ee90",
        }
    }
}

/// Kind of a green area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GreenAreaKind {
    #[serde(rename = "parque_urbano")]
    #[strum(serialize = "parque_urbano")]
    UrbanPark,
    #[serde(rename = "conservacao")]
    #[strum(serialize = "conservacao")]
    Conservation,
    #[serde(rename = "protegida")]
    #[strum(serialize = "protegida")]
    Protected,
    #[serde(rename = "recurso_hidrico")]
    #[strum(serialize = "recurso_hidrico")]
    WaterBody,
}

/// A park, reserve, or water body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenArea {
    #[serde(rename = "nome")]
    pub name: String,
    /// Area in hectares.
    pub area_ha: f64,
    #[serde(rename = "tipo")]
    pub kind: GreenAreaKind,
}

/// A water resource and its use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterResource {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "capacidade")]
    pub capacity: String,
    #[serde(rename = "uso")]
    pub usage: String,
}

/// Natural resources of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalResourcesReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "areas_verdes")]
    pub green_areas: Vec<GreenArea>,
    /// Vegetation cover in %.
    #[serde(rename = "cobertura_vegetal")]
    pub vegetation_cover: u8,
    #[serde(rename = "qualidade_ar")]
    pub air_quality: String,
    #[serde(rename = "recursos_hidricos")]
    pub water_resources: Vec<WaterResource>,
}

/// Sanitation coverage, all in %.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanitation {
    #[serde(rename = "cobertura_agua")]
    pub water_coverage: u8,
    #[serde(rename = "cobertura_esgoto")]
    pub sewage_coverage: u8,
    #[serde(rename = "tratamento_esgoto")]
    pub sewage_treatment: u8,
    #[serde(rename = "coleta_seletiva")]
    pub selective_collection: u8,
}

/// Share of energy consumption by sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyShare {
    #[serde(rename = "tipo")]
    pub sector: String,
    #[serde(rename = "percentual")]
    pub percent: u8,
}

/// Energy consumption profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Energy {
    /// kWh per inhabitant per year.
    #[serde(rename = "consumo_per_capita")]
    pub consumption_per_capita: u32,
    #[serde(rename = "fontes_renovaveis")]
    pub renewable_share: u8,
    #[serde(rename = "eficiencia_energetica")]
    pub efficiency: u8,
    #[serde(rename = "distribuicao")]
    pub distribution: Vec<EnergyShare>,
}

/// Sanitation and energy indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitationEnergyReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "saneamento")]
    pub sanitation: Sanitation,
    #[serde(rename = "energia")]
    pub energy: Energy,
    #[serde(rename = "recomendacoes")]
    pub recommendations: Vec<String>,
}

/// Resident survey results, all in %.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    #[serde(rename = "satisfacao_geral")]
    pub overall_satisfaction: u8,
    #[serde(rename = "qualidade_vida")]
    pub quality_of_life: u8,
    #[serde(rename = "transporte_publico")]
    pub public_transport: u8,
    #[serde(rename = "areas_verdes")]
    pub green_areas: u8,
    #[serde(rename = "seguranca")]
    pub safety: u8,
    #[serde(rename = "saneamento")]
    pub sanitation: u8,
}

/// Share of complaints in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintShare {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "percentual")]
    pub percent: u8,
}

/// Resident perception survey for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationFeedbackReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "pesquisa")]
    pub survey: Survey,
    #[serde(rename = "reclamacoes_frequentes")]
    pub frequent_complaints: Vec<ComplaintShare>,
    #[serde(rename = "sugestoes")]
    pub suggestions: Vec<String>,
}

/// Air-quality label derived from PM2.5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum AirQualityLabel {
    /// PM2.5 below 12 µg/m³.
    #[strum(serialize = "Boa")]
    Good,
    /// PM2.5 below 35 µg/m³.
    #[strum(serialize = "Moderada")]
    Moderate,
    #[strum(serialize = "Ruim")]
    Poor,
}

impl AirQualityLabel {
    /// Label for a PM2.5 concentration in µg/m³.
    #[must_use]
    pub fn from_pm25(pm25: f64) -> Self {
        if pm25 < 12.0 {
            Self::Good
        } else if pm25 < 35.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

/// OpenStreetMap highway class of a major road.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
}

impl RoadClass {
    /// All classes queried for the traffic layer.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Motorway, Self::Trunk, Self::Primary]
    }

    /// Portuguese display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Motorway => "Rodovia",
            Self::Trunk => "Via expressa",
            Self::Primary => "Via principal",
        }
    }

    /// Stroke weight used when drawing the road.
    #[must_use]
    pub const fn stroke_weight(self) -> u8 {
        match self {
            Self::Motorway => 6,
            Self::Trunk => 5,
            Self::Primary => 4,
        }
    }
}

/// Congestion band of a road segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CongestionLevel {
    /// Below 40 %.
    Free,
    /// 40 % to 69 %.
    Moderate,
    /// 70 % and above.
    Heavy,
}

impl CongestionLevel {
    #[must_use]
    pub const fn from_percent(congestion: u8) -> Self {
        match congestion {
            70.. => Self::Heavy,
            40..=69 => Self::Moderate,
            _ => Self::Free,
        }
    }

    /// Map color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Free => "#2ecc71",
            Self::Moderate => "#f39c12",
            Self::Heavy => "#e74c3c",
        }
    }
}

/// Where the traffic layer's roads came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoadSource {
    /// Live Overpass query.
    Overpass,
    /// Built-in dataset used when the query fails.
    Simulated,
}

/// A road drawn on the traffic layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
    /// Road name, if tagged.
    pub name: Option<String>,
    pub class: RoadClass,
    /// Polyline vertices; empty for simulated roads.
    pub geometry: Vec<GeoPoint>,
    /// Congestion in %.
    pub congestion: u8,
    pub speed_kmh: u32,
}

impl RoadSegment {
    /// Name to display, with a placeholder for unnamed ways.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Via sem nome")
    }

    #[must_use]
    pub const fn congestion_level(&self) -> CongestionLevel {
        CongestionLevel::from_percent(self.congestion)
    }
}

/// Roads for the traffic layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficLayer {
    pub source: RoadSource,
    pub roads: Vec<RoadSegment>,
}
