#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the urban map server.
//!
//! New endpoints use camelCase JSON. The area-analysis request keeps the
//! Portuguese keys (`coordenadas`, `raio`, `geometria`) existing map
//! clients already send.

use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use urban_map_analysis_models::{IndicatorReading, SustainabilityClass};
use urban_map_spatial::{DrawnShape, ShapeError};
use urban_map_zone_models::{GeoPoint, Zone, ZoneProfile};

/// Radius used when an area request gives a center but no radius, in metres.
pub const DEFAULT_RADIUS_M: f64 = 1000.0;

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub message: String,
    pub status: String,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// Errors turning an [`AnalyzeAreaRequest`] into a shape.
#[derive(Debug, Error, PartialEq)]
pub enum AreaRequestError {
    #[error("Informe 'coordenadas' ou 'geometria'")]
    MissingArea,

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Body of `POST /api/analise-area`.
///
/// Either `geometria` (a `GeoJSON` polygon, or a point with `raio`) or
/// `coordenadas` as `[lat, lng]` with an optional `raio` in metres.
/// `geometria` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeAreaRequest {
    #[serde(default, rename = "coordenadas")]
    pub coordinates: Option<[f64; 2]>,
    #[serde(default, rename = "raio")]
    pub radius_m: Option<f64>,
    #[serde(default, rename = "geometria")]
    pub geometry: Option<GeoJson>,
}

impl AnalyzeAreaRequest {
    /// Converts the request into a validated [`DrawnShape`].
    ///
    /// # Errors
    ///
    /// * If neither coordinates nor geometry are given
    /// * If the geometry or circle is malformed
    pub fn to_shape(&self) -> Result<DrawnShape, AreaRequestError> {
        if let Some(geometry) = &self.geometry {
            return Ok(DrawnShape::from_geojson(
                geometry,
                Some(self.radius_m.unwrap_or(DEFAULT_RADIUS_M)),
            )?);
        }

        let [lat, lng] = self.coordinates.ok_or(AreaRequestError::MissingArea)?;
        let shape = DrawnShape::Circle {
            center: GeoPoint::new(lat, lng),
            radius_m: self.radius_m.unwrap_or(DEFAULT_RADIUS_M),
        };
        shape.validate()?;
        Ok(shape)
    }
}

/// A zone with its profile and derived score, as listed by `/api/zonas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub zone: Zone,
    pub score: u8,
    pub classification: SustainabilityClass,
    pub profile: ZoneProfile,
    pub breakdown: Vec<IndicatorReading>,
}

/// Response of `GET /api/cidades?q=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestions {
    pub query: String,
    pub cities: Vec<String>,
}

/// Query string of `GET /api/cidades`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}
