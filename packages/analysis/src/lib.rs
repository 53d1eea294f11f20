#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sustainability analysis of user-drawn areas.
//!
//! The pipeline classifies the centroid of a drawn area into a zone, scores
//! the zone's indicator profile, derives recommendations, impact
//! projections and trend labels, and attaches a batch of synthetic resident
//! feedback. [`analyze_area`] is the pure, deterministic part of the
//! pipeline; [`AreaAnalyzer`] wraps it with the artificial latency and the
//! random feedback. [`session::AnalysisSession`] drives the interactive
//! workflow around it.

pub mod feedback;
pub mod impact;
pub mod recommend;
pub mod score;
pub mod session;
pub mod simulation;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use urban_map_analysis_models::{AreaAnalysisResult, GeographicData};
use urban_map_spatial::{DrawnShape, ShapeError};
use urban_map_zone::ZoneTable;
use urban_map_zone_models::GeoPoint;

/// Errors from analysing a drawn area.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The drawn shape is malformed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Runs the deterministic part of the pipeline for an area centred on
/// `center`.
///
/// The result carries no feedback; see [`AreaAnalyzer::analyze`].
#[must_use]
pub fn analyze_area(table: &ZoneTable, center: GeoPoint, area_km2: f64) -> AreaAnalysisResult {
    let classification = table.classify_detailed(center);
    if classification.is_fallback() {
        log::warn!(
            "({}, {}) matched no zone rule, using {}",
            center.latitude,
            center.longitude,
            classification.zone
        );
    }
    let zone = classification.zone;
    let profile = *table.profile_or_default(zone);
    let score = score::sustainability_score(&profile);
    let region = table.region();

    log::debug!("Area of {area_km2:.3} km² in {zone} scored {score}");

    AreaAnalysisResult {
        zone,
        area_km2,
        center,
        score,
        classification: score::classify_score(score),
        indicators: profile,
        breakdown: score::breakdown(&profile),
        recommendations: recommend::generate_recommendations(&profile, zone),
        environmental_impact: impact::environmental_impact(&profile, area_km2),
        trends: impact::trends(&profile),
        geographic_data: GeographicData {
            latitude: format!("{:.6}", center.latitude),
            longitude: format!("{:.6}", center.longitude),
            altitude: region.altitude.clone(),
            climate: region.climate.clone(),
            biome: region.biome.clone(),
        },
        feedback: None,
    }
}

/// Validates `shape` and runs [`analyze_area`] on its centroid and area.
///
/// # Errors
///
/// * If the shape is malformed
pub fn analyze_shape(
    table: &ZoneTable,
    shape: &DrawnShape,
) -> Result<AreaAnalysisResult, AnalysisError> {
    shape.validate()?;
    let center = shape.centroid()?;
    let area_km2 = shape.area_km2()?;
    Ok(analyze_area(table, center, area_km2))
}

/// Runs the full analysis pipeline, including feedback generation.
#[derive(Debug, Clone)]
pub struct AreaAnalyzer {
    table: Arc<ZoneTable>,
    delay: Duration,
}

impl AreaAnalyzer {
    /// Creates an analyzer with no artificial latency.
    #[must_use]
    pub fn new(table: ZoneTable) -> Self {
        Self {
            table: Arc::new(table),
            delay: Duration::ZERO,
        }
    }

    /// Sets the simulated processing delay applied before each analysis.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Analyses `shape` and attaches a fresh batch of synthetic feedback.
    ///
    /// # Errors
    ///
    /// * If the shape is malformed
    pub async fn analyze(&self, shape: &DrawnShape) -> Result<AreaAnalysisResult, AnalysisError> {
        self.wait().await;
        let result = analyze_shape(&self.table, shape)?;
        Ok(with_feedback(result))
    }

    /// Analyses an area of `area_km2` centred on `center`, with feedback.
    #[must_use]
    pub async fn analyze_point_area(&self, center: GeoPoint, area_km2: f64) -> AreaAnalysisResult {
        self.wait().await;
        with_feedback(analyze_area(&self.table, center, area_km2))
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn with_feedback(mut result: AreaAnalysisResult) -> AreaAnalysisResult {
    let today = chrono::Local::now().date_naive();
    result.feedback = Some(feedback::generate_feedback(&mut rand::rng(), today));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use urban_map_analysis_models::{BiodiversityLevel, SustainabilityClass};
    use urban_map_zone_models::{BoundingBox, Zone};

    #[test]
    fn parque_da_cidade_analysis() {
        let table = ZoneTable::embedded();
        let result = analyze_area(&table, GeoPoint::new(-15.79, -47.91), 1.5);
        assert_eq!(result.zone, Zone::ParqueDaCidade);
        assert_eq!(result.score, 87);
        assert_eq!(result.classification, SustainabilityClass::VeryGood);
        assert_eq!(result.environmental_impact.biodiversity, BiodiversityLevel::High);
        assert_eq!(result.geographic_data.latitude, "-15.790000");
        assert_eq!(result.geographic_data.biome, "Cerrado");
        assert!(!result.recommendations.is_empty());
        assert!(result.recommendations.len() <= 5);
        assert!(result.feedback.is_none());
    }

    #[test]
    fn uncovered_point_uses_default_zone() {
        let table = ZoneTable::embedded();
        let result = analyze_area(&table, GeoPoint::new(-15.70, -48.10), 1.0);
        assert_eq!(result.zone, Zone::PlanoPiloto);
    }

    #[test]
    fn analyze_shape_uses_bbox_center() {
        let table = ZoneTable::embedded();
        let shape = DrawnShape::Rectangle {
            bounds: BoundingBox::new(-47.89, -15.84, -47.87, -15.82),
        };
        let result = analyze_shape(&table, &shape).unwrap();
        assert_eq!(result.zone, Zone::AguasClaras);
        assert!((result.center.latitude + 15.83).abs() < 1e-9);
        assert!(result.area_km2 > 4.0 && result.area_km2 < 5.0);
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let table = ZoneTable::embedded();
        let shape = DrawnShape::Polygon {
            vertices: vec![GeoPoint::new(-15.79, -47.89), GeoPoint::new(-15.78, -47.88)],
        };
        assert!(matches!(
            analyze_shape(&table, &shape),
            Err(AnalysisError::Shape(ShapeError::TooFewVertices(2)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn analyzer_waits_then_attaches_feedback() {
        let analyzer =
            AreaAnalyzer::new(ZoneTable::embedded()).with_delay(Duration::from_millis(1500));
        let shape = DrawnShape::Circle {
            center: GeoPoint::new(-15.79, -47.89),
            radius_m: 500.0,
        };
        let started = tokio::time::Instant::now();
        let result = analyzer.analyze(&shape).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(result.zone, Zone::PlanoPiloto);
        let feedback = result.feedback.unwrap();
        assert!((8..=22).contains(&feedback.total_feedbacks));
    }

    #[tokio::test]
    async fn point_area_matches_pure_pipeline() {
        let analyzer = AreaAnalyzer::new(ZoneTable::embedded());
        let center = GeoPoint::new(-15.79, -47.91);
        let result = analyzer.analyze_point_area(center, 2.5).await;
        let pure = analyze_area(analyzer.table(), center, 2.5);
        assert_eq!(result.zone, pure.zone);
        assert_eq!(result.score, pure.score);
        assert_eq!(result.environmental_impact, pure.environmental_impact);
        assert!(result.feedback.is_some());
    }
}
