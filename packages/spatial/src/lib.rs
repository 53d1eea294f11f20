#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geometry of user-drawn areas.
//!
//! A drawn shape (polygon, rectangle, or circle) is reduced to its
//! bounding box. Analysis uses the bounding-box center as the shape's
//! centroid and the geodesic width × height of the box as its area.

use geo::{BoundingRect, Destination, Distance, Haversine, LineString, Point, Polygon};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use urban_map_zone_models::{BoundingBox, GeoPoint};

/// Errors produced when validating or converting a drawn shape.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// A polygon needs at least three vertices.
    #[error("Polygon has {0} vertices, expected at least 3")]
    TooFewVertices(usize),

    /// A coordinate is NaN or infinite.
    #[error("Shape contains a non-finite coordinate")]
    NonFiniteCoordinate,

    /// Circle radius must be positive and finite.
    #[error("Invalid circle radius: {0}")]
    InvalidRadius(f64),

    /// The `GeoJSON` input is not a supported geometry.
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
}

/// A shape drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawnShape {
    /// Free-form polygon. The ring may be open or closed.
    Polygon {
        /// Vertices in drawing order.
        vertices: Vec<GeoPoint>,
    },
    /// Axis-aligned rectangle.
    Rectangle {
        /// The rectangle's extent.
        bounds: BoundingBox,
    },
    /// Circle around a center point.
    Circle {
        /// Center of the circle.
        center: GeoPoint,
        /// Radius in metres.
        radius_m: f64,
    },
}

impl DrawnShape {
    /// Checks that the shape is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if a polygon has fewer than three vertices,
    /// any coordinate is non-finite, or a circle radius is not positive.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Self::Polygon { vertices } => {
                let distinct = distinct_vertex_count(vertices);
                if distinct < 3 {
                    return Err(ShapeError::TooFewVertices(distinct));
                }
                if !vertices.iter().all(GeoPoint::is_finite) {
                    return Err(ShapeError::NonFiniteCoordinate);
                }
            }
            Self::Rectangle { bounds } => {
                let corners = [bounds.west, bounds.south, bounds.east, bounds.north];
                if !corners.iter().all(|c| c.is_finite()) {
                    return Err(ShapeError::NonFiniteCoordinate);
                }
            }
            Self::Circle { center, radius_m } => {
                if !center.is_finite() {
                    return Err(ShapeError::NonFiniteCoordinate);
                }
                if !radius_m.is_finite() || *radius_m <= 0.0 {
                    return Err(ShapeError::InvalidRadius(*radius_m));
                }
            }
        }
        Ok(())
    }

    /// Bounding box of the shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the shape fails [`Self::validate`].
    pub fn bounds(&self) -> Result<BoundingBox, ShapeError> {
        self.validate()?;

        match self {
            Self::Polygon { vertices } => {
                let ring: LineString<f64> = vertices
                    .iter()
                    .map(|v| (v.longitude, v.latitude))
                    .collect::<Vec<_>>()
                    .into();
                let polygon = Polygon::new(ring, vec![]);
                let rect = polygon
                    .bounding_rect()
                    .ok_or(ShapeError::TooFewVertices(0))?;
                Ok(BoundingBox::new(
                    rect.min().x,
                    rect.min().y,
                    rect.max().x,
                    rect.max().y,
                ))
            }
            Self::Rectangle { bounds } => Ok(BoundingBox::new(
                bounds.west.min(bounds.east),
                bounds.south.min(bounds.north),
                bounds.west.max(bounds.east),
                bounds.south.max(bounds.north),
            )),
            Self::Circle { center, radius_m } => {
                let origin = Point::new(center.longitude, center.latitude);
                let north = Haversine.destination(origin, 0.0, *radius_m);
                let east = Haversine.destination(origin, 90.0, *radius_m);
                let south = Haversine.destination(origin, 180.0, *radius_m);
                let west = Haversine.destination(origin, 270.0, *radius_m);
                Ok(BoundingBox::new(west.x(), south.y(), east.x(), north.y()))
            }
        }
    }

    /// Centroid used for zone classification: the bounding-box center.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the shape is invalid.
    pub fn centroid(&self) -> Result<GeoPoint, ShapeError> {
        Ok(self.bounds()?.center())
    }

    /// Area of the shape's bounding box in km².
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the shape is invalid.
    pub fn area_km2(&self) -> Result<f64, ShapeError> {
        Ok(bbox_area_km2(&self.bounds()?))
    }

    /// Converts a `GeoJSON` geometry into a drawn shape.
    ///
    /// `Polygon` geometries map to [`DrawnShape::Polygon`] (outer ring
    /// only). A `Point` maps to a [`DrawnShape::Circle`] and requires
    /// `radius_m`, since `GeoJSON` has no circle type and map drawing
    /// tools export circles as a point plus a radius property.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnsupportedGeometry`] for other geometry
    /// types, unparseable input, or a point without radius.
    pub fn from_geojson(geojson: &GeoJson, radius_m: Option<f64>) -> Result<Self, ShapeError> {
        let geometry = match geojson {
            GeoJson::Geometry(geometry) => geometry.clone(),
            GeoJson::Feature(feature) => feature
                .geometry
                .clone()
                .ok_or_else(|| ShapeError::UnsupportedGeometry("empty feature".to_string()))?,
            GeoJson::FeatureCollection(_) => {
                return Err(ShapeError::UnsupportedGeometry(
                    "feature collection".to_string(),
                ));
            }
        };

        let geo_geom: geo::Geometry<f64> = geometry
            .try_into()
            .map_err(|e: geojson::Error| ShapeError::UnsupportedGeometry(e.to_string()))?;

        let shape = match geo_geom {
            geo::Geometry::Polygon(polygon) => Self::Polygon {
                vertices: polygon
                    .exterior()
                    .coords()
                    .map(|c| GeoPoint::new(c.y, c.x))
                    .collect(),
            },
            geo::Geometry::Rect(rect) => Self::Rectangle {
                bounds: BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
            },
            geo::Geometry::Point(point) => {
                let radius_m = radius_m.ok_or_else(|| {
                    ShapeError::UnsupportedGeometry("point without radius".to_string())
                })?;
                Self::Circle {
                    center: GeoPoint::new(point.y(), point.x()),
                    radius_m,
                }
            }
            other => {
                return Err(ShapeError::UnsupportedGeometry(format!("{other:?}")));
            }
        };

        shape.validate()?;
        Ok(shape)
    }
}

/// Geodesic area of a bounding box in km², measured as the east-west
/// extent along the box's middle latitude times its north-south extent.
#[must_use]
pub fn bbox_area_km2(bbox: &BoundingBox) -> f64 {
    let center = bbox.center();
    let width_m = Haversine.distance(
        Point::new(bbox.west, center.latitude),
        Point::new(bbox.east, center.latitude),
    );
    let height_m = Haversine.distance(
        Point::new(center.longitude, bbox.south),
        Point::new(center.longitude, bbox.north),
    );
    width_m * height_m / 1_000_000.0
}

/// Number of vertices ignoring a closing vertex equal to the first.
fn distinct_vertex_count(vertices: &[GeoPoint]) -> usize {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() > 1 && first == last => vertices.len() - 1,
        _ => vertices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DrawnShape {
        DrawnShape::Polygon {
            vertices: vec![
                GeoPoint::new(-15.80, -47.92),
                GeoPoint::new(-15.80, -47.90),
                GeoPoint::new(-15.78, -47.90),
                GeoPoint::new(-15.78, -47.92),
            ],
        }
    }

    #[test]
    fn polygon_centroid_is_bbox_center() {
        let centroid = square().centroid().unwrap();
        assert!((centroid.latitude - -15.79).abs() < 1e-9);
        assert!((centroid.longitude - -47.91).abs() < 1e-9);
    }

    #[test]
    fn polygon_area_is_about_two_km_square() {
        // 0.02° of latitude is ~2.22 km; 0.02° of longitude at -15.79° is ~2.14 km.
        let area = square().area_km2().unwrap();
        assert!((4.5..5.0).contains(&area), "unexpected area {area}");
    }

    #[test]
    fn circle_bounds_are_symmetric() {
        let shape = DrawnShape::Circle {
            center: GeoPoint::new(-15.8267, -47.9218),
            radius_m: 1000.0,
        };
        let bbox = shape.bounds().unwrap();
        let center = bbox.center();
        assert!((center.latitude - -15.8267).abs() < 1e-4);
        assert!((center.longitude - -47.9218).abs() < 1e-4);

        // A 2 km × 2 km box.
        let area = shape.area_km2().unwrap();
        assert!((area - 4.0).abs() < 0.05, "unexpected area {area}");
    }

    #[test]
    fn rectangle_corners_are_normalized() {
        let shape = DrawnShape::Rectangle {
            bounds: BoundingBox::new(-47.90, -15.78, -47.92, -15.80),
        };
        let bbox = shape.bounds().unwrap();
        assert!(bbox.west < bbox.east);
        assert!(bbox.south < bbox.north);
    }

    #[test]
    fn rejects_degenerate_polygon() {
        let shape = DrawnShape::Polygon {
            vertices: vec![
                GeoPoint::new(-15.80, -47.92),
                GeoPoint::new(-15.80, -47.90),
                GeoPoint::new(-15.80, -47.92),
            ],
        };
        assert_eq!(shape.validate(), Err(ShapeError::TooFewVertices(2)));
    }

    #[test]
    fn rejects_bad_radius_and_nan() {
        let shape = DrawnShape::Circle {
            center: GeoPoint::new(-15.8, -47.9),
            radius_m: 0.0,
        };
        assert!(matches!(shape.validate(), Err(ShapeError::InvalidRadius(_))));

        let shape = DrawnShape::Circle {
            center: GeoPoint::new(f64::NAN, -47.9),
            radius_m: 10.0,
        };
        assert_eq!(shape.validate(), Err(ShapeError::NonFiniteCoordinate));
    }

    #[test]
    fn converts_geojson_polygon() {
        let geojson: GeoJson = r#"{
            "type": "Polygon",
            "coordinates": [[[-47.92, -15.80], [-47.90, -15.80], [-47.90, -15.78], [-47.92, -15.78], [-47.92, -15.80]]]
        }"#
        .parse()
        .unwrap();
        let shape = DrawnShape::from_geojson(&geojson, None).unwrap();
        let centroid = shape.centroid().unwrap();
        assert!((centroid.latitude - -15.79).abs() < 1e-9);
        assert!((centroid.longitude - -47.91).abs() < 1e-9);
    }

    #[test]
    fn geojson_point_requires_radius() {
        let geojson: GeoJson = r#"{"type": "Point", "coordinates": [-47.9, -15.8]}"#
            .parse()
            .unwrap();
        assert!(DrawnShape::from_geojson(&geojson, None).is_err());
        let shape = DrawnShape::from_geojson(&geojson, Some(500.0)).unwrap();
        assert!(matches!(shape, DrawnShape::Circle { radius_m, .. } if (radius_m - 500.0).abs() < f64::EPSILON));
    }

    #[test]
    fn shape_json_is_tagged() {
        let json = serde_json::json!({
            "type": "circle",
            "center": {"latitude": -15.8, "longitude": -47.9},
            "radius_m": 250.0
        });
        let shape: DrawnShape = serde_json::from_value(json).unwrap();
        assert!(matches!(shape, DrawnShape::Circle { .. }));
    }
}
