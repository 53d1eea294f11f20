//! Overpass API client for major-road geometry.
//!
//! Queries `OpenStreetMap` ways tagged as motorway, trunk, or primary around
//! a city center. Live traffic is not available, so congestion and speed
//! are randomized per road. When the query fails for any reason the traffic
//! layer falls back to the city's built-in main-roads dataset.
//!
//! See <https://wiki.openstreetmap.org/wiki/Overpass_API>

use std::str::FromStr as _;

use rand::Rng;
use thiserror::Error;
use urban_map_city_models::{RoadClass, RoadSegment, RoadSource, TrafficLayer};
use urban_map_zone_models::GeoPoint;

use crate::CityDataset;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Search radius around the city center, in metres.
pub const SEARCH_RADIUS_M: u32 = 20_000;

/// Server-side query timeout, in seconds.
const QUERY_TIMEOUT_S: u32 = 25;

/// Errors from the Overpass client.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not have the expected structure.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

/// A way returned by Overpass, before traffic values are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmWay {
    pub name: Option<String>,
    pub class: RoadClass,
    pub geometry: Vec<GeoPoint>,
}

/// Builds the Overpass QL query for major roads within `radius_m` of
/// `center`.
#[must_use]
pub fn build_query(center: GeoPoint, radius_m: u32) -> String {
    use std::fmt::Write as _;

    let mut query = format!("[out:json][timeout:{QUERY_TIMEOUT_S}];\n(\n");
    for class in RoadClass::all() {
        let _ = writeln!(
            query,
            "  way[\"highway\"=\"{class}\"](around:{radius_m}, {}, {});",
            center.latitude, center.longitude
        );
    }
    query.push_str(");\nout geom;\n");
    query
}

/// Fetches major roads around `center`.
///
/// # Errors
///
/// Returns [`OverpassError`] if the HTTP request or response parsing fails.
pub async fn fetch_roads(
    client: &reqwest::Client,
    base_url: &str,
    center: GeoPoint,
) -> Result<Vec<OsmWay>, OverpassError> {
    let query = build_query(center, SEARCH_RADIUS_M);
    log::debug!("Querying Overpass at {base_url}");

    let resp = client
        .post(base_url)
        .body(query)
        .send()
        .await?
        .error_for_status()?;

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses an Overpass JSON response.
///
/// Elements without geometry or with an unexpected highway class are
/// skipped.
fn parse_response(body: &serde_json::Value) -> Result<Vec<OsmWay>, OverpassError> {
    let elements = body["elements"]
        .as_array()
        .ok_or_else(|| OverpassError::Parse {
            message: "Overpass response has no elements array".to_string(),
        })?;

    let ways = elements
        .iter()
        .filter_map(|element| {
            let geometry = element["geometry"].as_array()?;
            let class = element["tags"]["highway"]
                .as_str()
                .and_then(|h| RoadClass::from_str(h).ok())?;

            let geometry: Vec<GeoPoint> = geometry
                .iter()
                .filter_map(|node| {
                    Some(GeoPoint::new(node["lat"].as_f64()?, node["lon"].as_f64()?))
                })
                .collect();

            if geometry.is_empty() {
                return None;
            }

            Some(OsmWay {
                name: element["tags"]["name"].as_str().map(String::from),
                class,
                geometry,
            })
        })
        .collect();

    Ok(ways)
}

/// Attaches random congestion (0-99 %) and speed (20-99 km/h) to each way.
pub fn to_segments<R: Rng + ?Sized>(ways: Vec<OsmWay>, rng: &mut R) -> Vec<RoadSegment> {
    ways.into_iter()
        .map(|way| RoadSegment {
            name: way.name,
            class: way.class,
            geometry: way.geometry,
            congestion: rng.random_range(0..100),
            speed_kmh: rng.random_range(20..100),
        })
        .collect()
}

/// The city's main roads, without geometry.
#[must_use]
pub fn simulated_roads(city: &CityDataset) -> Vec<RoadSegment> {
    city.traffic
        .main_roads
        .iter()
        .map(|road| RoadSegment {
            name: Some(road.road.clone()),
            class: RoadClass::Primary,
            geometry: Vec::new(),
            congestion: road.congestion,
            speed_kmh: road.average_speed,
        })
        .collect()
}

/// Builds the traffic layer for `city`, falling back to
/// [`simulated_roads`] if the Overpass query fails.
pub async fn load_traffic_layer(
    client: &reqwest::Client,
    base_url: &str,
    city: &CityDataset,
) -> TrafficLayer {
    match fetch_roads(client, base_url, city.center).await {
        Ok(ways) => {
            log::debug!("Overpass returned {} roads", ways.len());
            TrafficLayer {
                source: RoadSource::Overpass,
                roads: to_segments(ways, &mut rand::rng()),
            }
        }
        Err(e) => {
            log::warn!("Overpass query failed, using simulated roads: {e}");
            TrafficLayer {
                source: RoadSource::Simulated,
                roads: simulated_roads(city),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::resolve_city;

    #[test]
    fn query_covers_each_class_around_center() {
        let query = build_query(GeoPoint::new(-15.8267, -47.9218), SEARCH_RADIUS_M);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(
            query.contains("way[\"highway\"=\"motorway\"](around:20000, -15.8267, -47.9218);")
        );
        assert!(query.contains("\"trunk\""));
        assert!(query.contains("\"primary\""));
        assert!(query.trim_end().ends_with("out geom;"));
    }

    #[test]
    fn parses_ways_with_geometry() {
        let body = serde_json::json!({
            "elements": [
                {
                    "type": "way",
                    "tags": { "highway": "trunk", "name": "Eixo Rodoviário" },
                    "geometry": [
                        { "lat": -15.79, "lon": -47.88 },
                        { "lat": -15.78, "lon": -47.88 }
                    ]
                },
                {
                    "type": "way",
                    "tags": { "highway": "primary" }
                },
                {
                    "type": "way",
                    "tags": { "highway": "residential" },
                    "geometry": [{ "lat": -15.79, "lon": -47.88 }]
                },
                {
                    "type": "way",
                    "tags": { "highway": "motorway" },
                    "geometry": [{ "lat": -15.70, "lon": -47.90 }]
                }
            ]
        });
        let ways = parse_response(&body).unwrap();
        assert_eq!(ways.len(), 2);
        assert_eq!(ways[0].name.as_deref(), Some("Eixo Rodoviário"));
        assert_eq!(ways[0].class, RoadClass::Trunk);
        assert_eq!(ways[0].geometry.len(), 2);
        assert_eq!(ways[1].name, None);
        assert_eq!(ways[1].class, RoadClass::Motorway);
    }

    #[test]
    fn missing_elements_is_a_parse_error() {
        let body = serde_json::json!({ "remark": "runtime error" });
        assert!(matches!(
            parse_response(&body),
            Err(OverpassError::Parse { .. })
        ));
    }

    #[test]
    fn random_traffic_values_in_range() {
        let way = OsmWay {
            name: None,
            class: RoadClass::Primary,
            geometry: vec![GeoPoint::new(-15.79, -47.88)],
        };
        let mut rng = StdRng::seed_from_u64(5);
        let segments = to_segments(vec![way; 50], &mut rng);
        assert_eq!(segments.len(), 50);
        for s in &segments {
            assert!(s.congestion < 100);
            assert!((20..100).contains(&s.speed_kmh));
        }
    }

    #[test]
    fn simulated_roads_mirror_main_roads() {
        let city = resolve_city("Brasília").unwrap();
        let roads = simulated_roads(city);
        assert_eq!(roads.len(), 4);
        assert_eq!(roads[1].display_name(), "W3 Sul");
        assert_eq!(roads[1].congestion, 80);
        assert!(roads.iter().all(|r| r.geometry.is_empty()));
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back_to_simulated() {
        let city = resolve_city("Brasília").unwrap();
        let client = reqwest::Client::new();
        let layer = load_traffic_layer(&client, "http://127.0.0.1:9/interpreter", city).await;
        assert_eq!(layer.source, RoadSource::Simulated);
        assert_eq!(layer.roads.len(), 4);
    }
}
