//! Randomized live-style readouts.
//!
//! Stand-ins for a live weather and air-quality feed. The caller supplies
//! the random source.

use rand::Rng;
use urban_map_city_models::{AirQualityLabel, HeatPoint, PollutantReading, WeatherReport};
use urban_map_zone_models::GeoPoint;

use crate::CityDataset;

/// Weather readout with randomized temperature, humidity, wind, and
/// pressure around typical values.
pub fn sample_weather<R: Rng + ?Sized>(city: &CityDataset, rng: &mut R) -> WeatherReport {
    WeatherReport {
        city: city.name.clone(),
        temperature: f64::from(25 + rng.random_range(0..10_u8)),
        humidity: f64::from(40 + rng.random_range(0..40_u8)),
        pressure: f64::from(1010 + rng.random_range(0..20_u16)),
        wind: f64::from(5 + rng.random_range(0..15_u8)),
        description: "Parcialmente nublado".to_string(),
        coordinates: city.weather.coordinates,
    }
}

/// PM2.5 and PM10 readings with randomized values.
pub fn sample_pollution<R: Rng + ?Sized>(
    city: &CityDataset,
    rng: &mut R,
) -> Vec<PollutantReading> {
    let pm25 = f64::from(10 + rng.random_range(0..30_u8));
    let pm10 = f64::from(15 + rng.random_range(0..40_u8));

    city.pollutants
        .iter()
        .filter_map(|reading| {
            let value = match reading.parameter.as_str() {
                "pm25" => pm25,
                "pm10" => pm10,
                _ => return None,
            };
            Some(PollutantReading {
                value,
                ..reading.clone()
            })
        })
        .collect()
}

/// Number of points in a pollution heatmap.
pub const HEATMAP_POINTS: usize = 50;

/// South-west corner of the heatmap scatter area.
const HEATMAP_ORIGIN: GeoPoint = GeoPoint::new(-15.80, -47.90);

/// Side of the heatmap scatter square, in degrees.
const HEATMAP_SPAN_DEG: f64 = 0.1;

/// Random pollution heatmap points for the central area.
///
/// Empty when the city has no pollutant readings.
pub fn pollution_heatmap<R: Rng + ?Sized>(city: &CityDataset, rng: &mut R) -> Vec<HeatPoint> {
    if city.pollutants.is_empty() {
        return Vec::new();
    }

    (0..HEATMAP_POINTS)
        .map(|_| HeatPoint {
            coordinates: GeoPoint::new(
                HEATMAP_ORIGIN.latitude + rng.random_range(0.0..HEATMAP_SPAN_DEG),
                HEATMAP_ORIGIN.longitude + rng.random_range(0.0..HEATMAP_SPAN_DEG),
            ),
            intensity: rng.random_range(0.0..10.0),
        })
        .collect()
}

/// Air-quality label from the PM2.5 reading, if one is present.
#[must_use]
pub fn air_quality(readings: &[PollutantReading]) -> Option<AirQualityLabel> {
    readings
        .iter()
        .find(|r| r.parameter == "pm25")
        .map(|r| AirQualityLabel::from_pm25(r.value))
}
