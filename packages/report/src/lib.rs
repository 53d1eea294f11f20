#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! JSON report export.
//!
//! A dashboard report captures the city, a timestamp, the current
//! readouts as displayed, and the active layers. An area report wraps a
//! full area analysis. Both are written as pretty-printed JSON named
//! `<prefix>_<city>_<YYYY-MM-DD>.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use urban_map_analysis_models::AreaAnalysisResult;
use urban_map_dashboard::{DashboardState, MapLayer};

/// Placeholder for readouts that have not been loaded.
const MISSING: &str = "--";

/// Errors from writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Readouts as displayed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorSnapshot {
    #[serde(rename = "temperatura")]
    pub temperature: String,
    #[serde(rename = "qualidade_ar")]
    pub air_quality: String,
    #[serde(rename = "umidade")]
    pub humidity: String,
    #[serde(rename = "vento")]
    pub wind: String,
    #[serde(rename = "score_sustentabilidade")]
    pub sustainability_score: String,
}

/// Snapshot of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "data")]
    pub date: DateTime<Utc>,
    #[serde(rename = "indicadores")]
    pub indicators: IndicatorSnapshot,
    #[serde(rename = "camadas_ativas")]
    pub active_layers: Vec<MapLayer>,
}

impl DashboardReport {
    /// Captures `state` at `now`.
    #[must_use]
    pub fn capture(state: &DashboardState, now: DateTime<Utc>) -> Self {
        let readouts = state.readouts();
        let weather = readouts.weather.as_ref();

        Self {
            city: state.city().name.clone(),
            date: now,
            indicators: IndicatorSnapshot {
                temperature: weather
                    .map_or_else(|| MISSING.to_string(), |w| format!("{}°C", w.temperature)),
                air_quality: readouts
                    .air_quality
                    .map_or_else(|| MISSING.to_string(), |a| a.to_string()),
                humidity: weather.map_or_else(|| MISSING.to_string(), |w| format!("{}%", w.humidity)),
                wind: weather.map_or_else(|| MISSING.to_string(), |w| format!("{} km/h", w.wind)),
                sustainability_score: readouts.sustainability_score.to_string(),
            },
            active_layers: state.active_layers().iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn filename(&self) -> String {
        report_filename("relatorio", &self.city, self.date.date_naive())
    }
}

/// Export of one area analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "data")]
    pub date: DateTime<Utc>,
    #[serde(rename = "analise")]
    pub analysis: AreaAnalysisResult,
}

impl AreaReport {
    #[must_use]
    pub fn filename(&self) -> String {
        report_filename("analise", &self.city, self.date.date_naive())
    }
}

/// `<prefix>_<city-slug>_<YYYY-MM-DD>.json`.
#[must_use]
pub fn report_filename(prefix: &str, city: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}_{}.json", slug(city), date.format("%Y-%m-%d"))
}

/// Lowercase ASCII slug with Portuguese accents folded and every other
/// non-alphanumeric run replaced by `_`.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        let folded = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c if c.is_ascii_alphanumeric() => c,
            _ => '_',
        };
        if folded == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(folded);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Writes `report` as pretty JSON to `dir/filename`.
///
/// The file is written to a `.tmp` sibling first and renamed into place.
///
/// # Errors
///
/// * If the directory or file cannot be written
/// * If the report fails to serialize
pub fn write_report<T: Serialize>(
    dir: &Path,
    filename: &str,
    report: &T,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    let tmp_path = dir.join(format!("{filename}.tmp"));
    std::fs::write(&tmp_path, serde_json::to_string_pretty(report)?)?;
    std::fs::rename(&tmp_path, &path)?;
    log::info!("Wrote report to {}", path.display());
    Ok(path)
}
