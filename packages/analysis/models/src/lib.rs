#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Area analysis result types.
//!
//! These types describe the outcome of analysing a user-drawn area: the
//! sustainability score and its qualitative label, the per-indicator
//! breakdown, recommendations, environmental impact projections, trend
//! labels, and the synthetic resident feedback shown alongside them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use urban_map_zone_models::{GeoPoint, Indicator, Zone, ZoneProfile};

/// Qualitative label for a sustainability score.
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
pub enum SustainabilityClass {
    /// Score ≥ 90.
    #[strum(serialize = "Excelente")]
    Excellent,
    /// Score ≥ 80.
    #[strum(serialize = "Muito Boa")]
    VeryGood,
    /// Score ≥ 70.
    #[strum(serialize = "Boa")]
    Good,
    /// Score ≥ 60.
    #[strum(serialize = "Regular")]
    Fair,
    /// Score ≥ 50.
    #[strum(serialize = "Precária")]
    Poor,
    /// Score < 50.
    #[strum(serialize = "Crítica")]
    Critical,
}

impl SustainabilityClass {
    /// Maps a 0-100 score to its label.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::VeryGood,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            50..=59 => Self::Poor,
            _ => Self::Critical,
        }
    }
}

/// Status of a single indicator after polarity is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum IndicatorStatus {
    /// Effective value ≥ 80.
    #[strum(serialize = "Excelente")]
    Excellent,
    /// Effective value ≥ 70.
    #[strum(serialize = "Bom")]
    Good,
    /// Effective value ≥ 60.
    #[strum(serialize = "Regular")]
    Fair,
    /// Effective value ≥ 50.
    #[strum(serialize = "Precário")]
    Poor,
    /// Effective value < 50.
    #[strum(serialize = "Crítico")]
    Critical,
}

impl IndicatorStatus {
    /// Maps an effective (higher-is-better) value to a status.
    #[must_use]
    pub const fn from_effective_value(value: u8) -> Self {
        match value {
            80.. => Self::Excellent,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            50..=59 => Self::Poor,
            _ => Self::Critical,
        }
    }
}

/// One row of the indicator breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReading {
    /// The indicator.
    pub indicator: Indicator,
    /// Display name.
    pub name: String,
    /// Raw 0-100 value.
    pub value: u8,
    /// Status after polarity is applied.
    pub status: IndicatorStatus,
}

/// Expected biodiversity level derived from green-area coverage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum BiodiversityLevel {
    /// Green areas above 50 %.
    #[strum(serialize = "Alta")]
    High,
    /// Green areas above 30 %.
    #[strum(serialize = "Média")]
    Medium,
    /// Everything else.
    #[strum(serialize = "Baixa")]
    Low,
}

/// Arithmetic projections for an analysed area.
///
/// Quantities are rounded to whole numbers but kept as `f64` so that
/// non-finite areas propagate instead of being clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    /// Estimated annual CO₂ in tons.
    pub carbon_tons: f64,
    /// Potable water demand in litres per day.
    pub water_liters_per_day: f64,
    /// Solid waste in tons per day.
    pub waste_tons_per_day: f64,
    /// Biodiversity level.
    pub biodiversity: BiodiversityLevel,
}

/// Direction of green-area development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum GreenTrend {
    /// Green areas above 60 %.
    #[strum(serialize = "Positiva")]
    Positive,
    /// Otherwise.
    #[strum(serialize = "Estável")]
    Stable,
}

/// Mobility assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum MobilityTrend {
    /// Transit accessibility above 75.
    #[strum(serialize = "Eficiente")]
    Efficient,
    /// Otherwise.
    #[strum(serialize = "Necessita melhorias")]
    NeedsImprovement,
}

/// Quality-of-life assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum QualityOfLife {
    /// Air quality above 70 and noise below 60.
    #[strum(serialize = "Alta")]
    High,
    /// Otherwise.
    #[strum(serialize = "Média")]
    Medium,
}

/// Trend labels for an analysed area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    /// Green-area trend.
    pub green: GreenTrend,
    /// Mobility.
    pub mobility: MobilityTrend,
    /// Quality of life.
    pub quality_of_life: QualityOfLife,
}

/// Geographic metadata for an analysed area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicData {
    /// Latitude formatted with six decimals.
    pub latitude: String,
    /// Longitude formatted with six decimals.
    pub longitude: String,
    /// Altitude label.
    pub altitude: String,
    /// Climate classification.
    pub climate: String,
    /// Biome.
    pub biome: String,
}

/// Resident feedback category.
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
pub enum FeedbackCategory {
    /// Public transport and traffic.
    #[serde(rename = "Transporte")]
    #[strum(serialize = "Transporte")]
    Transport,
    /// Public safety.
    #[serde(rename = "Segurança")]
    #[strum(serialize = "Segurança")]
    Safety,
    /// Environment.
    #[serde(rename = "Meio Ambiente")]
    #[strum(serialize = "Meio Ambiente")]
    Environment,
    /// Infrastructure.
    #[serde(rename = "Infraestrutura")]
    #[strum(serialize = "Infraestrutura")]
    Infrastructure,
    /// Leisure.
    #[serde(rename = "Lazer")]
    #[strum(serialize = "Lazer")]
    Leisure,
}

impl FeedbackCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Transport,
            Self::Safety,
            Self::Environment,
            Self::Infrastructure,
            Self::Leisure,
        ]
    }
}

/// Sentiment derived from a 1-5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sentiment {
    /// Rating ≥ 4.
    Positive,
    /// Rating = 3.
    Neutral,
    /// Rating ≤ 2.
    Negative,
}

impl Sentiment {
    /// Derives a sentiment from a rating.
    #[must_use]
    pub const fn from_rating(rating: u8) -> Self {
        match rating {
            4.. => Self::Positive,
            3 => Self::Neutral,
            _ => Self::Negative,
        }
    }
}

/// A synthetic resident comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackComment {
    /// Author display name.
    pub author: String,
    /// Category.
    pub category: FeedbackCategory,
    /// Comment body.
    pub text: String,
    /// 1-5 star rating.
    pub rating: u8,
    /// Sentiment derived from the rating.
    pub sentiment: Sentiment,
    /// Date as `dd/mm/YYYY`.
    pub date: String,
}

/// Aggregate for one feedback category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    /// Average rating × 20, or a random placeholder when `count` is 0.
    pub score: u8,
    /// Number of comments in the category.
    pub count: usize,
}

/// A batch of synthetic resident feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticFeedback {
    /// Percentage of positive ratings, 0-100.
    pub satisfaction: u8,
    /// Number of comments in the batch.
    pub total_feedbacks: usize,
    /// Number of ratings ≥ 4.
    pub positive_count: usize,
    /// All generated comments.
    pub comments: Vec<FeedbackComment>,
    /// Per-category aggregates; every category is present.
    pub categories: BTreeMap<FeedbackCategory, CategoryStat>,
}

/// Result of analysing a drawn area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAnalysisResult {
    /// Zone of the area's centroid.
    pub zone: Zone,
    /// Area in km².
    pub area_km2: f64,
    /// Centroid of the area.
    pub center: GeoPoint,
    /// Sustainability score, 0-100.
    pub score: u8,
    /// Qualitative label for `score`.
    pub classification: SustainabilityClass,
    /// The zone's indicator profile.
    pub indicators: ZoneProfile,
    /// Per-indicator status.
    pub breakdown: Vec<IndicatorReading>,
    /// One to five recommendations.
    pub recommendations: Vec<String>,
    /// Environmental impact projections.
    pub environmental_impact: EnvironmentalImpact,
    /// Trend labels.
    pub trends: Trends,
    /// Geographic metadata.
    pub geographic_data: GeographicData,
    /// Synthetic resident feedback, attached by the orchestrator.
    pub feedback: Option<SyntheticFeedback>,
}

/// Phase of the area-analysis workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisPhase {
    /// Analysis mode off.
    Idle,
    /// Drawing tool active, waiting for a shape.
    Drawing,
    /// A shape is being analysed.
    Analyzing,
    /// The result panel is open.
    Displayed,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationLevel {
    /// Informational.
    Info,
    /// Operation succeeded.
    Success,
    /// Recoverable problem with user input.
    Warning,
    /// Operation failed.
    Error,
}

/// A user-facing notification (toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Message shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Inputs of the improvement simulator, each a 0-100 percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Increase in green areas.
    pub green_areas: f64,
    /// Public transport improvement.
    pub public_transport: f64,
    /// Pollution reduction.
    pub pollution_reduction: f64,
}

/// Projected outcome of an improvement simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    /// Projected air quality index, capped at 100.
    pub air_quality: f64,
    /// Projected sustainability index, capped at 100.
    pub sustainability: f64,
    /// Rounded air-quality gain over its baseline.
    pub air_quality_gain: i32,
    /// Rounded sustainability gain over its baseline.
    pub sustainability_gain: i32,
    /// City-wide sustainability score after the simulated changes.
    pub city_score: u8,
}
