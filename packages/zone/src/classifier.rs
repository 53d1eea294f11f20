//! Point-to-zone classification.
//!
//! Rules are evaluated in order and the first match wins. The rules are
//! neither mutually exclusive nor exhaustive: overlapping boxes resolve by
//! order, and a point matching no rule gets [`Zone::DEFAULT`] without any
//! error. [`Classification::rule_index`] is `None` in that case so callers
//! can tell a real match from the fallback.

use serde::Serialize;
use urban_map_zone_models::{GeoPoint, Zone, ZoneRule};

/// Outcome of classifying a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// The assigned zone.
    pub zone: Zone,
    /// Index of the matching rule, or `None` when the default was used.
    pub rule_index: Option<usize>,
}

impl Classification {
    /// Whether no rule matched and the default zone was assigned.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.rule_index.is_none()
    }
}

/// Classifies `point` against `rules`.
#[must_use]
pub fn classify(rules: &[ZoneRule], point: GeoPoint) -> Classification {
    if let Some((idx, rule)) = rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.test.matches(point))
    {
        return Classification {
            zone: rule.zone,
            rule_index: Some(idx),
        };
    }

    log::debug!(
        "No zone rule matched ({}, {}), using {}",
        point.latitude,
        point.longitude,
        Zone::DEFAULT
    );

    Classification {
        zone: Zone::DEFAULT,
        rule_index: None,
    }
}
