#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone table and zone classification.
//!
//! The zone table maps each named [`Zone`] to its nine-indicator
//! [`ZoneProfile`] and carries the ordered bounding-box rules used to
//! assign a point to a zone. The table is embedded at compile time as TOML
//! (see [`registry`]) and validated when loaded.

pub mod classifier;
pub mod registry;

use std::collections::BTreeMap;

use thiserror::Error;
use urban_map_zone_models::{
    GeoPoint, Indicator, RegionInfo, Zone, ZoneProfile, ZoneRule, ZoneTableDefinition,
};

pub use classifier::Classification;

/// Errors that can occur while loading a zone table.
#[derive(Debug, Error)]
pub enum ZoneTableError {
    /// The TOML definition could not be parsed.
    #[error("Failed to parse zone table: {0}")]
    Parse(#[from] toml::de::Error),

    /// An indicator value is outside `[0, 100]`.
    #[error("Zone {zone} has {indicator} = {value}, expected 0-100")]
    IndicatorOutOfRange {
        /// Offending zone.
        zone: Zone,
        /// Offending indicator.
        indicator: Indicator,
        /// The out-of-range value.
        value: u8,
    },

    /// A zone is listed twice.
    #[error("Zone {0} is defined more than once")]
    DuplicateZone(Zone),

    /// A zone referenced by a rule (or the default zone) has no profile.
    #[error("Zone {0} has no indicator profile")]
    MissingProfile(Zone),

    /// The table has no classification rules.
    #[error("Zone table defines no classification rules")]
    NoRules,
}

/// A validated, immutable zone table.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    region: RegionInfo,
    profiles: BTreeMap<Zone, ZoneProfile>,
    rules: Vec<ZoneRule>,
}

impl ZoneTable {
    /// Parses and validates a zone table from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneTableError`] if the TOML is malformed, a profile value
    /// is out of range, a zone is duplicated, a rule or the default zone
    /// has no profile, or no rules are defined.
    pub fn from_toml(toml_str: &str) -> Result<Self, ZoneTableError> {
        let definition: ZoneTableDefinition = toml::de::from_str(toml_str)?;
        Self::from_definition(definition)
    }

    /// Validates an already-parsed definition.
    ///
    /// # Errors
    ///
    /// See [`Self::from_toml`].
    pub fn from_definition(definition: ZoneTableDefinition) -> Result<Self, ZoneTableError> {
        let mut profiles = BTreeMap::new();
        for entry in definition.zones {
            if let Some((indicator, value)) = entry.profile.first_out_of_range() {
                return Err(ZoneTableError::IndicatorOutOfRange {
                    zone: entry.zone,
                    indicator,
                    value,
                });
            }
            if profiles.insert(entry.zone, entry.profile).is_some() {
                return Err(ZoneTableError::DuplicateZone(entry.zone));
            }
        }

        if definition.rules.is_empty() {
            return Err(ZoneTableError::NoRules);
        }

        let referenced = definition
            .rules
            .iter()
            .map(|rule| rule.zone)
            .chain(std::iter::once(Zone::DEFAULT));
        for zone in referenced {
            if !profiles.contains_key(&zone) {
                return Err(ZoneTableError::MissingProfile(zone));
            }
        }

        Ok(Self {
            region: definition.region,
            profiles,
            rules: definition.rules,
        })
    }

    /// Loads the compile-time embedded Brasília table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse or validate. Since it is
    /// a compile-time constant, a failure indicates a development error and
    /// is caught by this crate's tests.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml(registry::BRASILIA_TOML)
            .unwrap_or_else(|e| panic!("Embedded zone table is invalid: {e}"))
    }

    /// Region metadata.
    #[must_use]
    pub const fn region(&self) -> &RegionInfo {
        &self.region
    }

    /// Returns the profile of `zone`, if the table defines one.
    #[must_use]
    pub fn profile(&self, zone: Zone) -> Option<&ZoneProfile> {
        self.profiles.get(&zone)
    }

    /// Returns the profile of `zone`, falling back to the default zone's
    /// profile when the table has none.
    #[must_use]
    pub fn profile_or_default(&self, zone: Zone) -> &ZoneProfile {
        self.profiles
            .get(&zone)
            .or_else(|| self.profiles.get(&Zone::DEFAULT))
            .unwrap_or_else(|| unreachable!("default zone profile is checked on load"))
    }

    /// Zones with a profile, in [`Zone`] order.
    pub fn zones(&self) -> impl Iterator<Item = (Zone, &ZoneProfile)> {
        self.profiles.iter().map(|(zone, profile)| (*zone, profile))
    }

    /// The ordered classification rules.
    #[must_use]
    pub fn rules(&self) -> &[ZoneRule] {
        &self.rules
    }

    /// Classifies a point into a zone. See [`classifier::classify`].
    #[must_use]
    pub fn classify(&self, point: GeoPoint) -> Zone {
        classifier::classify(&self.rules, point).zone
    }

    /// Classifies a point and reports which rule matched.
    #[must_use]
    pub fn classify_detailed(&self, point: GeoPoint) -> Classification {
        classifier::classify(&self.rules, point)
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::embedded()
    }
}
