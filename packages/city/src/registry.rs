//! Compile-time registry of city datasets.
//!
//! Each city is a TOML file under `data/`, embedded at compile time and
//! parsed on first access.

use std::sync::LazyLock;

use crate::CityDataset;

const BRASILIA_TOML: &str = include_str!("../data/brasilia.toml");

const CITY_TOMLS: &[&str] = &[BRASILIA_TOML];

static CITIES: LazyLock<Vec<CityDataset>> = LazyLock::new(|| {
    CITY_TOMLS
        .iter()
        .map(|toml_str| {
            CityDataset::from_toml(toml_str)
                .unwrap_or_else(|e| panic!("Embedded city dataset is invalid: {e}"))
        })
        .collect()
});

/// All embedded city datasets.
///
/// # Panics
///
/// Panics on first access if an embedded dataset fails to parse. The files
/// are compile-time constants, so this is caught by this crate's tests.
#[must_use]
pub fn cities() -> &'static [CityDataset] {
    &CITIES
}
