//! Compile-time registry of zone tables.
//!
//! Each table is a TOML file in `zones/` embedded via `include_str!`.

/// The Brasília zone table.
pub const BRASILIA_TOML: &str = include_str!("../zones/brasilia.toml");

/// Embedded zone tables keyed by region identifier.
pub const ZONE_TOMLS: &[(&str, &str)] = &[("brasilia", BRASILIA_TOML)];

/// Looks up an embedded zone table by region identifier.
#[must_use]
pub fn find(region: &str) -> Option<&'static str> {
    ZONE_TOMLS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(region))
        .map(|(_, toml_str)| *toml_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZoneTable;

    #[test]
    fn all_embedded_tables_parse() {
        for (id, toml_str) in ZONE_TOMLS {
            assert!(
                ZoneTable::from_toml(toml_str).is_ok(),
                "Embedded zone table '{id}' failed to load"
            );
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert!(find("Brasilia").is_some());
        assert!(find("recife").is_none());
    }
}
