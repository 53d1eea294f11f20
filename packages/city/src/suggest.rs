//! City-name autocomplete.

/// Cities offered as search suggestions.
pub const KNOWN_CITIES: &[&str] = &[
    "Brasília",
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Salvador",
    "Curitiba",
    "Porto Alegre",
    "Recife",
    "Fortaleza",
    "Manaus",
    "Belém",
    "Goiânia",
    "Campinas",
    "São Luís",
    "Maceió",
    "João Pessoa",
    "Natal",
    "Teresina",
    "Cuiabá",
    "Florianópolis",
    "Vitória",
    "Porto Velho",
];

/// Known cities whose name contains `query`, case-insensitively, in list
/// order. An empty query yields no suggestions.
#[must_use]
pub fn suggest_cities(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    KNOWN_CITIES
        .iter()
        .filter(|city| city.to_lowercase().contains(&query))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_substrings_case_insensitively() {
        assert_eq!(suggest_cities("porto"), vec!["Porto Alegre", "Porto Velho"]);
        assert_eq!(suggest_cities("SÃO"), vec!["São Paulo", "São Luís"]);
        assert_eq!(suggest_cities("bras"), vec!["Brasília"]);
    }

    #[test]
    fn empty_query_suggests_nothing() {
        assert!(suggest_cities("").is_empty());
    }

    #[test]
    fn accents_are_significant() {
        assert!(suggest_cities("brasilia").is_empty());
    }

    #[test]
    fn list_has_22_cities() {
        assert_eq!(KNOWN_CITIES.len(), 22);
    }
}
