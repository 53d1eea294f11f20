//! Map overlays, base maps, and what each combination displays.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A toggleable map overlay.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MapLayer {
    /// Weather marker.
    Clima,
    /// Monitoring stations.
    Estacoes,
    /// Pollution heatmap.
    Heatmap,
    /// Major-road traffic.
    Transito,
    /// Heat islands.
    Temperatura,
    /// Resident feedback panel.
    Feedback,
}

impl MapLayer {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Clima,
            Self::Estacoes,
            Self::Heatmap,
            Self::Transito,
            Self::Temperatura,
            Self::Feedback,
        ]
    }

    /// Layers active when the dashboard opens.
    #[must_use]
    pub fn defaults() -> BTreeSet<Self> {
        BTreeSet::from([Self::Clima, Self::Estacoes])
    }

    /// Whether this layer draws data on the map (as opposed to the sidebar).
    #[must_use]
    pub const fn draws_on_map(self) -> bool {
        !matches!(self, Self::Feedback)
    }
}

/// A base tile layer.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BaseMap {
    /// `OpenStreetMap` standard tiles.
    #[default]
    Padrao,
    /// Esri World Imagery.
    Satelite,
    /// `OpenTopoMap`.
    Terreno,
    /// `OpenStreetMap` tiles with the traffic legend.
    Transito,
}

/// Tile URL template and attribution of a base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSource {
    pub url: &'static str,
    pub attribution: &'static str,
}

impl BaseMap {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Padrao, Self::Satelite, Self::Terreno, Self::Transito]
    }

    /// Parses a base-map name, falling back to [`BaseMap::Padrao`] for
    /// unknown names.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.trim().to_lowercase().parse().unwrap_or_else(|_| {
            log::debug!("Unknown base map '{name}', using padrao");
            Self::default()
        })
    }

    #[must_use]
    pub const fn tiles(self) -> TileSource {
        match self {
            Self::Padrao | Self::Transito => TileSource {
                url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                attribution: "OpenStreetMap",
            },
            Self::Satelite => TileSource {
                url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                attribution: "Esri",
            },
            Self::Terreno => TileSource {
                url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
                attribution: "OpenTopoMap",
            },
        }
    }
}

/// A map legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Legend {
    /// Pollution heatmap gradient.
    Pollution,
    /// Road congestion colors.
    Traffic,
    /// Heat-island bands.
    Heat,
}

/// A sidebar section that follows a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SidebarSection {
    Traffic,
    Feedback,
}

/// What the map and sidebar show for a set of active layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPlan {
    /// Map layers whose data must be (re)loaded, in drawing order.
    pub load: Vec<MapLayer>,
    pub legends: BTreeSet<Legend>,
    pub sidebar: BTreeSet<SidebarSection>,
}

impl LayerPlan {
    /// Derives the plan for `active` layers over `base_map`.
    ///
    /// The traffic legend shows when either the traffic layer or the
    /// traffic base map is active.
    #[must_use]
    pub fn new(active: &BTreeSet<MapLayer>, base_map: BaseMap) -> Self {
        let load = MapLayer::all()
            .iter()
            .copied()
            .filter(|l| l.draws_on_map() && active.contains(l))
            .collect();

        let mut legends = BTreeSet::new();
        if active.contains(&MapLayer::Heatmap) {
            legends.insert(Legend::Pollution);
        }
        if active.contains(&MapLayer::Transito) || base_map == BaseMap::Transito {
            legends.insert(Legend::Traffic);
        }
        if active.contains(&MapLayer::Temperatura) {
            legends.insert(Legend::Heat);
        }

        let mut sidebar = BTreeSet::new();
        if active.contains(&MapLayer::Transito) {
            sidebar.insert(SidebarSection::Traffic);
        }
        if active.contains(&MapLayer::Feedback) {
            sidebar.insert(SidebarSection::Feedback);
        }

        Self {
            load,
            legends,
            sidebar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_loads_weather_and_stations() {
        let plan = LayerPlan::new(&MapLayer::defaults(), BaseMap::Padrao);
        assert_eq!(plan.load, vec![MapLayer::Clima, MapLayer::Estacoes]);
        assert!(plan.legends.is_empty());
        assert!(plan.sidebar.is_empty());
    }

    #[test]
    fn all_layers_plan() {
        let active: BTreeSet<_> = MapLayer::all().iter().copied().collect();
        let plan = LayerPlan::new(&active, BaseMap::Satelite);
        assert_eq!(plan.load.len(), 5);
        assert!(!plan.load.contains(&MapLayer::Feedback));
        assert_eq!(
            plan.legends,
            BTreeSet::from([Legend::Pollution, Legend::Traffic, Legend::Heat])
        );
        assert_eq!(
            plan.sidebar,
            BTreeSet::from([SidebarSection::Traffic, SidebarSection::Feedback])
        );
    }

    #[test]
    fn traffic_base_map_shows_traffic_legend() {
        let plan = LayerPlan::new(&BTreeSet::new(), BaseMap::Transito);
        assert_eq!(plan.legends, BTreeSet::from([Legend::Traffic]));
        assert!(plan.sidebar.is_empty());
    }

    #[test]
    fn base_map_parsing() {
        assert_eq!(BaseMap::parse_or_default("satelite"), BaseMap::Satelite);
        assert_eq!(BaseMap::parse_or_default(" Terreno "), BaseMap::Terreno);
        assert_eq!(BaseMap::parse_or_default("aquarela"), BaseMap::Padrao);
        assert_eq!(BaseMap::Satelite.tiles().attribution, "Esri");
        assert!(BaseMap::Terreno.tiles().url.contains("opentopomap"));
    }

    #[test]
    fn layer_names() {
        assert_eq!(MapLayer::Estacoes.to_string(), "estacoes");
        assert_eq!("temperatura".parse::<MapLayer>().unwrap(), MapLayer::Temperatura);
        assert_eq!(
            serde_json::to_string(&MapLayer::Transito).unwrap(),
            "\"transito\""
        );
    }
}
