#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard application state.
//!
//! [`DashboardState`] owns everything the dashboard mutates: the selected
//! city, the active map layers, the base map, the theme, the latest
//! readouts, and the area-analysis session. All changes go through its
//! methods.

pub mod layers;
pub mod preferences;

use std::collections::BTreeSet;

use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use urban_map_analysis::session::AnalysisSession;
use urban_map_analysis::simulation;
use urban_map_analysis_models::{
    Notification, NotificationLevel, SimulationOutcome, SimulationParams,
};
use urban_map_city::{CityDataset, CityError, resolve_city, sample};
use urban_map_city_models::{AirQualityLabel, HeatPoint, WeatherReport};

pub use layers::{BaseMap, LayerPlan, MapLayer};
pub use preferences::{Preferences, PreferencesError};

/// City-wide sustainability score shown before any simulation.
pub const BASELINE_SUSTAINABILITY_SCORE: u8 = 72;

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum Theme {
    #[default]
    #[strum(serialize = "Modo Claro")]
    Light,
    #[strum(serialize = "Modo Escuro")]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Latest indicator readouts shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readouts {
    pub weather: Option<WeatherReport>,
    pub air_quality: Option<AirQualityLabel>,
    /// Pollution heatmap, filled while the heatmap layer is active.
    pub heatmap: Vec<HeatPoint>,
    pub sustainability_score: u8,
}

impl Default for Readouts {
    fn default() -> Self {
        Self {
            weather: None,
            air_quality: None,
            heatmap: Vec::new(),
            sustainability_score: BASELINE_SUSTAINABILITY_SCORE,
        }
    }
}

/// Explicit dashboard state.
#[derive(Debug)]
pub struct DashboardState {
    city: &'static CityDataset,
    active_layers: BTreeSet<MapLayer>,
    base_map: BaseMap,
    theme: Theme,
    readouts: Readouts,
    session: AnalysisSession,
    notifications: Vec<Notification>,
}

impl DashboardState {
    /// Creates a state for the preferred city and theme.
    ///
    /// # Errors
    ///
    /// * If the preferred city has no dataset
    pub fn new(preferences: &Preferences) -> Result<Self, CityError> {
        Ok(Self {
            city: resolve_city(&preferences.city)?,
            active_layers: MapLayer::defaults(),
            base_map: BaseMap::default(),
            theme: Theme::from_dark_flag(preferences.dark_theme),
            readouts: Readouts::default(),
            session: AnalysisSession::new(),
            notifications: Vec::new(),
        })
    }

    #[must_use]
    pub const fn city(&self) -> &'static CityDataset {
        self.city
    }

    #[must_use]
    pub const fn active_layers(&self) -> &BTreeSet<MapLayer> {
        &self.active_layers
    }

    #[must_use]
    pub const fn base_map(&self) -> BaseMap {
        self.base_map
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub const fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    #[must_use]
    pub const fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut AnalysisSession {
        &mut self.session
    }

    /// Takes the pending dashboard notifications, oldest first.
    ///
    /// Analysis notifications stay on the session.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// What the map and sidebar currently show.
    #[must_use]
    pub fn plan(&self) -> LayerPlan {
        LayerPlan::new(&self.active_layers, self.base_map)
    }

    /// Toggles `layer` and returns whether it is now active.
    pub fn toggle_layer(&mut self, layer: MapLayer) -> bool {
        let active = if self.active_layers.remove(&layer) {
            false
        } else {
            self.active_layers.insert(layer);
            true
        };
        log::debug!("Layer {layer} {}", if active { "on" } else { "off" });
        active
    }

    /// Switches the base map by name; unknown names select the default.
    pub fn set_base_map(&mut self, name: &str) -> BaseMap {
        self.base_map = BaseMap::parse_or_default(name);
        self.base_map
    }

    /// Switches to another city.
    ///
    /// # Errors
    ///
    /// * If the city has no dataset; the current city is kept and a
    ///   warning is queued
    pub fn set_city(&mut self, name: &str) -> Result<&'static CityDataset, CityError> {
        match resolve_city(name) {
            Ok(city) => {
                self.city = city;
                self.readouts = Readouts::default();
                Ok(city)
            }
            Err(e) => {
                self.notify(NotificationLevel::Warning, e.to_string());
                Err(e)
            }
        }
    }

    pub const fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Refreshes weather and air quality with fresh randomized readings,
    /// and the pollution heatmap when that layer is active.
    pub fn refresh_readouts<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        let weather = sample::sample_weather(self.city, rng);
        let pollution = sample::sample_pollution(self.city, rng);
        self.readouts.air_quality = sample::air_quality(&pollution);
        self.readouts.weather = Some(weather);
        self.readouts.heatmap = if self.active_layers.contains(&MapLayer::Heatmap) {
            sample::pollution_heatmap(self.city, rng)
        } else {
            Vec::new()
        };
        self.notify(NotificationLevel::Success, "Dados atualizados com sucesso!");
    }

    /// Runs an improvement simulation and updates the displayed score.
    pub fn apply_simulation(&mut self, params: &SimulationParams) -> SimulationOutcome {
        let outcome = simulation::simulate(params);
        self.readouts.sustainability_score = outcome.city_score;
        self.notify(
            NotificationLevel::Success,
            "Simulação concluída! Score atualizado.",
        );
        outcome
    }

    /// Preferences reflecting the current state.
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        Preferences {
            dark_theme: self.theme.is_dark(),
            city: self.city.name.clone(),
        }
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use urban_map_analysis_models::AnalysisPhase;

    fn state() -> DashboardState {
        DashboardState::new(&Preferences::default()).unwrap()
    }

    #[test]
    fn starts_with_default_layers() {
        let state = state();
        assert_eq!(state.active_layers(), &MapLayer::defaults());
        assert_eq!(state.base_map(), BaseMap::Padrao);
        assert_eq!(state.theme(), Theme::Light);
        assert_eq!(state.readouts().sustainability_score, 72);
        assert_eq!(state.session().phase(), AnalysisPhase::Idle);
    }

    #[test]
    fn toggling_layers() {
        let mut state = state();
        assert!(state.toggle_layer(MapLayer::Transito));
        assert!(state.plan().load.contains(&MapLayer::Transito));
        assert!(!state.toggle_layer(MapLayer::Clima));
        assert!(!state.active_layers().contains(&MapLayer::Clima));
    }

    #[test]
    fn unknown_city_keeps_current() {
        let mut state = state();
        assert!(state.set_city("Recife").is_err());
        assert_eq!(state.city().name, "Brasília");

        let notes = state.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Warning);
        assert!(notes[0].message.contains("Recife"), "{}", notes[0].message);
        assert!(state.drain_notifications().is_empty());
    }

    #[test]
    fn known_city_is_silent() {
        let mut state = state();
        assert!(state.set_city(" brasilia ").is_ok());
        assert!(state.drain_notifications().is_empty());
    }

    #[test]
    fn simulation_updates_score() {
        let mut state = state();
        let outcome = state.apply_simulation(&SimulationParams {
            green_areas: 100.0,
            public_transport: 100.0,
            pollution_reduction: 100.0,
        });
        assert_eq!(outcome.city_score, 100);
        assert_eq!(state.readouts().sustainability_score, 100);
        assert_eq!(
            state.drain_notifications(),
            vec![Notification::new(
                NotificationLevel::Success,
                "Simulação concluída! Score atualizado."
            )]
        );
    }

    #[test]
    fn refresh_fills_readouts() {
        let mut state = state();
        state.refresh_readouts(&mut StdRng::seed_from_u64(9));
        assert!(state.readouts().weather.is_some());
        assert!(state.readouts().air_quality.is_some());
        assert!(state.readouts().heatmap.is_empty());

        state.toggle_layer(MapLayer::Heatmap);
        state.refresh_readouts(&mut StdRng::seed_from_u64(9));
        assert_eq!(state.readouts().heatmap.len(), sample::HEATMAP_POINTS);
    }

    #[test]
    fn preferences_follow_theme() {
        let mut state = state();
        state.set_theme(Theme::Dark);
        let prefs = state.preferences();
        assert!(prefs.dark_theme);
        assert_eq!(Theme::Dark.to_string(), "Modo Escuro");
    }

    #[test]
    fn analysis_mode_through_state() {
        let mut state = state();
        state.session_mut().toggle_mode();
        assert_eq!(state.session().phase(), AnalysisPhase::Drawing);
    }
}
