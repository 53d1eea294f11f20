#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the urban map dashboard.
//!
//! Serves the mocked city datasets, base-map tile sources, the zone table,
//! area analysis, the improvement simulator, and dashboard reports.

mod handlers;

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use urban_map_analysis::AreaAnalyzer;
use urban_map_city::overpass::DEFAULT_OVERPASS_URL;
use urban_map_zone::ZoneTable;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Shared application state.
pub struct AppState {
    /// Area-analysis pipeline over the embedded zone table.
    pub analyzer: AreaAnalyzer,
    /// HTTP client for the Overpass API.
    pub http: reqwest::Client,
    /// Overpass interpreter endpoint.
    pub overpass_url: String,
}

impl AppState {
    #[must_use]
    pub fn new(analyzer: AreaAnalyzer, overpass_url: impl Into<String>) -> Self {
        Self {
            analyzer,
            http: reqwest::Client::new(),
            overpass_url: overpass_url.into(),
        }
    }

    /// Builds state from the environment.
    ///
    /// * `URBAN_MAP_ANALYSIS_DELAY_MS`: simulated analysis latency (default 0)
    /// * `URBAN_MAP_OVERPASS_URL`: Overpass endpoint
    #[must_use]
    pub fn from_env() -> Self {
        let delay_ms: u64 = std::env::var("URBAN_MAP_ANALYSIS_DELAY_MS")
            .ok()
            .and_then(|d| d.parse().ok())
            .unwrap_or(0);
        let overpass_url = std::env::var("URBAN_MAP_OVERPASS_URL")
            .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string());

        let analyzer =
            AreaAnalyzer::new(ZoneTable::embedded()).with_delay(Duration::from_millis(delay_ms));

        Self::new(analyzer, overpass_url)
    }
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::home)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/cidades", web::get().to(handlers::cities))
            .route("/clima/{cidade}", web::get().to(handlers::weather))
            .route("/poluicao/{cidade}", web::get().to(handlers::pollution))
            .route(
                "/poluicao/{cidade}/heatmap",
                web::get().to(handlers::pollution_heatmap),
            )
            .route("/estacoes/{cidade}", web::get().to(handlers::stations))
            .route("/indicadores/{cidade}", web::get().to(handlers::indicators))
            .route("/transito/{cidade}", web::get().to(handlers::traffic))
            .route("/transito/{cidade}/vias", web::get().to(handlers::roads))
            .route("/temperatura/{cidade}", web::get().to(handlers::temperature))
            .route(
                "/temperatura/{cidade}/ilhas",
                web::get().to(handlers::heat_islands),
            )
            .route(
                "/recursos-naturais/{cidade}",
                web::get().to(handlers::natural_resources),
            )
            .route(
                "/saneamento-energia/{cidade}",
                web::get().to(handlers::sanitation_energy),
            )
            .route(
                "/feedback-populacao/{cidade}",
                web::get().to(handlers::population_feedback),
            )
            .route("/mapas/{tipo}", web::get().to(handlers::base_map))
            .route("/zonas", web::get().to(handlers::zones))
            .route("/analise-area", web::post().to(handlers::analyze_area))
            .route("/simulacao", web::post().to(handlers::simulate))
            .route("/relatorio/{cidade}", web::get().to(handlers::report)),
    );
}

/// Starts the HTTP server.
///
/// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `5000`).
///
/// # Errors
///
/// Returns an error if the server fails to bind or encounters a fatal
/// I/O error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_env());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
