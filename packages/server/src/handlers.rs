//! HTTP handler functions for the urban map API.

use actix_web::{HttpResponse, http::header, web};
use serde::Serialize;
use urban_map_analysis::{score, simulation};
use urban_map_analysis_models::SimulationParams;
use urban_map_city::{CityDataset, CityError, overpass, resolve_city, suggest};
use urban_map_dashboard::{BaseMap, DashboardState, Preferences};
use urban_map_report::DashboardReport;
use urban_map_server_models::{
    AnalyzeAreaRequest, ApiHealth, ApiStatus, CitySuggestions, SuggestQuery, ZoneSummary,
};

use crate::AppState;

/// `GET /`
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus {
        message: "API do Simulador Urbano".to_string(),
        status: "online".to_string(),
    })
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/cidades?q=`
pub async fn cities(query: web::Query<SuggestQuery>) -> HttpResponse {
    let query = query.into_inner().q;
    let cities = suggest::suggest_cities(&query)
        .into_iter()
        .map(String::from)
        .collect();
    HttpResponse::Ok().json(CitySuggestions { query, cities })
}

/// Resolves the `{cidade}` path segment and renders `f(city)` as JSON.
fn with_city<T: Serialize>(
    cidade: &str,
    f: impl FnOnce(&'static CityDataset) -> T,
) -> HttpResponse {
    match resolve_city(cidade) {
        Ok(city) => HttpResponse::Ok().json(f(city)),
        Err(e) => city_error(&e),
    }
}

fn city_error(e: &CityError) -> HttpResponse {
    match e {
        CityError::NotAvailable(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        })),
        CityError::Parse(_) => {
            log::error!("City dataset error: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load city data"
            }))
        }
    }
}

/// `GET /api/clima/{cidade}`
pub async fn weather(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.weather.clone())
}

/// `GET /api/poluicao/{cidade}`
pub async fn pollution(path: web::Path<String>) -> HttpResponse {
    with_city(&path, CityDataset::pollution)
}

/// `GET /api/poluicao/{cidade}/heatmap`
///
/// Randomized heatmap points; empty when the city has no pollutant data.
pub async fn pollution_heatmap(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| {
        urban_map_city::sample::pollution_heatmap(city, &mut rand::rng())
    })
}

/// `GET /api/estacoes/{cidade}`
pub async fn stations(path: web::Path<String>) -> HttpResponse {
    with_city(&path, CityDataset::stations_report)
}

/// `GET /api/indicadores/{cidade}`
pub async fn indicators(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.indicators.clone())
}

/// `GET /api/transito/{cidade}`
///
/// Congestion summary and main-road table.
pub async fn traffic(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.traffic_report(chrono::Utc::now()))
}

/// `GET /api/transito/{cidade}/vias`
///
/// Major-road geometry from Overpass, or the simulated main roads when the
/// query fails.
pub async fn roads(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match resolve_city(&path) {
        Ok(city) => {
            let layer = overpass::load_traffic_layer(&state.http, &state.overpass_url, city).await;
            HttpResponse::Ok().json(layer)
        }
        Err(e) => city_error(&e),
    }
}

/// `GET /api/temperatura/{cidade}`
pub async fn temperature(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.heat_islands.clone())
}

/// `GET /api/temperatura/{cidade}/ilhas`
///
/// Located heat islands for the temperature layer.
pub async fn heat_islands(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.heat_island_points.clone())
}

/// `GET /api/recursos-naturais/{cidade}`
pub async fn natural_resources(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.natural_resources.clone())
}

/// `GET /api/saneamento-energia/{cidade}`
pub async fn sanitation_energy(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.sanitation_energy.clone())
}

/// `GET /api/feedback-populacao/{cidade}`
pub async fn population_feedback(path: web::Path<String>) -> HttpResponse {
    with_city(&path, |city| city.population_feedback.clone())
}

/// `GET /api/mapas/{tipo}`
///
/// Unknown map types return the default tiles.
pub async fn base_map(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(BaseMap::parse_or_default(&path).tiles())
}

/// `GET /api/zonas`
pub async fn zones(state: web::Data<AppState>) -> HttpResponse {
    let zones: Vec<ZoneSummary> = state
        .analyzer
        .table()
        .zones()
        .map(|(zone, profile)| {
            let score = score::sustainability_score(profile);
            ZoneSummary {
                zone,
                score,
                classification: score::classify_score(score),
                profile: *profile,
                breakdown: score::breakdown(profile),
            }
        })
        .collect();

    HttpResponse::Ok().json(zones)
}

/// `POST /api/analise-area`
pub async fn analyze_area(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeAreaRequest>,
) -> HttpResponse {
    let shape = match body.to_shape() {
        Ok(shape) => shape,
        Err(e) => {
            log::debug!("Rejected area request: {e}");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    match state.analyzer.analyze(&shape).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("Area analysis failed: {e}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

/// `POST /api/simulacao`
pub async fn simulate(body: web::Json<SimulationParams>) -> HttpResponse {
    HttpResponse::Ok().json(simulation::simulate(&body))
}

/// `GET /api/relatorio/{cidade}`
///
/// Dashboard report with freshly sampled readouts, served as an attachment.
pub async fn report(path: web::Path<String>) -> HttpResponse {
    let preferences = Preferences {
        city: path.into_inner(),
        ..Preferences::default()
    };

    let mut dashboard = match DashboardState::new(&preferences) {
        Ok(dashboard) => dashboard,
        Err(e) => return city_error(&e),
    };
    dashboard.refresh_readouts(&mut rand::rng());

    let report = DashboardReport::capture(&dashboard, chrono::Utc::now());
    HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename()),
        ))
        .json(report)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use urban_map_analysis::AreaAnalyzer;
    use urban_map_zone::ZoneTable;

    use crate::{AppState, configure};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(
            AreaAnalyzer::new(ZoneTable::embedded()),
            "http://127.0.0.1:9/interpreter",
        ))
    }

    async fn get_json(uri: &str) -> (u16, serde_json::Value) {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    async fn post_json(uri: &str, body: &serde_json::Value) -> (u16, serde_json::Value) {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn home_reports_online() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "online");
    }

    #[actix_web::test]
    async fn health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["healthy"], true);
    }

    #[actix_web::test]
    async fn weather_for_brasilia() {
        let (status, body) = get_json("/api/clima/brasilia").await;
        assert_eq!(status, 200);
        assert_eq!(body["cidade"], "Brasília");
        assert!(body["temperatura"].is_number());
    }

    #[actix_web::test]
    async fn unavailable_city_is_404() {
        let (status, body) = get_json("/api/poluicao/Recife").await;
        assert_eq!(status, 404);
        assert!(body["error"].as_str().unwrap().contains("Recife"));
    }

    #[actix_web::test]
    async fn pollution_heatmap_points() {
        let (status, body) = get_json("/api/poluicao/brasilia/heatmap").await;
        assert_eq!(status, 200);
        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 50);
        let intensity = points[0]["intensidade"].as_f64().unwrap();
        assert!((0.0..10.0).contains(&intensity));
        assert!(points[0]["coordenadas"]["latitude"].is_number());
    }

    #[actix_web::test]
    async fn traffic_summary() {
        let (status, body) = get_json("/api/transito/BRASILIA").await;
        assert_eq!(status, 200);
        assert_eq!(body["nivel_congestionamento"], 65);
        assert_eq!(body["principais_vias"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn roads_fall_back_when_overpass_is_unreachable() {
        let (status, body) = get_json("/api/transito/brasilia/vias").await;
        assert_eq!(status, 200);
        assert_eq!(body["source"], "simulated");
        assert_eq!(body["roads"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn heat_island_summary_and_points() {
        let (_, summary) = get_json("/api/temperatura/brasilia").await;
        assert_eq!(summary["ilhas_calor"].as_array().unwrap().len(), 5);
        let (_, points) = get_json("/api/temperatura/brasilia/ilhas").await;
        assert_eq!(points.as_array().unwrap().len(), 9);
    }

    #[actix_web::test]
    async fn unknown_map_type_uses_default_tiles() {
        let (status, body) = get_json("/api/mapas/aquarela").await;
        assert_eq!(status, 200);
        assert_eq!(body["attribution"], "OpenStreetMap");
        let (_, body) = get_json("/api/mapas/satelite").await;
        assert_eq!(body["attribution"], "Esri");
    }

    #[actix_web::test]
    async fn zones_listing() {
        let (status, body) = get_json("/api/zonas").await;
        assert_eq!(status, 200);
        let zones = body.as_array().unwrap();
        assert_eq!(zones.len(), 6);
        let parque = zones
            .iter()
            .find(|z| z["zone"] == "Parque da Cidade")
            .unwrap();
        assert_eq!(parque["score"], 87);
    }

    #[actix_web::test]
    async fn city_suggestions() {
        let (_, body) = get_json("/api/cidades?q=bel").await;
        let cities = body["cities"].as_array().unwrap();
        assert!(cities.iter().any(|c| c == "Belo Horizonte"));
        assert!(cities.iter().any(|c| c == "Belém"));
    }

    #[actix_web::test]
    async fn analyze_circle_area() {
        let (status, body) = post_json(
            "/api/analise-area",
            &serde_json::json!({ "coordenadas": [-15.79, -47.91], "raio": 500 }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["zone"], "Parque da Cidade");
        assert_eq!(body["score"], 87);
        let feedback = &body["feedback"];
        let count = feedback["comments"].as_array().unwrap().len();
        assert!((8..=22).contains(&count));
    }

    #[actix_web::test]
    async fn analyze_without_area_is_400() {
        let (status, body) = post_json("/api/analise-area", &serde_json::json!({})).await;
        assert_eq!(status, 400);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn simulation_endpoint() {
        let (status, body) = post_json(
            "/api/simulacao",
            &serde_json::json!({
                "greenAreas": 20.0,
                "publicTransport": 20.0,
                "pollutionReduction": 40.0
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["cityScore"], 85);
        assert_eq!(body["airQualityGain"], 16);
    }

    #[actix_web::test]
    async fn report_is_an_attachment() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/relatorio/brasilia")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let disposition = resp
            .headers()
            .get(actix_web::http::header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("relatorio_brasilia_"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["cidade"], "Brasília");
        assert_ne!(body["indicadores"]["temperatura"], "--");
    }
}
