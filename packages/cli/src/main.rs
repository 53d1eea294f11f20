#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the urban map toolkit.
//!
//! ```text
//! urban_map analyze --lat -15.79 --lng -47.91 [--radius 1000 | --area 2.5] [--json] [--out DIR]
//! urban_map classify --lat -15.79 --lng -47.91
//! urban_map zones
//! urban_map simulate --green 20 --transport 20 --pollution 40
//! urban_map report [--city Brasília] [--out DIR]
//! urban_map suggest bel
//! urban_map prefs [--dark true] [--city Brasília]
//! urban_map serve
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use urban_map_analysis::{AreaAnalyzer, score, simulation};
use urban_map_analysis_models::{AreaAnalysisResult, SimulationParams};
use urban_map_city::{resolve_city, suggest};
use urban_map_dashboard::{DashboardState, Preferences, preferences::preferences_path};
use urban_map_report::{AreaReport, DashboardReport, write_report};
use urban_map_spatial::DrawnShape;
use urban_map_zone::ZoneTable;
use urban_map_zone_models::GeoPoint;

#[derive(Parser)]
#[command(
    name = "urban_map",
    about = "Urban sustainability analysis for Brasília"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse the area around a point
    Analyze {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Circle radius in metres
        #[arg(long, default_value = "1000", conflicts_with = "area")]
        radius: f64,
        /// Area in km², used instead of a circle
        #[arg(long)]
        area: Option<f64>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Also write an analysis report into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show which zone a point falls in
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// List zones with their scores
    Zones,
    /// Project the effect of city-wide improvements
    Simulate {
        /// Green-area increase, 0-100 %
        #[arg(long, default_value = "0")]
        green: f64,
        /// Public transport improvement, 0-100 %
        #[arg(long, default_value = "0")]
        transport: f64,
        /// Pollution reduction, 0-100 %
        #[arg(long, default_value = "0")]
        pollution: f64,
    },
    /// Export a dashboard report
    Report {
        /// City; defaults to the saved preference
        #[arg(long)]
        city: Option<String>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Suggest known city names
    Suggest {
        query: String,
    },
    /// Show or update saved preferences
    Prefs {
        #[arg(long)]
        dark: Option<bool>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Start the API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Analyze {
            lat,
            lng,
            radius,
            area,
            json,
            out,
        } => {
            let center = GeoPoint::new(lat, lng);
            let analyzer = AreaAnalyzer::new(ZoneTable::embedded());
            let result = if let Some(area_km2) = area {
                analyzer.analyze_point_area(center, area_km2).await
            } else {
                let shape = DrawnShape::Circle {
                    center,
                    radius_m: radius,
                };
                analyzer.analyze(&shape).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_analysis(&result);
            }

            if let Some(dir) = out {
                let report = AreaReport {
                    city: urban_map_city::DEFAULT_CITY.to_string(),
                    date: chrono::Utc::now(),
                    analysis: result,
                };
                let path = write_report(&dir, &report.filename(), &report)?;
                println!("\nReport written to {}", path.display());
            }
        }
        Commands::Classify { lat, lng } => {
            let classification = ZoneTable::embedded().classify_detailed(GeoPoint::new(lat, lng));
            match classification.rule_index {
                Some(idx) => println!("{} (rule {idx})", classification.zone),
                None => println!("{} (no rule matched, default zone)", classification.zone),
            }
        }
        Commands::Zones => {
            let table = ZoneTable::embedded();
            println!("{:<20} {:>5}  CLASS", "ZONE", "SCORE");
            println!("{}", "-".repeat(40));
            for (zone, profile) in table.zones() {
                let score = score::sustainability_score(profile);
                println!(
                    "{:<20} {score:>5}  {}",
                    zone.to_string(),
                    score::classify_score(score)
                );
            }
        }
        Commands::Simulate {
            green,
            transport,
            pollution,
        } => {
            let outcome = simulation::simulate(&SimulationParams {
                green_areas: green,
                public_transport: transport,
                pollution_reduction: pollution,
            });
            println!(
                "Qualidade do ar:    {:.1} ({:+})",
                outcome.air_quality, outcome.air_quality_gain
            );
            println!(
                "Sustentabilidade:   {:.1} ({:+})",
                outcome.sustainability, outcome.sustainability_gain
            );
            println!("Score da cidade:    {}", outcome.city_score);
        }
        Commands::Report { city, out } => {
            let mut preferences = Preferences::load(&preferences_path())?;
            if let Some(city) = city {
                preferences.city = city;
            }
            let mut state = DashboardState::new(&preferences)?;
            state.refresh_readouts(&mut rand::rng());

            let report = DashboardReport::capture(&state, chrono::Utc::now());
            let path = write_report(&out, &report.filename(), &report)?;
            println!("Report written to {}", path.display());
        }
        Commands::Suggest { query } => {
            let cities = suggest::suggest_cities(&query);
            if cities.is_empty() {
                println!("No matching cities.");
            }
            for city in cities {
                println!("{city}");
            }
        }
        Commands::Prefs { dark, city } => {
            let path = preferences_path();
            let mut preferences = Preferences::load(&path)?;
            let changed = dark.is_some() || city.is_some();

            if let Some(dark) = dark {
                preferences.dark_theme = dark;
            }
            if let Some(city) = city {
                preferences.city = resolve_city(&city)?.name.clone();
            }
            if changed {
                preferences.save(&path)?;
            }

            println!("dark_theme = {}", preferences.dark_theme);
            println!("city       = {}", preferences.city);
            println!("({})", path.display());
        }
        Commands::Serve => {
            // actix-web runs its own single-threaded runtime.
            tokio::task::spawn_blocking(|| {
                actix_rt::System::new().block_on(urban_map_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}

fn print_analysis(result: &AreaAnalysisResult) {
    println!("Zona:             {}", result.zone);
    println!("Área:             {:.2} km²", result.area_km2);
    println!(
        "Centro:           {}, {}",
        result.geographic_data.latitude, result.geographic_data.longitude
    );
    println!(
        "Sustentabilidade: {} ({})",
        result.score, result.classification
    );
    println!();

    println!("Indicadores:");
    for reading in &result.breakdown {
        println!("  {:<32} {:>3}  {}", reading.name, reading.value, reading.status);
    }
    println!();

    println!("Recomendações:");
    for rec in &result.recommendations {
        println!("  - {rec}");
    }
    println!();

    let impact = &result.environmental_impact;
    println!("Impacto ambiental:");
    println!("  CO₂:            {:.1} t/ano", impact.carbon_tons);
    println!("  Água:           {:.0} L/dia", impact.water_liters_per_day);
    println!("  Resíduos:       {:.1} t/dia", impact.waste_tons_per_day);
    println!("  Biodiversidade: {}", impact.biodiversity);

    if let Some(feedback) = &result.feedback {
        println!();
        println!(
            "Feedback: {} comentários, {}% de satisfação",
            feedback.total_feedbacks, feedback.satisfaction
        );
    }
}
