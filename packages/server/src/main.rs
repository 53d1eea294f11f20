#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the urban map dashboard.
//!
//! Configuration is read from the environment; see
//! [`urban_map_server::run_server`] and [`urban_map_server::AppState::from_env`].

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    urban_map_server::run_server().await
}
