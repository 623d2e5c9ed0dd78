//! AgriWeather advisory service - backend library
//!
//! Fetches a forecast from Open-Meteo, derives agronomic indicators and
//! phrases them as an advisory, served over a small REST API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::OpenMeteoClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_client: OpenMeteoClient,
}

impl AppState {
    /// Build state from loaded configuration
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let weather_client = OpenMeteoClient::new(&config.weather)?;
        Ok(Self {
            config: Arc::new(config),
            weather_client,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_prefix = state.config.api_prefix.clone();

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest(&api_prefix, routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
