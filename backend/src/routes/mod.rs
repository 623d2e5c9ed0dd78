//! Route definitions for the AgriWeather service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/weather", weather_routes())
        .nest("/advisories", advisory_routes())
}

fn weather_routes() -> Router<AppState> {
    Router::new().route("/summary", get(handlers::get_weather_summary))
}

fn advisory_routes() -> Router<AppState> {
    Router::new().route("/latest", get(handlers::get_latest_advisory))
}
