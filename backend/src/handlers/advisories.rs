//! HTTP handlers for advisory endpoints

use axum::{extract::State, Json};
use chrono::Local;
use shared::AdvisoryPayload;

use crate::error::AppResult;
use crate::services::WeatherService;
use crate::AppState;

/// Advisory for the configured default location and crop
pub async fn get_latest_advisory(
    State(state): State<AppState>,
) -> AppResult<Json<AdvisoryPayload>> {
    let defaults = &state.config.defaults;
    tracing::info!("Latest advisory requested for default crop {}", defaults.crop);

    let service = WeatherService::new(state.weather_client.clone(), state.config.clone());
    let payload = service
        .advisory_for(defaults.location(), &defaults.crop, Local::now().date_naive())
        .await?;
    Ok(Json(payload))
}
