//! HTTP handlers for weather summary endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Local;
use serde::Deserialize;
use shared::{validate_latitude, validate_longitude, AdvisoryPayload, GpsCoordinates};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::WeatherService;
use crate::AppState;

/// Query parameters for a weather summary
#[derive(Debug, Deserialize, Validate)]
pub struct SummaryQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(max = 32, message = "Crop name must be at most 32 characters"))]
    pub crop: Option<String>,
}

impl SummaryQuery {
    /// Coordinate bounds, checked with the shared validators (NaN is out of range)
    pub fn validate_location(&self) -> AppResult<()> {
        validate_latitude(self.latitude).map_err(|message| location_error("latitude", message))?;
        validate_longitude(self.longitude)
            .map_err(|message| location_error("longitude", message))?;
        Ok(())
    }
}

fn location_error(field: &str, message: &str) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Weather summary, indicators and advisory for a location
pub async fn get_weather_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> AppResult<Json<AdvisoryPayload>> {
    let Query(query) = query?;
    query.validate_location()?;
    query.validate()?;

    let crop = query
        .crop
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(&state.config.defaults.crop);

    tracing::info!(
        "Weather summary requested for ({}, {}) crop={}",
        query.latitude,
        query.longitude,
        crop
    );

    let service = WeatherService::new(state.weather_client.clone(), state.config.clone());
    let payload = service
        .advisory_for(
            GpsCoordinates::new(query.latitude, query.longitude),
            crop,
            Local::now().date_naive(),
        )
        .await?;
    Ok(Json(payload))
}
