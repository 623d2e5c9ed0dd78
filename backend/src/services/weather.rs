//! Weather advisory service
//!
//! Fetches the forecast, evaluates indicators and composes the advisory for
//! a single request.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{evaluate_indicators, AdvisoryPayload, GpsCoordinates};

use crate::config::Config;
use crate::error::AppResult;
use crate::external::weather::OpenMeteoClient;
use crate::services::advisory::{generate_advisory, AdvisoryRequest};

/// Weather service for building advisory payloads
#[derive(Clone)]
pub struct WeatherService {
    weather_client: OpenMeteoClient,
    config: Arc<Config>,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(weather_client: OpenMeteoClient, config: Arc<Config>) -> Self {
        Self {
            weather_client,
            config,
        }
    }

    /// Build the advisory payload for a location and crop
    pub async fn advisory_for(
        &self,
        location: GpsCoordinates,
        crop: &str,
        summary_date: NaiveDate,
    ) -> AppResult<AdvisoryPayload> {
        let weather = self
            .weather_client
            .fetch_weather_summary(location.latitude, location.longitude)
            .await?;

        let indicators = evaluate_indicators(&weather, crop, summary_date);
        let resolved = weather.location();
        if resolved != location {
            tracing::debug!(
                "Provider snapped ({}, {}) to grid point ({}, {})",
                location.latitude,
                location.longitude,
                resolved.latitude,
                resolved.longitude
            );
        }
        tracing::debug!(
            "Evaluated {} indicator(s) for {} at ({}, {})",
            indicators.len(),
            crop,
            resolved.latitude,
            resolved.longitude
        );

        let request = AdvisoryRequest {
            crop,
            summary_date,
            weather: &weather,
            indicators: &indicators,
        };
        let advisory_text = generate_advisory(&request, &self.config.gemini).await;

        Ok(AdvisoryPayload {
            crop: crop.to_string(),
            summary_date,
            weather,
            indicators,
            advisory_text: Some(advisory_text),
        })
    }
}
