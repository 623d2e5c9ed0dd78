//! Advisory text generation
//!
//! Text comes from the Gemini backend when an API key is configured and
//! from a deterministic template otherwise. Generation never fails outward:
//! any backend error is logged and the template is used instead.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{fallback_advisory, AgronomicIndicator, WeatherSummary};
use thiserror::Error;

use crate::config::GeminiConfig;
use crate::external::gemini::{GeminiClient, GeminiError};

/// Advisory generation errors
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("generation backend not configured")]
    NotConfigured,

    #[error(transparent)]
    Backend(#[from] GeminiError),

    #[error("generation backend returned empty text")]
    EmptyResponse,
}

/// Inputs for one advisory
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryRequest<'a> {
    pub crop: &'a str,
    pub summary_date: NaiveDate,
    pub weather: &'a WeatherSummary,
    pub indicators: &'a [AgronomicIndicator],
}

/// A source of advisory text
#[async_trait]
pub trait AdvisoryGenerator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &AdvisoryRequest<'_>) -> Result<String, AdvisoryError>;
}

/// Template advisory built from indicator messages
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn compose(&self, request: &AdvisoryRequest<'_>) -> String {
        fallback_advisory(request.crop, request.indicators)
    }
}

#[async_trait]
impl AdvisoryGenerator for FallbackGenerator {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(&self, request: &AdvisoryRequest<'_>) -> Result<String, AdvisoryError> {
        Ok(self.compose(request))
    }
}

/// Advisory written by a Gemini model
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdvisoryGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: &AdvisoryRequest<'_>) -> Result<String, AdvisoryError> {
        let prompt = build_prompt(request);
        tracing::debug!("Requesting advisory from Gemini model {}", self.client.model());

        let text = self.client.generate_content(&prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisoryError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Pick the generator for this call from the current configuration
pub fn select_generator(config: &GeminiConfig) -> Result<Box<dyn AdvisoryGenerator>, AdvisoryError> {
    let api_key = config.api_key().ok_or(AdvisoryError::NotConfigured)?;
    let client = GeminiClient::new(config, api_key)?;
    Ok(Box::new(GeminiGenerator::new(client)))
}

/// Generate advisory text, falling back to the template on any failure
pub async fn generate_advisory(request: &AdvisoryRequest<'_>, config: &GeminiConfig) -> String {
    let fallback = FallbackGenerator;

    let generated = match select_generator(config) {
        Ok(generator) => generator.generate(request).await.map_err(|e| (generator.name(), e)),
        Err(e) => Err(("selection", e)),
    };

    match generated {
        Ok(text) => text,
        Err((_, AdvisoryError::NotConfigured)) => {
            tracing::warn!(
                "Gemini client not configured. Set AGRIWEATHER__GEMINI__API_KEY to enable generated advisories."
            );
            fallback.compose(request)
        }
        Err((source, e)) => {
            tracing::error!("Advisory generation via {} failed: {}", source, e);
            fallback.compose(request)
        }
    }
}

/// Prompt asking the model for a short, plain-language advisory
pub fn build_prompt(request: &AdvisoryRequest<'_>) -> String {
    let weather = request.weather;
    let indicator_section = request
        .indicators
        .iter()
        .map(|i| format!("- {} ({}): {}", i.indicator, i.severity, i.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an agronomy assistant helping smallholder farmers. Using the weather snapshot \
and indicators, craft a simple, friendly advisory.

Date: {date}
Crop: {crop}
Location: lat {lat:.3}, lon {lon:.3} ({timezone})
Current temperature: {temp}°C
Current precipitation: {precip} mm/hr
Daily low/high: {min}°C / {max}°C
Expected precipitation today: {sum} mm

Indicators:
{indicators}

Keep the message under 150 words, use plain language, and include practical next steps.",
        date = request.summary_date.format("%Y-%m-%d"),
        crop = request.crop,
        lat = weather.latitude,
        lon = weather.longitude,
        timezone = weather.timezone,
        temp = weather.current_temperature_c,
        precip = weather.current_precipitation_mm,
        min = weather.daily_min_temp_c,
        max = weather.daily_max_temp_c,
        sum = weather.daily_precipitation_sum_mm,
        indicators = indicator_section,
    )
}
