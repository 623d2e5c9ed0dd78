//! Weather API client for fetching forecast data
//!
//! Integrates with the free Open-Meteo forecast API and normalizes its
//! response into a [`WeatherSummary`].

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use shared::WeatherSummary;
use thiserror::Error;

use crate::config::WeatherConfig;

/// Forecast endpoint, relative to the configured base URL
pub const FORECAST_PATH: &str = "/forecast";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";
const DEFAULT_TIMEZONE: &str = "UTC";

/// Forecast provider errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport failure, timeout or non-success status
    #[error("weather provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Successful response without the fields a summary needs
    #[error("malformed weather provider response: {0}")]
    MalformedUpstreamResponse(String),
}

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Query string sent to the forecast endpoint
#[derive(Debug, Serialize)]
struct ForecastQuery {
    latitude: f64,
    longitude: f64,
    timezone: &'static str,
    current_weather: bool,
    hourly: &'static str,
    daily: &'static str,
}

impl OpenMeteoClient {
    /// Create a new client with the configured base URL and timeout
    pub fn new(config: &WeatherConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and normalize a weather summary for the requested location
    ///
    /// Issues a single request with no retries.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_weather_summary(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSummary, WeatherError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        let query = ForecastQuery {
            latitude,
            longitude,
            timezone: "auto",
            current_weather: true,
            hourly: "precipitation",
            daily: DAILY_FIELDS,
        };

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Weather API request failed: {}", e);
                WeatherError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Weather API error: {} - {}", status, body);
            return Err(WeatherError::UpstreamUnavailable(format!(
                "provider returned {}",
                status
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode weather response: {}", e);
            WeatherError::MalformedUpstreamResponse(e.to_string())
        })?;

        normalize_forecast(&data, latitude, longitude)
    }
}

/// Map a raw forecast payload to a [`WeatherSummary`]
///
/// `current_weather` (with `temperature` and `time`) and `daily` are
/// required. Every other numeric field falls back to a default instead of
/// failing.
pub fn normalize_forecast(
    data: &Value,
    latitude: f64,
    longitude: f64,
) -> Result<WeatherSummary, WeatherError> {
    let current = data
        .get("current_weather")
        .filter(|v| v.is_object())
        .ok_or_else(|| malformed(data, "missing current_weather"))?;
    let daily = data
        .get("daily")
        .filter(|v| v.is_object())
        .ok_or_else(|| malformed(data, "missing daily"))?;

    let temperature = current
        .get("temperature")
        .and_then(coerce_f64)
        .ok_or_else(|| malformed(data, "missing current_weather.temperature"))?;
    let current_time = current
        .get("time")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(data, "missing current_weather.time"))?;

    Ok(WeatherSummary {
        latitude: data.get("latitude").and_then(coerce_f64).unwrap_or(latitude),
        longitude: data.get("longitude").and_then(coerce_f64).unwrap_or(longitude),
        timezone: data
            .get("timezone")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TIMEZONE)
            .to_string(),
        current_temperature_c: temperature,
        current_precipitation_mm: current_precipitation(data, current_time),
        daily_precipitation_sum_mm: first_value(daily, "precipitation_sum"),
        daily_max_temp_c: first_value(daily, "temperature_2m_max"),
        daily_min_temp_c: first_value(daily, "temperature_2m_min"),
        observation_time: Some(current_time.to_string()),
    })
}

fn malformed(data: &Value, reason: &str) -> WeatherError {
    tracing::error!("Unexpected response schema from weather API ({}): {}", reason, data);
    WeatherError::MalformedUpstreamResponse(reason.to_string())
}

/// Precipitation for the provider's "current" hour
///
/// Uses the hourly value whose timestamp equals `current_time`; otherwise the
/// last hourly value; otherwise 0.0. Unreadable values fall through.
fn current_precipitation(data: &Value, current_time: &str) -> f64 {
    let hourly = data.get("hourly");
    let times = series(hourly, "time");
    let precipitation = series(hourly, "precipitation");

    let aligned = times
        .iter()
        .position(|t| t.as_str() == Some(current_time))
        .and_then(|index| precipitation.get(index))
        .and_then(coerce_f64);

    aligned
        .or_else(|| precipitation.last().and_then(coerce_f64))
        .unwrap_or(0.0)
}

/// First element of a daily series, 0.0 when missing or unreadable
fn first_value(daily: &Value, key: &str) -> f64 {
    series(Some(daily), key)
        .first()
        .and_then(coerce_f64)
        .unwrap_or(0.0)
}

fn series<'a>(parent: Option<&'a Value>, key: &str) -> &'a [Value] {
    parent
        .and_then(|p| p.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Lossy numeric read: numbers and numeric strings, anything else is absent
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn payload(hourly: Value, daily: Value) -> Value {
        json!({
            "latitude": 0.021,
            "longitude": 37.906,
            "timezone": "Africa/Nairobi",
            "current_weather": { "temperature": 28.4, "time": "2025-05-20T12:00" },
            "hourly": hourly,
            "daily": daily,
        })
    }

    fn daily() -> Value {
        json!({
            "time": ["2025-05-20"],
            "temperature_2m_max": [33.5],
            "temperature_2m_min": [18.3],
            "precipitation_sum": [1.5],
        })
    }

    #[test]
    fn test_exact_time_match_wins() {
        let data = payload(
            json!({
                "time": ["2025-05-20T11:00", "2025-05-20T12:00", "2025-05-20T13:00"],
                "precipitation": [0.1, 6.2, 9.9],
            }),
            daily(),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 6.2);
    }

    #[test]
    fn test_unreadable_aligned_value_uses_last() {
        let data = payload(
            json!({
                "time": ["2025-05-20T12:00", "2025-05-20T13:00"],
                "precipitation": [null, 0.7],
            }),
            daily(),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 0.7);
    }

    #[test]
    fn test_aligned_index_past_series_end_uses_last() {
        let data = payload(
            json!({
                "time": ["2025-05-20T11:00", "2025-05-20T12:00"],
                "precipitation": [0.4],
            }),
            daily(),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 0.4);
    }

    #[test]
    fn test_missing_hourly_defaults_to_zero() {
        let mut data = payload(json!({}), daily());
        data.as_object_mut().unwrap().remove("hourly");
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 0.0);
    }

    #[test]
    fn test_unreadable_last_value_defaults_to_zero() {
        let data = payload(
            json!({ "time": ["2025-05-20T09:00"], "precipitation": ["n/a"] }),
            daily(),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 0.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let data = payload(
            json!({ "time": [], "precipitation": [] }),
            json!({
                "temperature_2m_max": ["31.5"],
                "temperature_2m_min": [" 12 "],
                "precipitation_sum": "3.0",
            }),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.daily_max_temp_c, 31.5);
        assert_eq!(summary.daily_min_temp_c, 12.0);
        // series that is not an array
        assert_eq!(summary.daily_precipitation_sum_mm, 0.0);
    }

    #[test]
    fn test_booleans_and_objects_read_as_absent() {
        let data = payload(
            json!({ "time": ["2025-05-20T12:00"], "precipitation": [true] }),
            json!({
                "temperature_2m_max": [true],
                "temperature_2m_min": [{ "value": 18.3 }],
                "precipitation_sum": ["n/a"],
            }),
        );
        let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
        assert_eq!(summary.current_precipitation_mm, 0.0);
        assert_eq!(summary.daily_max_temp_c, 0.0);
        assert_eq!(summary.daily_min_temp_c, 0.0);
        assert_eq!(summary.daily_precipitation_sum_mm, 0.0);
    }

    #[test]
    fn test_provider_omissions_use_request_values() {
        let data = json!({
            "current_weather": { "temperature": 20.0, "time": "2025-05-20T12:00" },
            "daily": {},
        });
        let summary = normalize_forecast(&data, -1.25, 36.8).unwrap();
        assert_eq!(summary.latitude, -1.25);
        assert_eq!(summary.longitude, 36.8);
        assert_eq!(summary.timezone, "UTC");
        assert_eq!(summary.daily_precipitation_sum_mm, 0.0);
        assert_eq!(summary.daily_max_temp_c, 0.0);
        assert_eq!(summary.daily_min_temp_c, 0.0);
        assert_eq!(summary.observation_time.as_deref(), Some("2025-05-20T12:00"));
    }

    #[test]
    fn test_missing_required_sections_are_malformed() {
        let no_current = json!({ "daily": {} });
        assert!(matches!(
            normalize_forecast(&no_current, 0.0, 0.0),
            Err(WeatherError::MalformedUpstreamResponse(_))
        ));

        let no_daily = json!({ "current_weather": { "temperature": 20.0, "time": "T" } });
        assert!(matches!(
            normalize_forecast(&no_daily, 0.0, 0.0),
            Err(WeatherError::MalformedUpstreamResponse(_))
        ));

        let no_temperature = json!({ "current_weather": { "time": "T" }, "daily": {} });
        assert!(matches!(
            normalize_forecast(&no_temperature, 0.0, 0.0),
            Err(WeatherError::MalformedUpstreamResponse(_))
        ));
    }

    fn hour(index: usize) -> String {
        format!("2025-05-20T{:02}:00", index)
    }

    proptest! {
        #[test]
        fn prop_numeric_strings_match_numbers(value in -60.0f64..60.0) {
            let as_number = payload(json!({}), json!({ "temperature_2m_max": [value] }));
            let as_string = payload(json!({}), json!({ "temperature_2m_max": [value.to_string()] }));

            let from_number = normalize_forecast(&as_number, 0.0, 0.0).unwrap();
            let from_string = normalize_forecast(&as_string, 0.0, 0.0).unwrap();
            prop_assert_eq!(from_number.daily_max_temp_c, value);
            prop_assert_eq!(from_string.daily_max_temp_c, value);
        }

        #[test]
        fn prop_precipitation_follows_current_hour(
            precipitation in prop::collection::vec(0.0f64..50.0, 1..24),
            pick in any::<prop::sample::Index>(),
        ) {
            let index = pick.index(precipitation.len());
            let times: Vec<String> = (0..precipitation.len()).map(hour).collect();
            let mut data = payload(
                json!({ "time": times, "precipitation": precipitation.clone() }),
                daily(),
            );
            data["current_weather"]["time"] = json!(hour(index));

            let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
            prop_assert_eq!(summary.current_precipitation_mm, precipitation[index]);
        }

        #[test]
        fn prop_unmatched_hour_uses_last_value(
            precipitation in prop::collection::vec(0.0f64..50.0, 1..24),
        ) {
            let times: Vec<String> = (0..precipitation.len()).map(hour).collect();
            let mut data = payload(
                json!({ "time": times, "precipitation": precipitation.clone() }),
                daily(),
            );
            data["current_weather"]["time"] = json!("2025-05-21T00:00");

            let summary = normalize_forecast(&data, 0.0, 0.0).unwrap();
            prop_assert_eq!(summary.current_precipitation_mm, *precipitation.last().unwrap());
        }
    }
}
