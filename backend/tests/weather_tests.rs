//! Weather client integration tests
//!
//! Tests for forecast normalization against a mock Open-Meteo server:
//! - Hourly precipitation alignment to the current timestamp
//! - Daily series defaulting
//! - Upstream failure classification

use agriweather_backend::config::WeatherConfig;
use agriweather_backend::external::weather::{OpenMeteoClient, WeatherError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

fn client_for(server: &ServerGuard) -> OpenMeteoClient {
    OpenMeteoClient::new(&WeatherConfig {
        base_url: server.url(),
        timeout_secs: 10,
    })
    .unwrap()
}

fn sample_response(current_time: &str, hourly_precipitation: Value, precipitation_sum: Value) -> Value {
    json!({
        "latitude": 0.021,
        "longitude": 37.906,
        "timezone": "Africa/Nairobi",
        "current_weather": { "temperature": 28.4, "time": current_time },
        "hourly": {
            "time": ["2025-05-20T11:00", "2025-05-20T12:00"],
            "precipitation": hourly_precipitation,
        },
        "daily": {
            "time": ["2025-05-20"],
            "temperature_2m_max": [33.5],
            "temperature_2m_min": [18.3],
            "precipitation_sum": precipitation_sum,
        },
    })
}

async fn mock_forecast(server: &mut ServerGuard, status: usize, body: String) -> mockito::Mock {
    server
        .mock("GET", "/forecast")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

// ============================================================================
// Normalization
// ============================================================================

#[tokio::test]
async fn test_fetch_weather_summary_parses_response() {
    let mut server = Server::new_async().await;
    let body = sample_response("2025-05-20T12:00", json!([0.1, 6.2]), json!([1.5]));
    let _mock = mock_forecast(&mut server, 200, body.to_string()).await;

    let summary = client_for(&server)
        .fetch_weather_summary(0.021, 37.906)
        .await
        .unwrap();

    assert_eq!(summary.latitude, 0.021);
    assert_eq!(summary.longitude, 37.906);
    assert_eq!(summary.timezone, "Africa/Nairobi");
    assert_eq!(summary.current_temperature_c, 28.4);
    assert_eq!(summary.current_precipitation_mm, 6.2);
    assert_eq!(summary.daily_precipitation_sum_mm, 1.5);
    assert_eq!(summary.daily_max_temp_c, 33.5);
    assert_eq!(summary.daily_min_temp_c, 18.3);
    assert_eq!(summary.observation_time.as_deref(), Some("2025-05-20T12:00"));
}

#[tokio::test]
async fn test_falls_back_to_last_precipitation() {
    let mut server = Server::new_async().await;
    let body = sample_response("2025-05-20T14:00", json!([0.0, 1.2]), json!([0.0]));
    let _mock = mock_forecast(&mut server, 200, body.to_string()).await;

    let summary = client_for(&server)
        .fetch_weather_summary(0.021, 37.906)
        .await
        .unwrap();

    assert_eq!(summary.current_precipitation_mm, 1.2);
}

#[tokio::test]
async fn test_empty_hourly_series_defaults_to_zero() {
    let mut server = Server::new_async().await;
    let body = sample_response("2025-05-20T12:00", json!([]), json!([1.5]));
    let _mock = mock_forecast(&mut server, 200, body.to_string()).await;

    let summary = client_for(&server)
        .fetch_weather_summary(0.021, 37.906)
        .await
        .unwrap();

    assert_eq!(summary.current_precipitation_mm, 0.0);
}

#[tokio::test]
async fn test_empty_daily_series_defaults_to_zero() {
    let mut server = Server::new_async().await;
    let body = sample_response("2025-05-20T12:00", json!([0.1, 6.2]), json!([]));
    let _mock = mock_forecast(&mut server, 200, body.to_string()).await;

    let summary = client_for(&server)
        .fetch_weather_summary(0.021, 37.906)
        .await
        .unwrap();

    assert_eq!(summary.daily_precipitation_sum_mm, 0.0);
    assert_eq!(summary.daily_max_temp_c, 33.5);
}

#[tokio::test]
async fn test_sends_fixed_forecast_query() {
    let mut server = Server::new_async().await;
    let body = sample_response("2025-05-20T12:00", json!([0.1, 6.2]), json!([1.5]));
    let mock = server
        .mock("GET", "/forecast")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("latitude".into(), "0.021".into()),
            Matcher::UrlEncoded("longitude".into(), "37.906".into()),
            Matcher::UrlEncoded("timezone".into(), "auto".into()),
            Matcher::UrlEncoded("current_weather".into(), "true".into()),
            Matcher::UrlEncoded("hourly".into(), "precipitation".into()),
            Matcher::UrlEncoded(
                "daily".into(),
                "temperature_2m_max,temperature_2m_min,precipitation_sum".into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await;

    client_for(&server)
        .fetch_weather_summary(0.021, 37.906)
        .await
        .unwrap();

    mock.assert_async().await;
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_daily_is_malformed() {
    let mut server = Server::new_async().await;
    let mut body = sample_response("2025-05-20T12:00", json!([0.1]), json!([1.5]));
    body.as_object_mut().unwrap().remove("daily");
    let _mock = mock_forecast(&mut server, 200, body.to_string()).await;

    let result = client_for(&server).fetch_weather_summary(0.021, 37.906).await;

    assert!(matches!(result, Err(WeatherError::MalformedUpstreamResponse(_))));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = mock_forecast(&mut server, 200, "<html>oops</html>".to_string()).await;

    let result = client_for(&server).fetch_weather_summary(0.021, 37.906).await;

    assert!(matches!(result, Err(WeatherError::MalformedUpstreamResponse(_))));
}

#[tokio::test]
async fn test_error_status_is_unavailable() {
    let mut server = Server::new_async().await;
    let _mock = mock_forecast(
        &mut server,
        500,
        json!({ "error": true, "reason": "internal" }).to_string(),
    )
    .await;

    let result = client_for(&server).fetch_weather_summary(0.021, 37.906).await;

    assert!(matches!(result, Err(WeatherError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_unavailable() {
    let client = OpenMeteoClient::new(&WeatherConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let result = client.fetch_weather_summary(0.021, 37.906).await;

    assert!(matches!(result, Err(WeatherError::UpstreamUnavailable(_))));
}
