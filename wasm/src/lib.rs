//! WebAssembly module for the AgriWeather frontend
//!
//! Provides client-side computation for:
//! - Agronomic indicator evaluation
//! - Fallback advisory text
//! - Offline request validation

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::agronomy::*;
pub use shared::models::*;
pub use shared::validation::*;

/// Evaluate indicators for a weather summary given as JSON
///
/// `summary_date` is an ISO date (`YYYY-MM-DD`). Returns the indicators as a
/// JSON array.
#[wasm_bindgen]
pub fn evaluate_indicators_json(
    weather_json: &str,
    crop: &str,
    summary_date: &str,
) -> Result<String, JsValue> {
    let weather: WeatherSummary = serde_json::from_str(weather_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;
    let date = NaiveDate::parse_from_str(summary_date, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid summary date: {}", e)))?;

    let indicators = evaluate_indicators(&weather, crop, date);
    serde_json::to_string(&indicators)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode indicators: {}", e)))
}

/// Build the templated advisory from indicators given as JSON
#[wasm_bindgen]
pub fn fallback_advisory_json(crop: &str, indicators_json: &str) -> Result<String, JsValue> {
    let indicators: Vec<AgronomicIndicator> = serde_json::from_str(indicators_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid indicators JSON: {}", e)))?;

    Ok(fallback_advisory(crop, &indicators))
}

/// Check a summary request before sending it
#[wasm_bindgen]
pub fn validate_summary_request(
    latitude: f64,
    longitude: f64,
    crop: Option<String>,
) -> Result<(), JsValue> {
    validate_latitude(latitude).map_err(JsValue::from_str)?;
    validate_longitude(longitude).map_err(JsValue::from_str)?;
    if let Some(crop) = crop.as_deref() {
        validate_crop(crop).map_err(JsValue::from_str)?;
    }
    Ok(())
}

/// Severity rank for sorting cards in the UI (higher is more urgent)
#[wasm_bindgen]
pub fn severity_rank(severity: &str) -> i32 {
    match severity {
        "alert" => 2,
        "warning" => 1,
        "info" => 0,
        _ => -1,
    }
}
