//! Weather data models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Normalized weather snapshot for a single location and day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    /// Current air temperature in Celsius
    pub current_temperature_c: f64,
    /// Current precipitation rate in millimeters per hour
    pub current_precipitation_mm: f64,
    /// Total expected precipitation for the day in millimeters
    pub daily_precipitation_sum_mm: f64,
    /// Daily maximum air temperature in Celsius
    pub daily_max_temp_c: f64,
    /// Daily minimum air temperature in Celsius
    pub daily_min_temp_c: f64,
    /// Provider timestamp of the latest observation
    #[serde(default)]
    pub observation_time: Option<String>,
}

impl WeatherSummary {
    /// Coordinates the provider reported for this snapshot
    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }
}
