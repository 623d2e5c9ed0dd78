//! Rule-based agronomic indicators
//!
//! Each rule is a fixed threshold over the weather summary. Rules are
//! independent and may co-occur; results keep the rule order below.

use chrono::NaiveDate;

use crate::models::{AgronomicIndicator, Severity, WeatherSummary};

/// Daily rainfall below this (mm) suggests irrigation
pub const LOW_RAINFALL_MM: f64 = 2.0;
/// Current precipitation above this (mm/h) is heavy rain
pub const HEAVY_RAIN_MM: f64 = 5.0;
/// Daily maximum above this (°C) risks heat stress
pub const HEAT_STRESS_C: f64 = 32.0;
/// Daily minimum below this (°C) is a cool night
pub const COOL_NIGHT_C: f64 = 12.0;

pub const LOW_RAINFALL_MESSAGE: &str =
    "Low rainfall expected today. Consider light irrigation if soil is dry.";
pub const HEAVY_RAIN_MESSAGE: &str =
    "Heavy rain right now. Delay field operations to avoid soil compaction.";
pub const HEAT_STRESS_MESSAGE: &str =
    "High temperatures today. Check for wilting and ensure crops have enough moisture.";
pub const COOL_NIGHT_MESSAGE: &str =
    "Cool night forecast. Young seedlings may grow slower; monitor for pests.";
pub const FAVORABLE_MESSAGE: &str = "Weather looks favorable for routine field work today.";

/// Evaluate the threshold rules for a weather summary
///
/// `crop` and `summary_date` do not change the thresholds today. When no rule
/// matches, a single `favorable` indicator is returned, so the result always
/// holds between one and four entries.
pub fn evaluate_indicators(
    weather: &WeatherSummary,
    _crop: &str,
    _summary_date: NaiveDate,
) -> Vec<AgronomicIndicator> {
    let mut indicators = Vec::with_capacity(4);

    if weather.daily_precipitation_sum_mm < LOW_RAINFALL_MM {
        indicators.push(AgronomicIndicator::new(
            "low_rainfall",
            Severity::Warning,
            LOW_RAINFALL_MESSAGE,
        ));
    }

    if weather.current_precipitation_mm > HEAVY_RAIN_MM {
        indicators.push(AgronomicIndicator::new(
            "heavy_rain",
            Severity::Alert,
            HEAVY_RAIN_MESSAGE,
        ));
    }

    if weather.daily_max_temp_c > HEAT_STRESS_C {
        indicators.push(AgronomicIndicator::new(
            "heat_stress",
            Severity::Alert,
            HEAT_STRESS_MESSAGE,
        ));
    }

    if weather.daily_min_temp_c < COOL_NIGHT_C {
        indicators.push(AgronomicIndicator::new(
            "cool_night",
            Severity::Info,
            COOL_NIGHT_MESSAGE,
        ));
    }

    if indicators.is_empty() {
        indicators.push(AgronomicIndicator::new(
            "favorable",
            Severity::Info,
            FAVORABLE_MESSAGE,
        ));
    }

    indicators
}
