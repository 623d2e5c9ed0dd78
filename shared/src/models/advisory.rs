//! Advisory response models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AgronomicIndicator, WeatherSummary};

/// Bullet used when there are no indicators to summarize
pub const STABLE_WEATHER_BULLET: &str = "- Weather looks stable. Continue regular crop care.";

/// Combined weather, indicators and advisory text for one crop and day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryPayload {
    pub crop: String,
    pub summary_date: NaiveDate,
    pub weather: WeatherSummary,
    pub indicators: Vec<AgronomicIndicator>,
    /// Generated or templated advisory for the crop and conditions
    pub advisory_text: Option<String>,
}

/// Deterministic advisory built from indicator messages
///
/// A header naming the crop is followed by one bullet per indicator, in the
/// order given.
pub fn fallback_advisory(crop: &str, indicators: &[AgronomicIndicator]) -> String {
    let bullet_points = indicators
        .iter()
        .map(|indicator| format!("- {}", indicator.message))
        .collect::<Vec<_>>()
        .join("\n");

    let body = if bullet_points.is_empty() {
        STABLE_WEATHER_BULLET.to_string()
    } else {
        bullet_points
    };

    format!("Summary for {} fields:\n{}", capitalize(crop), body)
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
