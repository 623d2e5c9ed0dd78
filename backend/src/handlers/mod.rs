//! HTTP handlers

mod advisories;
mod health;
mod weather;

pub use advisories::get_latest_advisory;
pub use health::{health_check, HealthResponse};
pub use weather::{get_weather_summary, SummaryQuery};
