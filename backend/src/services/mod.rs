//! Business logic services for the AgriWeather service

pub mod advisory;
pub mod weather;

pub use advisory::{generate_advisory, AdvisoryGenerator, FallbackGenerator, GeminiGenerator};
pub use weather::WeatherService;
