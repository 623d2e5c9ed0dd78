//! Configuration management for the AgriWeather service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRIWEATHER__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::GpsCoordinates;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_API_PREFIX: &str = "/api/v1";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com/v1";
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LATITUDE: f64 = 0.021;
const DEFAULT_LONGITUDE: f64 = 37.906;
const DEFAULT_CROP: &str = "maize";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Prefix for versioned API routes
    pub api_prefix: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Forecast provider configuration
    pub weather: WeatherConfig,

    /// Generative-text backend configuration
    pub gemini: GeminiConfig,

    /// Location and crop used when a request does not name them
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Base URL of the Open-Meteo API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key; advisories use the templated fallback when unset
    pub api_key: Option<String>,

    /// Model used for advisory generation
    pub model: String,

    /// Base URL of the Generative Language API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub crop: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRIWEATHER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api_prefix", DEFAULT_API_PREFIX)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("weather.base_url", DEFAULT_WEATHER_BASE_URL)?
            .set_default("weather.timeout_secs", DEFAULT_WEATHER_TIMEOUT_SECS as i64)?
            .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?
            .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("gemini.timeout_secs", DEFAULT_GEMINI_TIMEOUT_SECS as i64)?
            .set_default("defaults.latitude", DEFAULT_LATITUDE)?
            .set_default("defaults.longitude", DEFAULT_LONGITUDE)?
            .set_default("defaults.crop", DEFAULT_CROP)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRIWEATHER__ prefix)
            .add_source(
                Environment::with_prefix("AGRIWEATHER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            gemini: GeminiConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            timeout_secs: DEFAULT_WEATHER_TIMEOUT_SECS,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    /// API key if one is configured and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            crop: DEFAULT_CROP.to_string(),
        }
    }
}

impl DefaultsConfig {
    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }
}
