//! External API integrations

pub mod gemini;
pub mod weather;

pub use gemini::GeminiClient;
pub use weather::OpenMeteoClient;
