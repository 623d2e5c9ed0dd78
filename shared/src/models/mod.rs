//! Domain models for the AgriWeather advisory service

mod advisory;
mod indicator;
mod weather;

pub use advisory::*;
pub use indicator::*;
pub use weather::*;
