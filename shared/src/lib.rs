//! Shared types and models for the AgriWeather advisory service
//!
//! This crate contains the weather and advisory models plus the pure
//! agronomy rules, shared between the backend and the frontend (via WASM).

pub mod agronomy;
pub mod models;
pub mod types;
pub mod validation;

pub use agronomy::*;
pub use models::*;
pub use types::*;
pub use validation::*;
