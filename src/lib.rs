//! `WeatherHub` - city weather lookups backed by Open-Meteo
//!
//! This library resolves city names to coordinates, fetches current
//! conditions, forecasts and air quality, and serves them over a small
//! JSON HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod service;
pub mod utilities;
pub mod validation;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::{ApiError, AppState};
pub use config::WeatherHubConfig;
pub use error::{ErrorCategory, WeatherError};
pub use models::{AirQualitySnapshot, ForecastBundle, Location, WeatherReport};
pub use service::{ReportError, ReportStage, WeatherService};
pub use utilities::{NativeUtilities, WeatherUtilities};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
