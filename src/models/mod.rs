//! Data models for `WeatherHub`
//!
//! - Location: best geocoding match for a city
//! - Forecast: current conditions, hourly and daily forecast
//! - Air quality: latest hourly air-quality sample
//! - Report: the combined answer for a city

pub mod air_quality;
pub mod forecast;
pub mod location;
pub mod report;

pub use air_quality::AirQualitySnapshot;
pub use forecast::{CurrentConditions, DailySummary, ForecastBundle, HourlySample};
pub use location::Location;
pub use report::{LocationSummary, WeatherReport};
