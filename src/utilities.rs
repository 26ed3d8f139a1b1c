//! Capability interface over the pure validation and formatting helpers
//!
//! Request handlers receive an `Arc<dyn WeatherUtilities>` through the
//! application state instead of calling helper functions directly.

use crate::presentation::{self, TemperatureUnit};
use crate::{Result, validation};

pub trait WeatherUtilities: Send + Sync {
    fn validate_city_name(&self, name: &str) -> Result<()>;

    /// Validate text-encoded coordinates, returning them parsed
    fn validate_coordinates(&self, latitude: &str, longitude: &str) -> Result<(f64, f64)>;

    fn celsius_to_fahrenheit(&self, celsius: f64) -> f64;

    fn fahrenheit_to_celsius(&self, fahrenheit: f64) -> f64;

    fn format_temperature(&self, celsius: f64, unit: TemperatureUnit) -> String;

    fn wind_direction(&self, degrees: f64) -> &'static str;

    fn categorize_aqi(&self, index: Option<i64>) -> &'static str;

    fn aqi_recommendation(&self, index: Option<i64>) -> &'static str;

    fn aqi_color(&self, index: Option<i64>) -> &'static str;

    fn weather_code_description(&self, code: u8) -> &'static str;
}

/// In-process implementation backed by [`crate::presentation`] and
/// [`crate::validation`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeUtilities;

impl WeatherUtilities for NativeUtilities {
    fn validate_city_name(&self, name: &str) -> Result<()> {
        validation::validate_city_name(name)
    }

    fn validate_coordinates(&self, latitude: &str, longitude: &str) -> Result<(f64, f64)> {
        validation::validate_coordinates(latitude, longitude)
    }

    fn celsius_to_fahrenheit(&self, celsius: f64) -> f64 {
        presentation::celsius_to_fahrenheit(celsius)
    }

    fn fahrenheit_to_celsius(&self, fahrenheit: f64) -> f64 {
        presentation::fahrenheit_to_celsius(fahrenheit)
    }

    fn format_temperature(&self, celsius: f64, unit: TemperatureUnit) -> String {
        presentation::format_temperature(celsius, unit)
    }

    fn wind_direction(&self, degrees: f64) -> &'static str {
        presentation::wind_direction(degrees)
    }

    fn categorize_aqi(&self, index: Option<i64>) -> &'static str {
        presentation::categorize_aqi(index)
    }

    fn aqi_recommendation(&self, index: Option<i64>) -> &'static str {
        presentation::aqi_recommendation(index)
    }

    fn aqi_color(&self, index: Option<i64>) -> &'static str {
        presentation::aqi_color(index)
    }

    fn weather_code_description(&self, code: u8) -> &'static str {
        presentation::weather_code_description(code)
    }
}
