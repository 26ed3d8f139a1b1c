//! Unit conversion and display helpers
//!
//! Pure functions without I/O. The HTTP layer reaches them through
//! [`crate::utilities::WeatherUtilities`]; the weather client uses
//! [`weather_code_description`] directly when reshaping forecasts.

use std::fmt;
use std::str::FromStr;

use crate::WeatherError;

/// 16-point compass rose, clockwise from north
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        })
    }
}

impl FromStr for TemperatureUnit {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CELSIUS" => Ok(TemperatureUnit::Celsius),
            "F" | "FAHRENHEIT" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(WeatherError::invalid_input(format!(
                "Unknown temperature unit '{s}'. Use C or F"
            ))),
        }
    }
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Format a Celsius reading in the requested unit, rounded to a whole degree
#[must_use]
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    // integer cast keeps "-0" out of the output
    format!("{}{}", value.round_ties_even() as i64, unit.symbol())
}

/// Map a bearing in degrees onto the 16-point compass rose
#[must_use]
pub fn wind_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "Unknown";
    }
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

#[must_use]
pub fn ms_to_kmh(speed: f64) -> f64 {
    speed * 3.6
}

#[must_use]
pub fn ms_to_mph(speed: f64) -> f64 {
    speed * 2.237
}

/// Label a European AQI reading
#[must_use]
pub fn categorize_aqi(index: Option<i64>) -> &'static str {
    match index {
        None => "Unknown",
        Some(i) if i <= 20 => "Excellent",
        Some(i) if i <= 40 => "Good",
        Some(i) if i <= 60 => "Moderate",
        Some(i) if i <= 80 => "Poor",
        Some(_) => "Very Poor",
    }
}

#[must_use]
pub fn aqi_recommendation(index: Option<i64>) -> &'static str {
    match index {
        None => "Unable to determine air quality",
        Some(i) if i <= 20 => "Good conditions for outdoor activities",
        Some(i) if i <= 40 => "Good air quality overall",
        Some(i) if i <= 60 => "Sensitive groups may experience effects",
        Some(i) if i <= 80 => "Members of general public may feel effects",
        Some(_) => "Everyone may begin to feel effects. Limit outdoor activities",
    }
}

/// Display colour for an AQI reading, as a hex string
#[must_use]
pub fn aqi_color(index: Option<i64>) -> &'static str {
    match index {
        None => "#9e9e9e",
        Some(i) if i <= 20 => "#50f550",
        Some(i) if i <= 40 => "#50ccaa",
        Some(i) if i <= 60 => "#f5cf50",
        Some(i) if i <= 80 => "#ff5050",
        Some(i) if i <= 100 => "#960032",
        Some(_) => "#7d2181",
    }
}

/// Short description for a WMO weather code
#[must_use]
pub fn weather_code_description(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 | 53 | 55 => "Drizzle",
        61 | 63 | 65 => "Rain",
        80..=82 => "Showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunder & hail",
        _ => "Unknown",
    }
}
