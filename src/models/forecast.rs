//! Forecast bundle returned by the forecast endpoint
//!
//! Upstream serves hourly and daily data as parallel arrays; here they are
//! pivoted into rows, one per hour or day, in upstream order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of days requested from the upstream forecast
pub const FORECAST_DAYS: u8 = 10;
/// Past hours included ahead of the current hour
pub const PAST_HOURS: u8 = 1;

/// Conditions at the time of the request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Local timestamp, `YYYY-MM-DDTHH:MM`
    pub time: String,
    /// Air temperature at 2 m in °C
    pub temperature: Option<f64>,
    /// Relative humidity at 2 m in %
    pub humidity: Option<f64>,
    pub apparent_temperature: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<u8>,
    pub description: String,
    /// Wind speed at 10 m in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction at 10 m in degrees
    pub wind_direction: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Pressure reduced to mean sea level in hPa
    pub pressure_msl: Option<f64>,
    /// Pressure at the surface in hPa
    pub surface_pressure: Option<f64>,
    /// Visibility in metres
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub is_day: bool,
}

/// One hour of the hourly forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlySample {
    pub time: String,
    pub temperature: Option<f64>,
    pub weather_code: Option<u8>,
    /// Probability of precipitation in %
    pub precipitation_probability: Option<f64>,
    pub precipitation: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Aggregates for one forecast day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySummary {
    /// Local date, `YYYY-MM-DD`
    pub date: String,
    pub weather_code: Option<u8>,
    pub description: String,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub precipitation_probability_max: Option<f64>,
    pub precipitation_hours: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub uv_index_max: Option<f64>,
    pub wind_speed_max: Option<f64>,
    /// Dominant wind direction in degrees
    pub wind_direction_dominant: Option<f64>,
}

/// Current conditions plus hourly and daily forecast for one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastBundle {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub utc_offset_seconds: Option<i32>,
    /// Elevation in metres used for the forecast grid cell
    pub elevation: Option<f64>,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlySample>,
    pub daily: Vec<DailySummary>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl ForecastBundle {
    /// Summary for a specific day offset (0 = today)
    #[must_use]
    pub fn day(&self, day_offset: usize) -> Option<&DailySummary> {
        self.daily.get(day_offset)
    }

    /// Hourly samples belonging to the given local date (`YYYY-MM-DD`)
    pub fn hours_on<'a>(&'a self, date: &'a str) -> impl Iterator<Item = &'a HourlySample> + 'a {
        self.hourly
            .iter()
            .filter(move |sample| sample.time.starts_with(date))
    }
}
