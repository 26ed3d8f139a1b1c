//! Combined weather report returned by the aggregate endpoint

use serde::{Deserialize, Serialize};

use super::{AirQualitySnapshot, ForecastBundle, Location};

/// The part of a [`Location`] echoed back with a report
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationSummary {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Timezone the forecast was requested in
    pub timezone: String,
}

impl From<&Location> for LocationSummary {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            country: location.country.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            timezone: location.forecast_timezone().to_string(),
        }
    }
}

/// Location, forecast and (when available) air quality for one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: LocationSummary,
    pub forecast: ForecastBundle,
    /// `None` when the air-quality lookup failed
    pub air_quality: Option<AirQualitySnapshot>,
}
